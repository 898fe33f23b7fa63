pub mod client;
pub mod error;
pub mod shape;

pub use client::BoxesClient;
pub use error::ClientError;
pub use shape::describe_shape;
