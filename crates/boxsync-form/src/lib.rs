pub mod control;
pub mod error;
pub mod source;
pub mod synchronizer;

pub use control::{FormDocument, MemoryForm, MemoryNotice, MemorySelect, NoticeSink, SelectControl};
pub use error::SyncError;
pub use source::{BoxSource, FetchError};
pub use synchronizer::{ChangeOutcome, SyncSettings, Synchronizer, LOAD_FAILED_NOTICE};
