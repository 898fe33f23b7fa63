pub mod app_config;
pub mod boxes;
pub mod config;

pub use app_config::{AppConfig, ClearPolicy};
pub use boxes::{box_options, BoxId, BoxRecord, EditionId, Ordinal, SelectOption, PLACEHOLDER_LABEL};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
