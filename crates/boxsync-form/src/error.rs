use boxsync_core::EditionId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A required control is absent from the form.
    #[error("required form control \"{id}\" is missing")]
    Configuration { id: String },

    #[error("network error loading boxes for edition {edition}: {reason}")]
    Network { edition: EditionId, reason: String },

    #[error("invalid boxes response for edition {edition}: {reason}")]
    InvalidResponse { edition: EditionId, reason: String },
}
