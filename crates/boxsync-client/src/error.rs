use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected payload from {url}: expected an array of box records, got {shape}")]
    UnexpectedShape {
        url: String,
        shape: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// `true` when the request never produced a usable HTTP response
    /// (connection refused, timeout, body read failure).
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }
}
