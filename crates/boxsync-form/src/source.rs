use std::future::Future;

use boxsync_client::{BoxesClient, ClientError};
use boxsync_core::{BoxRecord, EditionId};

/// Why a fetch produced no usable records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection failure, timeout, or body read failure.
    Network(String),
    /// Non-2xx status, or a body that is not an array of box records.
    InvalidResponse(String),
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        if err.is_network() {
            FetchError::Network(err.to_string())
        } else {
            FetchError::InvalidResponse(err.to_string())
        }
    }
}

/// Where the synchronizer reads box records from.
pub trait BoxSource: Send + Sync {
    fn fetch_boxes(
        &self,
        edition: &EditionId,
    ) -> impl Future<Output = Result<Vec<BoxRecord>, FetchError>> + Send;
}

impl BoxSource for BoxesClient {
    async fn fetch_boxes(&self, edition: &EditionId) -> Result<Vec<BoxRecord>, FetchError> {
        BoxesClient::fetch_boxes(self, edition)
            .await
            .map_err(FetchError::from)
    }
}
