//! HTTP client for the admin `boxes/<edition>/` endpoint.

use std::time::Duration;

use boxsync_core::{AppConfig, BoxRecord, EditionId};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ClientError;
use crate::shape::describe_shape;

/// Client for the endpoint that lists the boxes of one edition.
///
/// Each call is a single `GET` with no retries. Non-2xx statuses, bodies that
/// are not JSON, and JSON that is not an array of box records all surface as
/// typed [`ClientError`]s.
pub struct BoxesClient {
    client: Client,
    /// `{base_url}{boxes_path}` with exactly one trailing slash.
    endpoint: Url,
}

impl BoxesClient {
    /// Creates a client with the given timeout and `User-Agent`.
    ///
    /// `boxes_path` is the path prefix under `base_url`; the edition id is
    /// appended to it as one path segment followed by a trailing slash.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidBaseUrl`] if `base_url` + `boxes_path` is not
    ///   a hierarchical URL.
    /// - [`ClientError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        boxes_path: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let endpoint = Self::endpoint_url(base_url, boxes_path)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`BoxesClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            &config.boxes_path,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the boxes of `edition`, in the order the server returns them.
    ///
    /// An empty array is a valid response and yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on connection failure, timeout, or body read failure.
    /// - [`ClientError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    /// - [`ClientError::UnexpectedShape`] if the JSON is not an array of
    ///   `{id, ordinal}` records. The payload shape is logged at warn level.
    pub async fn fetch_boxes(&self, edition: &EditionId) -> Result<Vec<BoxRecord>, ClientError> {
        let url = self.boxes_url(edition)?;
        tracing::debug!(%edition, %url, "fetching boxes");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("boxes for edition {edition}"),
                source: e,
            })?;

        match Vec::<BoxRecord>::deserialize(&payload) {
            Ok(records) => {
                tracing::debug!(%edition, count = records.len(), "fetched boxes");
                Ok(records)
            }
            Err(source) => {
                let shape = describe_shape(&payload);
                tracing::warn!(
                    %edition,
                    %url,
                    %shape,
                    error = %source,
                    "boxes payload does not match expected shape"
                );
                Err(ClientError::UnexpectedShape {
                    url: url.to_string(),
                    shape,
                    source,
                })
            }
        }
    }

    /// Builds `{endpoint}{edition}/`, percent-encoding the edition id as a
    /// single path segment.
    pub(crate) fn boxes_url(&self, edition: &EditionId) -> Result<Url, ClientError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                base_url: self.endpoint.to_string(),
                reason: "URL cannot carry path segments".to_owned(),
            })?
            .pop_if_empty()
            .push(edition.as_str())
            .push("");
        Ok(url)
    }

    fn endpoint_url(base_url: &str, boxes_path: &str) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_owned()));
        }

        // Normalise: exactly one trailing slash so the edition segment is
        // appended rather than replacing the last path segment.
        let path = format!("{}/", boxes_path.trim_end_matches('/'));
        base.join(&path).map_err(|e| invalid(e.to_string()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
