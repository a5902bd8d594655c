//! Loading media by reference
//!
//! Photos and music are referenced by a plain string: http(s) URLs are
//! downloaded, anything else is treated as a path on the local filesystem.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

/// Giving up on a host that does not accept the connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Giving up on a whole download, body included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Why a media reference could not be loaded.
///
/// Carries strings rather than the underlying errors so it can travel
/// inside UI messages, which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("could not set up HTTP client: {0}")]
    Client(String),
    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("could not decode {reference}: {reason}")]
    Decode { reference: String, reason: String },
}

/// Is this reference fetched over the network?
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Loads media references; one per app, cloned into each background task.
///
/// Every remote request is bounded in time, so a silent server ends in
/// `FetchError::Http` instead of a task that never finishes.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeouts(CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()
            .map_err(|err| FetchError::Client(err.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch the raw bytes behind a media reference
    pub async fn fetch_bytes(&self, reference: String) -> Result<Arc<[u8]>, FetchError> {
        if is_remote(&reference) {
            let http = |err: reqwest::Error| FetchError::Http {
                url: reference.clone(),
                reason: err.to_string(),
            };

            let response = self
                .http
                .get(&reference)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(http)?;
            let bytes = response.bytes().await.map_err(http)?;

            tracing::debug!(url = %reference, size = bytes.len(), "downloaded");
            Ok(Arc::from(&bytes[..]))
        } else {
            let bytes = tokio::fs::read(&reference)
                .await
                .map_err(|err| FetchError::Io {
                    path: reference.clone(),
                    reason: err.to_string(),
                })?;

            tracing::debug!(path = %reference, size = bytes.len(), "read from disk");
            Ok(Arc::from(bytes))
        }
    }
}
