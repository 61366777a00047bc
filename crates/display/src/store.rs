//! Content-store adapter: the display's read-only view of the server.
//!
//! The store can change underneath the display at any time, so nothing
//! is cached across resolutions -- every resolution re-reads.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{MediaItem, Screen};

/// Errors from a content-store read.
///
/// The runtime treats any of these as "no content" rather than a fault:
/// an unattended display must never show a raw error because the network
/// blipped.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure reaching the store.
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with something unexpected.
    #[error("Unexpected store response: {0}")]
    Decode(String),
}

/// Read operations the display needs from the content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every media item, in stable store order.
    async fn list_media(&self) -> Result<Vec<MediaItem>, StoreError>;

    /// Every registered screen (for the configuration modal).
    async fn list_screens(&self) -> Result<Vec<Screen>, StoreError>;

    /// Look up one screen; `Ok(None)` when the id is unknown.
    async fn get_screen(&self, id: &str) -> Result<Option<Screen>, StoreError>;
}

/// The `{ "data": ... }` envelope every API response uses.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Content store over the server's REST API.
pub struct HttpContentStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContentStore {
    /// `base_url` is the server root, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn list_media(&self) -> Result<Vec<MediaItem>, StoreError> {
        self.get_json("/api/v1/media").await
    }

    async fn list_screens(&self) -> Result<Vec<Screen>, StoreError> {
        self.get_json("/api/v1/screens").await
    }

    async fn get_screen(&self, id: &str) -> Result<Option<Screen>, StoreError> {
        let url = format!("{}/api/v1/screens/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        // An unknown screen is a recognized answer, not a failure.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: Envelope<Screen> = response
            .error_for_status()?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(envelope.data))
    }
}
