//! Media item entity models.

use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;
use vitrina_core::types::{EntityId, Timestamp};

/// A row from the `media` table.
///
/// Serialized field names match the sync/REST wire protocol (`type`,
/// `size`, camelCase timestamps).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: EntityId,
    pub name: String,
    /// MIME content type; always `image/*` or `video/*` (enforced at
    /// upload).
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub content_type: String,
    /// File size in bytes.
    #[serde(rename = "size")]
    pub size_bytes: i64,
    /// Free-text folder tag.
    pub folder: String,
    /// Retrieval locator, e.g. `/uploads/<uuid>.png`.
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for inserting a media row after a validated upload.
#[derive(Debug, Clone, Validate)]
pub struct CreateMediaItem {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    #[validate(length(min = 1, max = 100))]
    pub folder: String,
    pub url: String,
}
