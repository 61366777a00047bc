//! Screen entity models.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitrina_core::types::{EntityId, Timestamp};
use vitrina_core::CoreError;

/// Recognized screen orientations.
pub const ORIENTATIONS: &[&str] = &["landscape", "portrait"];

/// Recognized screen statuses.
pub const STATUSES: &[&str] = &["online", "offline", "maintenance"];

/// A row from the `screens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: EntityId,
    pub name: String,
    pub location: String,
    /// Display resolution as a free string, e.g. `1920x1080`.
    pub resolution: String,
    /// `landscape` or `portrait`.
    pub orientation: String,
    /// `online`, `offline`, or `maintenance`.
    pub status: String,
    /// Folder tag this screen shows; `None` or `all` means everything.
    pub assigned_folder: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for registering a new screen.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScreen {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub assigned_folder: Option<String>,
}

/// Partial update for an existing screen. Absent fields keep their
/// current value; `assignedFolder` uses a double Option so "clear the
/// assignment" (explicit null) is distinct from "leave it alone".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScreen {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub location: Option<String>,
    pub resolution: Option<String>,
    pub orientation: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_folder: Option<Option<String>>,
}

/// Deserialize a present-but-possibly-null field as `Some(inner)`.
///
/// With `#[serde(default)]` this gives the three-way distinction: field
/// absent -> `None`, field null -> `Some(None)`, field set ->
/// `Some(Some(value))`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Validate that the given value is a recognized orientation.
pub fn validate_orientation(value: &str) -> Result<(), CoreError> {
    if ORIENTATIONS.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown orientation '{}'. Valid orientations: {}",
            value,
            ORIENTATIONS.join(", ")
        )))
    }
}

/// Validate that the given value is a recognized screen status.
pub fn validate_status(value: &str) -> Result<(), CoreError> {
    if STATUSES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown status '{}'. Valid statuses: {}",
            value,
            STATUSES.join(", ")
        )))
    }
}
