//! Read models consumed from the content store.
//!
//! The display only reads the fields it renders and filters on; anything
//! else the server sends is ignored during deserialization.

use serde::Deserialize;

/// One uploaded image or video asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    /// MIME content type; discriminates image vs. video rendering.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Free-text folder tag.
    pub folder: String,
    /// Retrieval locator, relative to the server (e.g. `/uploads/x.png`).
    pub url: String,
}

/// A configured physical display endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Folder tag this screen shows; `None` or `all` means everything.
    #[serde(default)]
    pub assigned_folder: Option<String>,
}
