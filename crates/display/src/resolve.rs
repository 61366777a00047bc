//! Deterministic content resolution.
//!
//! Given the configured screen id: look up the screen, read its assigned
//! folder (no assignment or the `all` sentinel means no filter), fetch
//! all media, and keep the items the assignment selects, in stable store
//! order. A screen id the store no longer knows resolves unfiltered --
//! same as no assignment -- and a folder nothing carries resolves to
//! zero items.

use vitrina_core::folder;

use crate::models::MediaItem;
use crate::store::{ContentStore, StoreError};

/// Filter a media listing by a folder assignment, preserving order.
pub fn filter_playlist(media: Vec<MediaItem>, assigned: Option<&str>) -> Vec<MediaItem> {
    media
        .into_iter()
        .filter(|item| folder::matches(&item.folder, assigned))
        .collect()
}

/// Resolve the playlist for a screen by re-reading the store.
pub async fn resolve_content<S: ContentStore + ?Sized>(
    store: &S,
    screen_id: &str,
) -> Result<Vec<MediaItem>, StoreError> {
    let screen = store.get_screen(screen_id).await?;
    let assigned = screen.as_ref().and_then(|s| s.assigned_folder.as_deref());
    let media = store.list_media().await?;
    Ok(filter_playlist(media, assigned))
}
