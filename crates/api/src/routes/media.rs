//! Route definitions for media management.
//!
//! Mounted at `/media`.
//!
//! ```text
//! GET    /          list_media
//! POST   /          upload_media (multipart)
//! DELETE /{id}      delete_media
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get};
use axum::Router;
use vitrina_core::media::MAX_VIDEO_BYTES;

use crate::handlers::media;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::upload_media))
        .route("/{id}", delete(media::delete_media))
        // The multipart body must fit the largest accepted upload plus
        // form overhead; the per-kind ceilings are enforced afterwards.
        .layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES as usize + 64 * 1024))
}
