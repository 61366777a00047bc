pub mod health;
pub mod media;
pub mod screens;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                         WebSocket broadcast relay
/// /media                      list / upload / delete
/// /screens                    CRUD + command dispatch
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/media", media::router())
        .nest("/screens", screens::router())
}
