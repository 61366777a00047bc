//! Route definitions for screen management.
//!
//! Mounted at `/screens`.
//!
//! ```text
//! GET    /                 list_screens
//! POST   /                 create_screen
//! GET    /{id}             get_screen
//! PUT    /{id}             update_screen
//! DELETE /{id}             delete_screen
//! POST   /{id}/commands    send_command
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::screens;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(screens::list_screens).post(screens::create_screen))
        .route(
            "/{id}",
            get(screens::get_screen)
                .put(screens::update_screen)
                .delete(screens::delete_screen),
        )
        .route("/{id}/commands", post(screens::send_command))
}
