use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrina_db::DbPool,
    /// Server configuration (CORS origins, uploads directory, timeouts).
    pub config: Arc<ServerConfig>,
    /// WebSocket relay peer registry. Mutation handlers broadcast sync
    /// notifications through it.
    pub ws_manager: Arc<WsManager>,
}
