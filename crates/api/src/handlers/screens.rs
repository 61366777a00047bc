//! Handlers for screen CRUD and display command dispatch.
//!
//! Every successful mutation broadcasts `screen_updated` so all display
//! clients re-resolve their content; the command endpoint broadcasts a
//! targeted `display_command` that only the addressed display acts on.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vitrina_core::CoreError;
use vitrina_db::models::screen::{
    validate_orientation, validate_status, CreateScreen, Screen, UpdateScreen,
};
use vitrina_db::repositories::ScreenRepo;
use vitrina_sync::{MessageKind, SyncMessage};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/screens -- list every screen in stable store order.
pub async fn list_screens(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Screen>>>> {
    let screens = ScreenRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: screens }))
}

/// GET /api/v1/screens/{id}
pub async fn get_screen(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Screen>>> {
    let screen = ScreenRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "screen",
            id,
        })?;
    Ok(Json(DataResponse { data: screen }))
}

/// POST /api/v1/screens -- register a new screen.
///
/// A duplicate name surfaces as 409 via the unique constraint.
pub async fn create_screen(
    State(state): State<AppState>,
    Json(input): Json<CreateScreen>,
) -> AppResult<(StatusCode, Json<DataResponse<Screen>>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    if let Some(orientation) = input.orientation.as_deref() {
        validate_orientation(orientation)?;
    }

    let screen = ScreenRepo::create(&state.pool, &input).await?;
    tracing::info!(id = %screen.id, name = %screen.name, "Screen registered");

    broadcast_screen_updated(&state, &screen).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: screen })))
}

/// PUT /api/v1/screens/{id} -- partial update.
pub async fn update_screen(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateScreen>,
) -> AppResult<Json<DataResponse<Screen>>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    if let Some(orientation) = input.orientation.as_deref() {
        validate_orientation(orientation)?;
    }
    if let Some(status) = input.status.as_deref() {
        validate_status(status)?;
    }

    let screen = ScreenRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "screen",
            id,
        })?;
    tracing::info!(id = %screen.id, folder = ?screen.assigned_folder, "Screen updated");

    broadcast_screen_updated(&state, &screen).await;
    Ok(Json(DataResponse { data: screen }))
}

/// DELETE /api/v1/screens/{id}
pub async fn delete_screen(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !ScreenRepo::delete(&state.pool, &id).await? {
        return Err(CoreError::NotFound {
            entity: "screen",
            id,
        }
        .into());
    }

    state
        .ws_manager
        .broadcast_sync(&SyncMessage::screen_updated(
            serde_json::json!({ "id": id, "deleted": true }),
        ))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Request body for dispatching a display command.
#[derive(Debug, Deserialize)]
pub struct DispatchCommand {
    /// Command name, relayed verbatim -- filtering unknown names is the
    /// display's job, which keeps old servers compatible with new
    /// clients.
    pub command: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// POST /api/v1/screens/{id}/commands -- address a command to one display.
pub async fn send_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<DispatchCommand>,
) -> AppResult<StatusCode> {
    // The screen must exist; the command itself is opaque.
    ScreenRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "screen",
            id: id.clone(),
        })?;

    let mut data = serde_json::json!({
        "screenId": id,
        "command": input.command,
        "timestamp": chrono::Utc::now().timestamp_millis(),
    });
    if let Some(params) = input.params {
        data["params"] = params;
    }

    tracing::info!(screen_id = %id, command = %input.command, "Dispatching display command");
    state
        .ws_manager
        .broadcast_sync(&SyncMessage::new(MessageKind::DisplayCommand, data))
        .await;

    Ok(StatusCode::ACCEPTED)
}

async fn broadcast_screen_updated(state: &AppState, screen: &Screen) {
    state
        .ws_manager
        .broadcast_sync(&SyncMessage::screen_updated(
            serde_json::to_value(screen).unwrap_or_default(),
        ))
        .await;
}
