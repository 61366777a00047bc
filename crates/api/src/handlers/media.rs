//! Handlers for media upload, listing, and deletion.
//!
//! Uploads are gated before anything touches the store: the content type
//! must be `image/*` or `video/*` and the size must fit the per-kind
//! ceiling. Accepted files land in the uploads directory under a UUID
//! name and are served back via `/uploads`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vitrina_core::{folder, media as media_rules, CoreError};
use vitrina_db::models::media::{CreateMediaItem, MediaItem};
use vitrina_db::repositories::MediaRepo;
use vitrina_sync::SyncMessage;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/media -- list every media item in stable store order.
pub async fn list_media(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<MediaItem>>>> {
    let items = MediaRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/media -- multipart upload.
///
/// Accepts a required `file` field and an optional `folder` field
/// (defaults to `general`). Broadcasts `media_updated` on success.
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MediaItem>>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut folder_tag: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((filename, content_type, data.to_vec()));
            }
            "folder" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                folder_tag = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    // Gate on type and size before any store write.
    media_rules::validate_upload(&content_type, data.len() as i64)?;

    let folder_tag = folder_tag
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| folder::FOLDER_DEFAULT.to_string());

    // Store the file under a UUID name, keeping the original extension.
    let ext = filename.rsplit('.').next().unwrap_or("bin").to_lowercase();
    let stored_filename = format!("{}.{ext}", uuid::Uuid::new_v4());
    tokio::fs::create_dir_all(&state.config.uploads_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let file_path = state.config.uploads_dir.join(&stored_filename);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let input = CreateMediaItem {
        name: filename,
        content_type,
        size_bytes: data.len() as i64,
        folder: folder_tag,
        url: format!("/uploads/{stored_filename}"),
    };
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let item = MediaRepo::create(&state.pool, &input).await?;
    tracing::info!(id = %item.id, folder = %item.folder, size = item.size_bytes, "Media uploaded");

    state
        .ws_manager
        .broadcast_sync(&SyncMessage::media_updated(
            serde_json::to_value(&item).unwrap_or_default(),
        ))
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /api/v1/media/{id} -- remove the row and its stored file.
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let Some(item) = MediaRepo::delete(&state.pool, &id).await? else {
        return Err(CoreError::NotFound {
            entity: "media",
            id,
        }
        .into());
    };

    // Best-effort file cleanup: a missing file is not worth failing the
    // request over once the row is gone.
    if let Some(filename) = item.url.strip_prefix("/uploads/") {
        let path = state.config.uploads_dir.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove media file");
        }
    }

    state
        .ws_manager
        .broadcast_sync(&SyncMessage::media_updated(
            serde_json::json!({ "id": item.id, "deleted": true }),
        ))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
