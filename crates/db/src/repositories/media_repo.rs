//! Repository for the `media` table.

use sqlx::PgPool;

use crate::models::media::{CreateMediaItem, MediaItem};

/// Column list for `media` queries.
const MEDIA_COLUMNS: &str = "\
    id, name, type, size_bytes, folder, url, \
    created_at, updated_at";

/// CRUD operations for media items.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert a new media row with a fresh UUID id.
    pub async fn create(pool: &PgPool, input: &CreateMediaItem) -> Result<MediaItem, sqlx::Error> {
        let id = uuid::Uuid::new_v4().to_string();

        let query = format!(
            "INSERT INTO media (id, name, type, size_bytes, folder, url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MEDIA_COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(&id)
            .bind(&input.name)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(&input.folder)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    /// List every media item in stable insertion order.
    ///
    /// Display clients rotate through this order, so it must not depend
    /// on anything mutable.
    pub async fn list(pool: &PgPool) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {MEDIA_COLUMNS} FROM media ORDER BY created_at, id");
        sqlx::query_as::<_, MediaItem>(&query).fetch_all(pool).await
    }

    /// Find a media item by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {MEDIA_COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a media item, returning the deleted row (for file cleanup)
    /// or `None` when no such id exists.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("DELETE FROM media WHERE id = $1 RETURNING {MEDIA_COLUMNS}");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
