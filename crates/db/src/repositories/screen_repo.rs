//! Repository for the `screens` table.

use sqlx::PgPool;

use crate::models::screen::{CreateScreen, Screen, UpdateScreen};

/// Column list for `screens` queries.
const SCREEN_COLUMNS: &str = "\
    id, name, location, resolution, orientation, status, \
    assigned_folder, created_at, updated_at";

/// CRUD operations for screens.
pub struct ScreenRepo;

impl ScreenRepo {
    /// Register a new screen with a fresh UUID id.
    ///
    /// Column defaults fill anything the input leaves unset; a duplicate
    /// name surfaces as a unique violation on `uq_screens_name`.
    pub async fn create(pool: &PgPool, input: &CreateScreen) -> Result<Screen, sqlx::Error> {
        let id = uuid::Uuid::new_v4().to_string();

        let query = format!(
            "INSERT INTO screens (id, name, location, resolution, orientation, assigned_folder) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, '1920x1080'), \
                     COALESCE($5, 'landscape'), $6) \
             RETURNING {SCREEN_COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(&id)
            .bind(&input.name)
            .bind(input.location.as_deref())
            .bind(input.resolution.as_deref())
            .bind(input.orientation.as_deref())
            .bind(input.assigned_folder.as_deref())
            .fetch_one(pool)
            .await
    }

    /// List every screen in stable insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Screen>, sqlx::Error> {
        let query = format!("SELECT {SCREEN_COLUMNS} FROM screens ORDER BY created_at, id");
        sqlx::query_as::<_, Screen>(&query).fetch_all(pool).await
    }

    /// Find a screen by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {SCREEN_COLUMNS} FROM screens WHERE id = $1");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update, returning the updated row or `None` when
    /// no such id exists.
    ///
    /// `assigned_folder` is three-valued: absent keeps the current
    /// assignment, explicit null clears it, a value replaces it.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateScreen,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!(
            "UPDATE screens SET \
                name = COALESCE($2, name), \
                location = COALESCE($3, location), \
                resolution = COALESCE($4, resolution), \
                orientation = COALESCE($5, orientation), \
                status = COALESCE($6, status), \
                assigned_folder = CASE WHEN $7 THEN $8 ELSE assigned_folder END, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {SCREEN_COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.location.as_deref())
            .bind(input.resolution.as_deref())
            .bind(input.orientation.as_deref())
            .bind(input.status.as_deref())
            .bind(input.assigned_folder.is_some())
            .bind(input.assigned_folder.as_ref().and_then(|f| f.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a screen. Returns `true` when a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM screens WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
