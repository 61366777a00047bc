//! Integration tests for the content-store repositories.
//!
//! Exercises media and screen CRUD against a real database:
//! - insertion order stability for listings
//! - duplicate screen names rejected
//! - three-valued assigned-folder updates

use sqlx::PgPool;
use vitrina_db::models::media::CreateMediaItem;
use vitrina_db::models::screen::{CreateScreen, UpdateScreen};
use vitrina_db::repositories::{MediaRepo, ScreenRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_media(name: &str, folder: &str) -> CreateMediaItem {
    CreateMediaItem {
        name: name.to_string(),
        content_type: "image/png".to_string(),
        size_bytes: 1024,
        folder: folder.to_string(),
        url: format!("/uploads/{name}"),
    }
}

fn new_screen(name: &str, folder: Option<&str>) -> CreateScreen {
    CreateScreen {
        name: name.to_string(),
        location: Some("Lobby".to_string()),
        resolution: None,
        orientation: None,
        assigned_folder: folder.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn media_create_and_list_in_insertion_order(pool: PgPool) {
    let a = MediaRepo::create(&pool, &new_media("a.png", "promociones"))
        .await
        .unwrap();
    let b = MediaRepo::create(&pool, &new_media("b.png", "eventos"))
        .await
        .unwrap();

    let all = MediaRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, a.id);
    assert_eq!(all[1].id, b.id);
    assert_eq!(all[0].content_type, "image/png");
}

#[sqlx::test(migrations = "./migrations")]
async fn media_delete_returns_row_for_cleanup(pool: PgPool) {
    let item = MediaRepo::create(&pool, &new_media("a.png", "general"))
        .await
        .unwrap();

    let deleted = MediaRepo::delete(&pool, &item.id).await.unwrap();
    assert_eq!(deleted.map(|m| m.url), Some(item.url));

    // Second delete finds nothing.
    assert!(MediaRepo::delete(&pool, &item.id).await.unwrap().is_none());
    assert!(MediaRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn screen_create_applies_defaults(pool: PgPool) {
    let screen = ScreenRepo::create(&pool, &new_screen("Entrada", None))
        .await
        .unwrap();

    assert_eq!(screen.resolution, "1920x1080");
    assert_eq!(screen.orientation, "landscape");
    assert_eq!(screen.status, "offline");
    assert_eq!(screen.assigned_folder, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_screen_name_rejected(pool: PgPool) {
    ScreenRepo::create(&pool, &new_screen("Entrada", None))
        .await
        .unwrap();

    let result = ScreenRepo::create(&pool, &new_screen("Entrada", None)).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.constraint(), Some("uq_screens_name"));
        }
        other => panic!("Expected unique violation, got: {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn screen_update_is_partial(pool: PgPool) {
    let screen = ScreenRepo::create(&pool, &new_screen("Entrada", Some("promociones")))
        .await
        .unwrap();

    let updated = ScreenRepo::update(
        &pool,
        &screen.id,
        &UpdateScreen {
            status: Some("online".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("screen exists");

    assert_eq!(updated.status, "online");
    // Untouched fields keep their values.
    assert_eq!(updated.name, "Entrada");
    assert_eq!(updated.assigned_folder, Some("promociones".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn assigned_folder_update_is_three_valued(pool: PgPool) {
    let screen = ScreenRepo::create(&pool, &new_screen("Entrada", Some("promociones")))
        .await
        .unwrap();

    // Absent: assignment untouched.
    let kept = ScreenRepo::update(&pool, &screen.id, &UpdateScreen::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.assigned_folder, Some("promociones".to_string()));

    // Set: assignment replaced.
    let replaced = ScreenRepo::update(
        &pool,
        &screen.id,
        &UpdateScreen {
            assigned_folder: Some(Some("eventos".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(replaced.assigned_folder, Some("eventos".to_string()));

    // Explicit null: assignment cleared.
    let cleared = ScreenRepo::update(
        &pool,
        &screen.id,
        &UpdateScreen {
            assigned_folder: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.assigned_folder, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_unknown_screen_returns_none(pool: PgPool) {
    let result = ScreenRepo::update(&pool, "no-such-id", &UpdateScreen::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_screen(pool: PgPool) {
    let screen = ScreenRepo::create(&pool, &new_screen("Entrada", None))
        .await
        .unwrap();

    assert!(ScreenRepo::delete(&pool, &screen.id).await.unwrap());
    assert!(!ScreenRepo::delete(&pool, &screen.id).await.unwrap());
    assert!(ScreenRepo::find_by_id(&pool, &screen.id)
        .await
        .unwrap()
        .is_none());
}
