//! Integration tests for the media API: the upload gate and listing.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "vitrina-test-boundary";

/// Build a multipart body with one `file` field and an optional `folder`
/// field.
fn multipart_body(
    filename: &str,
    content_type: &str,
    payload: &[u8],
    folder: Option<&str>,
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(b"\r\n");
    if let Some(folder) = folder {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"folder\"\r\n\r\n\
                 {folder}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    pool: &PgPool,
    filename: &str,
    content_type: &str,
    payload: &[u8],
    folder: Option<&str>,
) -> axum::http::Response<Body> {
    let app = common::build_test_app(pool.clone());
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/media")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(
                filename,
                content_type,
                payload,
                folder,
            )))
            .unwrap(),
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Upload gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn image_upload_accepted(pool: PgPool) {
    let response = upload(&pool, "promo.png", "image/png", b"fake png bytes", Some("promociones")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "promo.png");
    assert_eq!(json["data"]["type"], "image/png");
    assert_eq!(json["data"]["folder"], "promociones");
    assert_eq!(json["data"]["size"], 14);
    let url = json["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"), "url was {url}");
    assert!(url.ends_with(".png"), "url was {url}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_without_folder_defaults_to_general(pool: PgPool) {
    let response = upload(&pool, "clip.mp4", "video/mp4", b"fake video", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["folder"], "general");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_content_type_rejected(pool: PgPool) {
    let response = upload(&pool, "doc.pdf", "application/pdf", b"%PDF-1.4", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Nothing reached the store.
    let app = common::build_test_app(pool.clone());
    let list = body_json(get(app, "/api/v1/media").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_image_rejected(pool: PgPool) {
    // One byte over the 10 MB image ceiling.
    let payload = vec![0u8; 10 * 1024 * 1024 + 1];
    let response = upload(&pool, "huge.png", "image/png", &payload, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_file_field_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = format!("--{BOUNDARY}--\r\n");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/media")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_preserves_upload_order(pool: PgPool) {
    upload(&pool, "a.png", "image/png", b"a", Some("promociones")).await;
    upload(&pool, "b.mp4", "video/mp4", b"b", Some("eventos")).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/media").await).await;
    let items = json["data"].as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "a.png");
    assert_eq!(items[1]["name"], "b.mp4");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_media_removes_row(pool: PgPool) {
    let created = body_json(upload(&pool, "a.png", "image/png", b"a", None).await).await;
    let id = created["data"]["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/media/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app, "/api/v1/media").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unknown_media_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/media/ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
