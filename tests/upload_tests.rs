//! Router-level tests with a fixed-probability detector and a scratch upload
//! directory. Paths that would invoke ffmpeg either reject the upload first
//! or fail analysis with a 422, so no fixture videos are required.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use veriframe::config::Config;
use veriframe::detector::FixedDetector;
use veriframe::server::{AppState, build_router};

const BOUNDARY: &str = "test-boundary";

fn test_app() -> (Router, PathBuf) {
    let upload_dir =
        std::env::temp_dir().join(format!("veriframe_test_{:016x}", rand::random::<u64>()));
    std::fs::create_dir_all(&upload_dir).unwrap();

    let config = Config {
        upload_dir: upload_dir.clone(),
        ..Config::default()
    };
    let state = AppState {
        config: Arc::new(config),
        detector: Arc::new(FixedDetector::new(0.7)),
    };
    (build_router(state), upload_dir)
}

fn multipart_request(uri: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn dir_entry_count(dir: &PathBuf) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn index_serves_upload_form() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("<form"));
    assert!(page.contains("multipart/form-data"));
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[tokio::test]
async fn disallowed_extension_writes_nothing() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(multipart_request("/upload", "file", "clip.mkv", b"not a video"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(dir_entry_count(&upload_dir), 0);
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(multipart_request("/upload", "other", "clip.mp4", b"data"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dir_entry_count(&upload_dir), 0);
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[tokio::test]
async fn undecodable_upload_is_saved_but_unprocessable() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(multipart_request("/upload", "file", "clip.mp4", b"garbage"))
        .await
        .unwrap();
    // Allowed extension is written to disk before analysis; analysis of
    // garbage bytes then fails as a client-data problem, not a 500.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(dir_entry_count(&upload_dir), 1);
    assert!(upload_dir.join("clip.mp4").exists());
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[tokio::test]
async fn api_analyze_rejects_disallowed_extension_with_json() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(multipart_request("/api/analyze", "file", "clip.webm", b"x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("unsupported"));
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[tokio::test]
async fn upload_sanitizes_client_filename() {
    let (app, upload_dir) = test_app();
    let response = app
        .oneshot(multipart_request(
            "/upload",
            "file",
            "my clip (1).mp4",
            b"garbage",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(upload_dir.join("my_clip__1_.mp4").exists());
    let _ = std::fs::remove_dir_all(upload_dir);
}
