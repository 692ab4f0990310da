//! HTTP front-end: upload form, multipart upload handler, and a JSON variant
//! of the same flow for non-browser clients.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::detector::Detector;
use crate::error::AnalysisError;
use crate::pipeline;
use crate::upload::{allowed_file, sanitize_filename};
use crate::verdict::Verdict;

const MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024; // 100 MiB

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub detector: Arc<dyn Detector>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/api/analyze", post(api_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /upload - browser flow: save the file, run the pipeline, render the
/// result page. Errors come back as real status codes, not a 200 page.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let saved = save_upload(&state, &mut multipart)
        .await
        .map_err(|(status, msg)| (status, Html(error_page(&msg))))?;
    let verdict = run_pipeline(&state, saved)
        .await
        .map_err(|(status, msg)| (status, Html(error_page(&msg))))?;
    Ok(Html(result_page(&verdict.to_string())))
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// POST /api/analyze - same flow, JSON in/out for programmatic callers.
async fn api_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Verdict>, (StatusCode, Json<ErrorResponse>)> {
    let json_err = |(status, msg): (StatusCode, String)| (status, Json(ErrorResponse { error: msg }));
    let saved = save_upload(&state, &mut multipart).await.map_err(json_err)?;
    let verdict = run_pipeline(&state, saved).await.map_err(json_err)?;
    Ok(Json(verdict))
}

/// Pull the `file` field out of the multipart body and write it, sanitized,
/// into the upload directory. Nothing is written for a rejected extension.
async fn save_upload(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<PathBuf, (StatusCode, String)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("malformed multipart body: {}", e),
        )
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "no file selected".to_string()))?;

        if !allowed_file(&file_name) {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("unsupported video format: {}", file_name),
            ));
        }

        let safe_name = sanitize_filename(&file_name);
        if safe_name.is_empty() {
            return Err((StatusCode::BAD_REQUEST, "unusable file name".to_string()));
        }

        let data = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("failed to read upload: {}", e),
            )
        })?;

        // Last write wins for same-named uploads; files are never deleted.
        let dest = state.config.upload_dir.join(&safe_name);
        tokio::fs::write(&dest, &data).await.map_err(|e| {
            log::error!("[upload] failed to write {:?}: {}", dest, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to store upload".to_string(),
            )
        })?;
        log::info!("[upload] saved {} bytes to {:?}", data.len(), dest);
        return Ok(dest);
    }

    Err((
        StatusCode::BAD_REQUEST,
        "missing \"file\" field".to_string(),
    ))
}

/// Run the blocking sample/infer pipeline off the request thread.
async fn run_pipeline(state: &AppState, path: PathBuf) -> Result<Verdict, (StatusCode, String)> {
    let config = Arc::clone(&state.config);
    let detector = Arc::clone(&state.detector);
    let result =
        tokio::task::spawn_blocking(move || pipeline::analyze(&path, &config, detector.as_ref()))
            .await
            .map_err(|e| {
                log::error!("[upload] analysis task panicked: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "analysis task failed".to_string(),
                )
            })?;

    result.map_err(|e| {
        log::warn!("[upload] analysis failed: {}", e);
        (error_status(&e), e.to_string())
    })
}

fn error_status(e: &AnalysisError) -> StatusCode {
    match e {
        AnalysisError::NoFrames | AnalysisError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::ShapeMismatch(_) | AnalysisError::Inference(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Deepfake Video Check</title></head>
<body>
  <h1>Deepfake Video Check</h1>
  <p>Upload a video (.mp4, .avi, .mov) to classify it as real or fake.</p>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".mp4,.avi,.mov" required>
    <button type="submit">Analyze</button>
  </form>
</body>
</html>
"#;

fn result_page(result: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Analysis Result</title></head>
<body>
  <h1>Analysis Result</h1>
  <p>{}</p>
  <a href="/">Analyze another video</a>
</body>
</html>
"#,
        html_escape(result)
    )
}

fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Analysis Failed</title></head>
<body>
  <h1>Analysis Failed</h1>
  <p>{}</p>
  <a href="/">Back</a>
</body>
</html>
"#,
        html_escape(message)
    )
}
