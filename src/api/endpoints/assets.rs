//! Static front-end handlers.
//!
//! `GET /` serves the entry page, `GET /frontend/:asset` the few other
//! assets. Files are read from the configured front-end directory and
//! nowhere else.

use std::path::Path as FsPath;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::api::types::ApiContext;

/// `GET /` — the front-end entry point.
pub async fn index(State(ctx): State<ApiContext>) -> Response {
    serve_static(&ctx.config.frontend_dir, "index.html").await
}

/// `GET /frontend/:asset` — other static assets.
pub async fn asset(State(ctx): State<ApiContext>, Path(asset): Path<String>) -> Response {
    serve_static(&ctx.config.frontend_dir, &asset).await
}

/// Serve one file from the front-end directory with the right MIME type.
async fn serve_static(dir: &FsPath, path: &str) -> Response {
    // Sanitize path — prevent directory traversal
    let clean_path = path.replace("..", "").trim_start_matches('/').to_string();
    let file_path = dir.join(&clean_path);

    // Ensure the resolved path is still within the front-end directory
    match file_path.canonicalize() {
        Ok(canonical) => {
            let dir_canonical = dir.canonicalize().unwrap_or_default();
            if !canonical.starts_with(&dir_canonical) {
                return (StatusCode::FORBIDDEN, "Path traversal denied").into_response();
            }
        }
        Err(_) => {
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    }

    if !file_path.is_file() {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    match tokio::fs::read(&file_path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&file_path)
                .first_or_octet_stream()
                .to_string();

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime)
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::CONTENT_LENGTH, bytes.len().to_string())
                .body(axum::body::Body::from(bytes))
                .unwrap_or_else(|_| {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Response build failed").into_response()
                })
        }
        Err(_) => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}
