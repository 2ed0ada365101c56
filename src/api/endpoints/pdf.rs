//! Transcript PDF download.
//!
//! `GET /pdf` — render the whole transcript into a one-font PDF and
//! stream it back as an attachment. Nothing is written to disk.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::{pdf, transcript};

const PDF_FILENAME: &str = "questions_reponses.pdf";
const PDF_TITLE: &str = "Questions / Réponses";

pub async fn download(State(ctx): State<ApiContext>) -> Result<Response, ApiError> {
    let body = transcript::read_all(&ctx.config.transcript_path())?;
    let subtitle = format!(
        "Généré le {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let bytes = pdf::render_document(PDF_TITLE, &subtitle, &body)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{PDF_FILENAME}\""),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .body(axum::body::Body::from(bytes))
        .map_err(|e| ApiError::Internal(format!("Response build failed: {e}")))
}
