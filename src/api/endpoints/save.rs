//! Transcript save endpoint.
//!
//! `POST /save` — append the captured question/answer pairs as one
//! session block.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::transcript::{self, QaPair};

#[derive(Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub pairs: Vec<QaPair>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
}

pub async fn save(
    State(ctx): State<ApiContext>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    // Client timestamp wins so the block matches what the user saw.
    let timestamp = req
        .timestamp
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    transcript::append_session(&ctx.config.transcript_path(), &req.pairs, timestamp.trim())?;
    tracing::info!(pairs = req.pairs.len(), "Session appended to transcript");

    Ok(Json(SaveResponse { status: "ok" }))
}
