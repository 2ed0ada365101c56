//! Clinical coding endpoint.
//!
//! `POST /code` — run the scheme-specific coding prompt over free-text
//! clinical notes.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::coding::{self, CodingScheme};

#[derive(Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct CodeResponse {
    pub result: String,
}

pub async fn code(
    State(ctx): State<ApiContext>,
    Json(req): Json<CodeRequest>,
) -> Result<Json<CodeResponse>, ApiError> {
    let scheme: CodingScheme = req
        .scheme
        .parse()
        .map_err(|_| ApiError::BadRequest("Paramètre 'scheme' invalide (cim10|ccam|ghm)".into()))?;
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Paramètre 'text' vide".into()));
    }

    let llm = match &ctx.llm {
        Some(llm) => llm,
        None => {
            return Ok(Json(CodeResponse {
                result: coding::degraded_suggestion(scheme),
            }))
        }
    };

    let result = coding::suggest_codes(llm.as_ref(), scheme, &req.text).await?;
    Ok(Json(CodeResponse { result }))
}
