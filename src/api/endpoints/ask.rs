//! Interview question endpoint.
//!
//! `GET|POST /ask` — generate one question, avoiding the questions the
//! client reports as already asked. A model outage must not stop an
//! interview in progress, so transport-level failures degrade to a fixed
//! rescue question with a warning instead of an error status.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::interview;
use crate::llm::LlmError;

#[derive(Deserialize, Default)]
pub struct AskRequest {
    #[serde(default)]
    pub previous_questions: Vec<String>,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// The body is optional (GET has none) and lenient: anything that does
/// not parse counts as an empty history.
pub async fn ask(
    State(ctx): State<ApiContext>,
    body: Option<Json<AskRequest>>,
) -> Result<Json<AskResponse>, ApiError> {
    let previous = body
        .map(|Json(req)| req.previous_questions)
        .unwrap_or_default();

    let llm = match &ctx.llm {
        Some(llm) => llm,
        None => {
            return Ok(Json(AskResponse {
                question: interview::degraded_question(&previous),
                warning: None,
            }))
        }
    };

    match interview::generate_question(
        llm.as_ref(),
        ctx.config.interview_prompt.as_deref(),
        &previous,
    )
    .await
    {
        Ok(question) => Ok(Json(AskResponse {
            question,
            warning: None,
        })),
        Err(err @ (LlmError::Api { .. } | LlmError::Timeout { .. })) => Err(err.into()),
        Err(err) => {
            tracing::warn!(error = %err, "Question generation failed, serving rescue question");
            Ok(Json(AskResponse {
                question: interview::RESCUE_QUESTION.to_string(),
                warning: Some(err.to_string()),
            }))
        }
    }
}
