//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::llm::LlmError;
use crate::pdf::PdfError;
use crate::transcript::TranscriptError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Upstream model returned HTTP {0}")]
    UpstreamStatus(u16),
    #[error("Upstream model unreachable: {0}")]
    UpstreamUnreachable(String),
    #[error("Upstream model timed out after {0}s")]
    UpstreamTimeout(u64),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::UpstreamStatus(upstream) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("HTTP {upstream} depuis Mistral"),
            ),
            ApiError::UpstreamUnreachable(detail) => {
                tracing::error!(detail, "Upstream model unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNREACHABLE",
                    "Le modèle est injoignable".to_string(),
                )
            }
            ApiError::UpstreamTimeout(secs) => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                format!("Le modèle n'a pas répondu en {secs}s"),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Une erreur interne est survenue".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, body } => {
                // The upstream body is for the logs, never for the client.
                tracing::error!(status, body, "Upstream model error");
                ApiError::UpstreamStatus(status)
            }
            LlmError::Timeout { secs } => ApiError::UpstreamTimeout(secs),
            LlmError::Connection(detail) | LlmError::Http(detail) => {
                ApiError::UpstreamUnreachable(detail)
            }
            LlmError::ResponseParsing(detail) => ApiError::UpstreamUnreachable(detail),
        }
    }
}

impl From<TranscriptError> for ApiError {
    fn from(err: TranscriptError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<PdfError> for ApiError {
    fn from(err: PdfError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn bad_request_returns_400() {
        let response = ApiError::BadRequest("Paramètre 'text' vide".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "Paramètre 'text' vide");
    }

    #[tokio::test]
    async fn upstream_status_returns_502() {
        let response = ApiError::UpstreamStatus(429).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(json["error"]["message"], "HTTP 429 depuis Mistral");
    }

    #[tokio::test]
    async fn upstream_timeout_returns_504() {
        let response = ApiError::UpstreamTimeout(20).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UPSTREAM_TIMEOUT");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("disk exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "INTERNAL");
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("disk exploded"));
    }

    #[tokio::test]
    async fn llm_api_error_maps_to_502() {
        let api_err: ApiError = LlmError::Api {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert_eq!(api_err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn llm_timeout_maps_to_504() {
        let api_err: ApiError = LlmError::Timeout { secs: 15 }.into();
        assert_eq!(api_err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn upstream_body_never_reaches_client() {
        let api_err: ApiError = LlmError::Api {
            status: 500,
            body: "secret internal trace".into(),
        }
        .into();
        let response = api_err.into_response();
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("secret internal trace"));
    }
}
