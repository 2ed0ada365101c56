//! Chat-completion provider abstraction.
//!
//! `MistralClient` is the production implementation. `MockLlm` stands in
//! during tests so nothing touches the network.

mod mistral;

pub use mistral::MistralClient;

use std::time::Duration;

use async_trait::async_trait;

/// Errors from the chat-completion provider.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Cannot reach the model endpoint: {0}")]
    Connection(String),

    #[error("Model request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Model endpoint returned error (status {status})")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Malformed model response: {0}")]
    ResponseParsing(String),
}

/// One chat-completion call: a system role, a user message and the
/// sampling envelope. Each caller picks its own temperature and deadline.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Object-safe seam over the remote model.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one chat request and return the raw assistant text, trimmed.
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Mock provider for tests — returns a canned reply or a forced error.
pub struct MockLlm {
    behavior: MockBehavior,
}

enum MockBehavior {
    Reply(String),
    Status(u16),
    Timeout,
    Unreachable,
}

impl MockLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            behavior: MockBehavior::Reply(text.to_string()),
        }
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self {
            behavior: MockBehavior::Status(status),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            behavior: MockBehavior::Timeout,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            behavior: MockBehavior::Unreachable,
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        match &self.behavior {
            MockBehavior::Reply(text) => Ok(text.clone()),
            MockBehavior::Status(status) => Err(LlmError::Api {
                status: *status,
                body: String::new(),
            }),
            MockBehavior::Timeout => Err(LlmError::Timeout {
                secs: request.timeout.as_secs(),
            }),
            MockBehavior::Unreachable => {
                Err(LlmError::Connection("connection refused".into()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest {
            system: "system".into(),
            user: "user".into(),
            temperature: 0.5,
            top_p: 0.9,
            max_tokens: 64,
            timeout: Duration::from_secs(15),
        }
    }

    #[tokio::test]
    async fn mock_returns_configured_reply() {
        let llm = MockLlm::replying("Une question ?");
        let reply = llm.chat(&request()).await.unwrap();
        assert_eq!(reply, "Une question ?");
    }

    #[tokio::test]
    async fn mock_surfaces_api_status() {
        let llm = MockLlm::failing_with_status(429);
        match llm.chat(&request()).await {
            Err(LlmError::Api { status, .. }) => assert_eq!(status, 429),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn mock_timeout_carries_deadline() {
        let llm = MockLlm::timing_out();
        match llm.chat(&request()).await {
            Err(LlmError::Timeout { secs }) => assert_eq!(secs, 15),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }
}
