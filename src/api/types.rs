//! Shared handler state.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::{LlmProvider, MistralClient};

/// Shared context for all handlers.
///
/// `llm` is `None` when no API key is configured; the handlers then
/// answer from their degraded local fallbacks instead of calling out.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub llm: Option<Arc<dyn LlmProvider>>,
}

impl ApiContext {
    /// Build the production context; the provider is wired from the key.
    pub fn new(config: AppConfig) -> Self {
        let llm = config
            .api_key
            .as_deref()
            .map(|key| Arc::new(MistralClient::hosted(key)) as Arc<dyn LlmProvider>);
        Self {
            config: Arc::new(config),
            llm,
        }
    }

    /// Context with an explicit provider. Used by tests to inject a mock.
    pub fn with_provider(config: AppConfig, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            config: Arc::new(config),
            llm: Some(llm),
        }
    }
}
