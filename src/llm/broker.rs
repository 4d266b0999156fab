use crate::error::ProviderError;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::Turn;
use crate::llm::provider::Provider;
use std::sync::Arc;
use tracing::{debug, info};

/// A gateway bound to one provider, model and sampling configuration.
///
/// This is what the session talks to: it knows nothing about HTTP and only
/// turns a system prompt plus one user message into reply text.
pub struct LlmBroker {
    provider: Provider,
    model: String,
    gateway: Arc<dyn LlmGateway>,
    config: CompletionConfig,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(provider: Provider, model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            provider,
            model: model.into(),
            gateway,
            config: CompletionConfig::default(),
        }
    }

    /// Replace the completion configuration (default: temperature 0.7)
    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a reply for a single turn.
    ///
    /// Only the system prompt and `user_message` are sent; no earlier
    /// exchange is included.
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let turn = Turn::new(system_prompt, user_message);
        info!(provider = %self.provider, model = %self.model, "Generating reply");

        let reply = self.gateway.complete(&self.model, &turn.messages(), &self.config).await?;

        debug!(provider = %self.provider, chars = reply.len(), "Reply received");
        Ok(reply)
    }
}
