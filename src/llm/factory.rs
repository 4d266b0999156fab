//! Construction of provider adapters.

use crate::config::Settings;
use crate::error::{ChatError, Result};
use crate::llm::broker::LlmBroker;
use crate::llm::gateway::LlmGateway;
use crate::llm::gateways::{GeminiConfig, GeminiGateway, OpenAIConfig, OpenAIGateway};
use crate::llm::provider::Provider;
use std::sync::Arc;
use tracing::debug;

/// Builds a fresh [`LlmBroker`] for a provider.
///
/// The session calls this at startup and on every provider switch.
pub trait BrokerFactory: Send + Sync {
    fn build(&self, provider: Provider) -> Result<LlmBroker>;
}

/// Factory backed by the real HTTP gateways.
pub struct GatewayBrokerFactory {
    settings: Settings,
}

impl GatewayBrokerFactory {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl BrokerFactory for GatewayBrokerFactory {
    fn build(&self, provider: Provider) -> Result<LlmBroker> {
        let api_key = self
            .settings
            .credentials
            .api_key(provider)
            .ok_or_else(|| {
                ChatError::ProviderSelection(format!(
                    "{} is not configured (set {})",
                    provider,
                    provider.api_key_env_vars()[0]
                ))
            })?
            .to_string();
        let base_url = self.settings.base_url(provider).to_string();
        let timeout = self.settings.timeout;

        debug!(provider = %provider, base_url = %base_url, "Building provider adapter");

        let gateway: Arc<dyn LlmGateway> = match provider {
            Provider::OpenAI => Arc::new(OpenAIGateway::with_config(OpenAIConfig {
                api_key,
                base_url,
                timeout,
            })?),
            Provider::Gemini => Arc::new(GeminiGateway::with_config(GeminiConfig {
                api_key,
                base_url,
                timeout,
            })?),
        };

        Ok(LlmBroker::new(provider, provider.default_model(), gateway)
            .with_config(self.settings.completion_config()))
    }
}
