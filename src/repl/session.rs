//! Process-lifetime chat state.

use crate::config::{missing_credentials, Settings, SYSTEM_PROMPT};
use crate::error::{ChatError, ProviderError, Result};
use crate::llm::broker::LlmBroker;
use crate::llm::factory::{BrokerFactory, GatewayBrokerFactory};
use crate::llm::provider::Provider;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Result of a successful `provider <name>` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched(Provider),
    AlreadyActive(Provider),
}

/// The active provider, the providers that may be switched to, and the
/// adapter used for chat turns.
///
/// The current provider is the adapter's provider, so the two cannot drift
/// apart. It is always one of the available providers: the adapter is only
/// replaced by [`Session::switch_provider`], after validation.
pub struct Session {
    available: BTreeSet<Provider>,
    system_prompt: String,
    broker: LlmBroker,
    factory: Arc<dyn BrokerFactory>,
}

impl Session {
    /// Start a session over `available` providers.
    ///
    /// The highest-priority available provider becomes current. Fails with
    /// [`ChatError::MissingCredentials`] when nothing is available.
    pub fn start(available: BTreeSet<Provider>, factory: Arc<dyn BrokerFactory>) -> Result<Self> {
        let current = available.iter().next().copied().ok_or_else(missing_credentials)?;
        let broker = factory.build(current)?;

        info!(provider = %current, available = available.len(), "Session started");

        Ok(Self {
            available,
            system_prompt: SYSTEM_PROMPT.to_string(),
            broker,
            factory,
        })
    }

    /// Start a session backed by the real HTTP gateways.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let available = settings.credentials.available();
        Self::start(available, Arc::new(GatewayBrokerFactory::new(settings)))
    }

    pub fn current_provider(&self) -> Provider {
        self.broker.provider()
    }

    pub fn available_providers(&self) -> &BTreeSet<Provider> {
        &self.available
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn model(&self) -> &str {
        self.broker.model()
    }

    /// Switch to the provider called `name`.
    ///
    /// Unknown or unconfigured names fail with
    /// [`ChatError::ProviderSelection`] and leave the session untouched.
    pub fn switch_provider(&mut self, name: &str) -> Result<SwitchOutcome> {
        let provider: Provider = name.parse().map_err(|e| {
            ChatError::ProviderSelection(format!("{} (choose from {})", e, provider_keys()))
        })?;

        if !self.available.contains(&provider) {
            return Err(ChatError::ProviderSelection(format!(
                "{} is not configured (set {})",
                provider,
                provider.api_key_env_vars()[0]
            )));
        }

        if provider == self.current_provider() {
            return Ok(SwitchOutcome::AlreadyActive(provider));
        }

        let broker = self.factory.build(provider)?;
        info!(from = %self.current_provider(), to = %provider, "Switching provider");
        self.broker = broker;

        Ok(SwitchOutcome::Switched(provider))
    }

    /// Run one chat turn against the current provider.
    pub async fn chat(&self, message: &str) -> std::result::Result<String, ProviderError> {
        self.broker.generate(self.system_prompt(), message).await
    }

    /// Lines printed by `status`.
    pub fn status_lines(&self) -> Vec<String> {
        let available: Vec<String> = self.available.iter().map(|p| p.to_string()).collect();
        vec![
            format!("Current provider: {} ({})", self.current_provider(), self.model()),
            format!("Available providers: {}", available.join(", ")),
        ]
    }
}

fn provider_keys() -> String {
    Provider::ALL.iter().map(|p| p.key()).collect::<Vec<_>>().join(", ")
}
