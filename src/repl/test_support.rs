//! Scripted gateways and factories shared by the session and loop tests.

use crate::error::{ChatError, ProviderError, Result};
use crate::llm::broker::LlmBroker;
use crate::llm::factory::BrokerFactory;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmMessage, MessageRole};
use crate::llm::provider::Provider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Gateway that replays queued results and records every request.
pub struct ScriptedGateway {
    responses: Mutex<Vec<std::result::Result<String, ProviderError>>>,
    requests: Mutex<Vec<Vec<LlmMessage>>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<std::result::Result<String, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request body, in order.
    pub fn requests(&self) -> Vec<Vec<LlmMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// The user message of every request, in order.
    pub fn user_messages(&self) -> Vec<String> {
        self.requests()
            .iter()
            .flat_map(|messages| messages.iter())
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        _model: &str,
        messages: &[LlmMessage],
        _config: &CompletionConfig,
    ) -> std::result::Result<String, ProviderError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("default response".to_string())
        } else {
            responses.remove(0)
        }
    }
}

/// Factory handing out brokers over scripted gateways.
pub struct MockFactory {
    gateways: HashMap<Provider, Arc<ScriptedGateway>>,
    builds: Mutex<Vec<Provider>>,
}

impl MockFactory {
    pub fn new(gateways: Vec<(Provider, Arc<ScriptedGateway>)>) -> Self {
        Self {
            gateways: gateways.into_iter().collect(),
            builds: Mutex::new(Vec::new()),
        }
    }

    /// Factory able to build each of `providers` over an empty script.
    pub fn with_providers(providers: &[Provider]) -> Self {
        Self::new(
            providers
                .iter()
                .map(|p| (*p, Arc::new(ScriptedGateway::new(vec![]))))
                .collect(),
        )
    }

    /// Providers built so far, in order.
    pub fn builds(&self) -> Vec<Provider> {
        self.builds.lock().unwrap().clone()
    }
}

impl BrokerFactory for MockFactory {
    fn build(&self, provider: Provider) -> Result<LlmBroker> {
        let gateway = self.gateways.get(&provider).cloned().ok_or_else(|| {
            ChatError::ProviderSelection(format!("{} cannot be built", provider))
        })?;
        self.builds.lock().unwrap().push(provider);
        Ok(LlmBroker::new(provider, format!("{}-test-model", provider.key()), gateway))
    }
}
