//! OpenAI Gateway for LLM interactions.
//!
//! This module provides a gateway for OpenAI's chat completions API.

use crate::error::ProviderError;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::{build_client, error_message};
use crate::llm::models::LlmMessage;
use crate::llm::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for connecting to OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Provider::OpenAI.default_base_url().to_string(),
            timeout: None,
        }
    }
}

/// Gateway for OpenAI LLM service.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new OpenAI gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn build_body(model: &str, messages: &[LlmMessage], config: &CompletionConfig) -> Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": config.temperature,
        });

        if let Some(max_tokens) = config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<String, ProviderError> {
        info!("Delegating to OpenAI for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = Self::build_body(model, messages, config);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(
                "OpenAI",
                status,
                error_message(&error_text),
            ));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

        if let Some(refusal) = response_body["choices"][0]["message"]["refusal"].as_str() {
            return Err(ProviderError::Refused(refusal.to_string()));
        }

        response_body["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("No content in OpenAI response".to_string())
            })
    }
}
