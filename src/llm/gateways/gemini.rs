//! Google Gemini Gateway for LLM interactions.
//!
//! Talks to the `generateContent` endpoint of the Generative Language API.
//! The system prompt travels as `systemInstruction` and the user message
//! becomes the single entry of `contents`.

use crate::error::ProviderError;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::{build_client, error_message};
use crate::llm::models::{LlmMessage, MessageRole};
use crate::llm::provider::Provider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Provider::Gemini.default_base_url().to_string(),
            timeout: None,
        }
    }
}

/// Gateway for Google Gemini LLM service.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn with_config(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn api_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    fn build_body(messages: &[LlmMessage], config: &CompletionConfig) -> Value {
        let (system, user): (Vec<&LlmMessage>, Vec<&LlmMessage>) =
            messages.iter().partition(|m| m.role == MessageRole::System);

        let contents: Vec<Value> = user
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": "user",
                    "parts": [{ "text": msg.content }]
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": config.temperature,
            }
        });

        if let Some(max_tokens) = config.max_tokens {
            body["generationConfig"]["maxOutputTokens"] = serde_json::json!(max_tokens);
        }

        let system_text: Vec<&str> = system.iter().map(|m| m.content.as_str()).collect();
        if !system_text.is_empty() {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system_text.join("\n\n") }]
            });
        }

        body
    }

    fn parse_response(json: &Value) -> Result<String, ProviderError> {
        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(ProviderError::Refused(format!("prompt blocked ({})", reason)));
        }

        let candidate = json["candidates"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("No candidates in Gemini response".to_string())
            })?;

        let text: String = candidate["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return match candidate["finishReason"].as_str() {
                Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                    Err(ProviderError::Refused(format!("response withheld ({})", reason)))
                }
                _ => Err(ProviderError::MalformedResponse(
                    "No text in Gemini response".to_string(),
                )),
            };
        }

        Ok(text)
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<String, ProviderError> {
        info!("Delegating to Gemini for completion");
        debug!(model = model, message_count = messages.len(), "Gemini API request");

        let body = Self::build_body(messages, config);

        let response = self
            .client
            .post(self.api_url(model))
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API returned error status");
            // Gemini answers a bad key with 400 INVALID_ARGUMENT, not 401.
            if status == StatusCode::BAD_REQUEST && is_invalid_key(&text) {
                return Err(ProviderError::Authentication {
                    provider: "Gemini".to_string(),
                    status: status.as_u16(),
                    message: error_message(&text),
                });
            }
            return Err(ProviderError::from_status("Gemini", status, error_message(&text)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

        Self::parse_response(&json)
    }
}

fn is_invalid_key(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["details"].as_array().cloned())
        .is_some_and(|details| details.iter().any(|d| d["reason"] == "API_KEY_INVALID"))
}
