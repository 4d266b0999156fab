use crate::error::ProviderError;
use crate::llm::models::LlmMessage;
use async_trait::async_trait;

/// Sampling temperature used for every turn.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Configuration for LLM completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

/// Wire-level interface to a hosted LLM.
///
/// Implementations own the HTTP details of one provider and return the reply
/// text of a single non-streaming completion.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete an LLM request with text response
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<String, ProviderError>;
}
