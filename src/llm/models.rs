use serde::{Deserialize, Serialize};

/// Message role in LLM conversation
///
/// Only the two roles a single turn carries; replies are never sent back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// Message in LLM conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// One request/response exchange: a system prompt and a single user message.
///
/// A turn is built for each chat input and dropped once the reply is printed,
/// so nothing from an earlier exchange ever reaches a later request.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    system_prompt: String,
    user_message: String,
}

impl Turn {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
        }
    }

    /// The messages sent to the provider: always `[system, user]`.
    pub fn messages(&self) -> [LlmMessage; 2] {
        [
            LlmMessage::system(&self.system_prompt),
            LlmMessage::user(&self.user_message),
        ]
    }
}
