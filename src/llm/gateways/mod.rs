pub mod gemini;
pub mod openai;

pub use gemini::{GeminiConfig, GeminiGateway};
pub use openai::{OpenAIConfig, OpenAIGateway};

use crate::error::ProviderError;
use reqwest::Client;
use std::time::Duration;

/// Build the HTTP client shared by a gateway's requests.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, ProviderError> {
    let mut client_builder =
        Client::builder().user_agent(concat!("chatterm/", env!("CARGO_PKG_VERSION")));

    if let Some(timeout) = timeout {
        client_builder = client_builder.timeout(timeout);
    }

    Ok(client_builder.build()?)
}

/// Pull a readable message out of a provider error body.
///
/// Both OpenAI and Gemini answer with `{"error": {"message": ...}}`; anything
/// else is passed through as-is.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
