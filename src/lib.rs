//! # chatterm
//!
//! A small interactive terminal chat client. Each line typed at the `You: `
//! prompt is sent, together with a fixed system prompt, to the active hosted
//! provider (OpenAI or Google Gemini) and the reply is printed. Turns are
//! independent: no conversation history is kept.
//!
//! The crate is split into the provider layer ([`llm`]), startup
//! configuration ([`config`]) and the interactive loop ([`repl`]).

pub mod config;
pub mod error;
pub mod llm;
pub mod repl;

pub use error::{ChatError, ProviderError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{ProviderCredentials, Settings, SYSTEM_PROMPT};
    pub use crate::error::{ChatError, ProviderError, Result};
    pub use crate::llm::{BrokerFactory, GatewayBrokerFactory, LlmBroker, LlmGateway, Provider};
    pub use crate::repl::{run, Exit, Session};
}
