//! The set of hosted providers chatterm can talk to.

use std::fmt;
use std::str::FromStr;

/// A hosted LLM provider.
///
/// The declaration order is the startup priority: when several providers are
/// configured, the first one in this order becomes the active provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl Provider {
    /// All providers in priority order.
    pub const ALL: [Provider; 2] = [Provider::OpenAI, Provider::Gemini];

    /// Lowercase name used in the `provider <name>` command.
    pub fn key(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Environment variables holding this provider's API key, most preferred first.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAI => &["OPENAI_API_KEY"],
            Provider::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        }
    }

    /// Environment variable that overrides the API base URL.
    pub fn endpoint_env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_ENDPOINT",
            Provider::Gemini => "GEMINI_API_ENDPOINT",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-3.5-turbo",
            Provider::Gemini => "gemini-1.5-flash",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// Label printed in front of a reply.
    pub fn label(&self) -> String {
        format!("🤖 {}", self)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "OpenAI"),
            Provider::Gemini => write!(f, "Gemini"),
        }
    }
}

/// Error returned when a name does not match any provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown provider '{}'", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Provider::OpenAI),
            "gemini" | "google" => Ok(Provider::Gemini),
            _ => Err(UnknownProvider(s.trim().to_string())),
        }
    }
}
