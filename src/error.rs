//! Error types and result aliases for chatterm.
//!
//! [`ProviderError`] covers everything that can go wrong while asking a hosted
//! model for a reply. [`ChatError`] is the crate-wide error: configuration
//! failures at startup, rejected provider switches, provider failures and
//! terminal I/O. Only the configuration errors and [`ChatError::Io`] are fatal
//! to the interactive loop; the others are reported and the loop continues.

use thiserror::Error;

/// Failure while generating a reply from a provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} rejected the credentials ({status}): {message}")]
    Authentication {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} rate limit or quota exceeded: {message}")]
    RateLimited { provider: String, message: String },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request refused: {0}")]
    Refused(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status into the matching error variant.
    pub fn from_status(provider: &str, status: reqwest::StatusCode, body: String) -> Self {
        let provider = provider.to_string();
        match status.as_u16() {
            401 | 403 => ProviderError::Authentication {
                provider,
                status: status.as_u16(),
                message: body,
            },
            429 => ProviderError::RateLimited {
                provider,
                message: body,
            },
            code => ProviderError::Api {
                provider,
                status: code,
                message: body,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No provider has a usable API key.
    #[error("Invalid configuration: no API keys found (set {0})")]
    MissingCredentials(String),

    #[error("Cannot switch provider: {0}")]
    ProviderSelection(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    /// Follow-up advice printed under a fatal startup error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ChatError::MissingCredentials(_) => {
                Some("Please set your API key(s) in the environment or the .env file.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
