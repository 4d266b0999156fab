//! Startup configuration read once from the environment.
//!
//! `.env` loading is the binary's job; everything here reads through a lookup
//! function so tests can supply their own variables without touching the
//! process environment.

use crate::error::{ChatError, Result};
use crate::llm::gateway::CompletionConfig;
use crate::llm::provider::Provider;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

/// System prompt sent with every turn.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Keep your responses concise and friendly.";

/// Optional request timeout in whole seconds.
pub const TIMEOUT_ENV_VAR: &str = "CHATTERM_TIMEOUT_SECS";

/// Optional cap on reply length in tokens.
pub const MAX_TOKENS_ENV_VAR: &str = "CHATTERM_MAX_TOKENS";

/// API keys for the providers that have one configured.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    keys: BTreeMap<Provider, String>,
}

impl ProviderCredentials {
    /// Collect credentials from `lookup`, skipping blank values and
    /// unfilled `.env` template placeholders.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut keys = BTreeMap::new();
        for provider in Provider::ALL {
            let key = provider
                .api_key_env_vars()
                .iter()
                .filter_map(|var| lookup(var))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty() && !is_placeholder(value));

            if let Some(key) = key {
                keys.insert(provider, key);
            }
        }
        Self { keys }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    /// Providers with a credential, in priority order.
    pub fn available(&self) -> BTreeSet<Provider> {
        self.keys.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys.keys()).finish()
    }
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.starts_with("your_") && lower.ends_with("_here")
}

/// Everything chatterm reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: ProviderCredentials,
    endpoints: BTreeMap<Provider, String>,
    pub timeout: Option<Duration>,
    pub max_tokens: Option<u32>,
}

impl Settings {
    /// Read settings through `lookup`.
    ///
    /// Fails with [`ChatError::MissingCredentials`] when no provider has a
    /// credential, and with [`ChatError::Config`] when a numeric variable is
    /// not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = ProviderCredentials::from_lookup(&lookup);
        if credentials.is_empty() {
            return Err(missing_credentials());
        }

        let endpoints = Provider::ALL
            .iter()
            .filter_map(|p| {
                lookup(p.endpoint_env_var())
                    .map(|url| url.trim().trim_end_matches('/').to_string())
                    .filter(|url| !url.is_empty())
                    .map(|url| (*p, url))
            })
            .collect();

        let timeout = parse_number::<u64, _>(&lookup, TIMEOUT_ENV_VAR)?.map(Duration::from_secs);
        let max_tokens = parse_number::<u32, _>(&lookup, MAX_TOKENS_ENV_VAR)?;

        Ok(Self {
            credentials,
            endpoints,
            timeout,
            max_tokens,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// API base URL for `provider`, honouring endpoint overrides.
    pub fn base_url(&self, provider: Provider) -> &str {
        self.endpoints
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_else(|| provider.default_base_url())
    }

    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            max_tokens: self.max_tokens,
            ..CompletionConfig::default()
        }
    }
}

/// Error returned when no provider has a usable API key.
pub(crate) fn missing_credentials() -> ChatError {
    let expected: Vec<&str> = Provider::ALL
        .iter()
        .map(|p| p.api_key_env_vars()[0])
        .collect();
    ChatError::MissingCredentials(expected.join(" or "))
}

/// Read an optional positive integer. Zero is rejected rather than passed on
/// as a zero timeout or an empty reply budget.
fn parse_number<T, F>(lookup: &F, var: &str) -> Result<Option<T>>
where
    T: std::str::FromStr + Default + PartialEq,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    match value.parse::<T>() {
        Ok(number) if number != T::default() => Ok(Some(number)),
        _ => Err(ChatError::Config(format!(
            "{} must be a positive integer, got '{}'",
            var, value
        ))),
    }
}
