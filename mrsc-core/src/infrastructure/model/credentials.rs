//! Bearer credential resolution

use std::env;
use std::fmt;
use tracing::warn;

/// Where the completion service credential comes from.
///
/// `Env` is read on every call, so rotating the variable (or setting it after
/// startup) takes effect without a restart.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    Env(String),
    Inline(String),
}

impl ApiKeySource {
    pub fn env(name: impl Into<String>) -> Self {
        Self::Env(name.into())
    }

    pub fn inline(key: impl Into<String>) -> Self {
        Self::Inline(key.into())
    }

    /// Resolve the key; blank values count as missing.
    pub fn resolve(&self, provider: &str) -> Option<String> {
        let value = match self {
            ApiKeySource::Inline(key) => key.clone(),
            ApiKeySource::Env(name) => match env::var(name) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        provider,
                        env_var = name.as_str(),
                        %err,
                        "API key environment variable is not set"
                    );
                    return None;
                }
            },
        };
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Human-readable name of the source, safe to log.
    pub fn describe(&self) -> &str {
        match self {
            ApiKeySource::Env(name) => name,
            ApiKeySource::Inline(_) => "inline api key",
        }
    }
}

impl fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeySource::Env(name) => f.debug_tuple("Env").field(name).finish(),
            ApiKeySource::Inline(_) => f.write_str("Inline(<redacted>)"),
        }
    }
}
