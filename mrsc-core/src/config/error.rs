use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("'endpoint' must not be empty")]
    MissingEndpoint,

    #[error("'default_model' must not be empty")]
    MissingModel,

    #[error("'api_key_env' must not be empty")]
    MissingApiKeyEnv,

    #[error("'max_tokens' must be greater than zero")]
    InvalidMaxTokens,

    #[error("'temperature' must be within 0.0..=2.0, got {value}")]
    InvalidTemperature { value: f64 },

    #[error("'metrics_interval_ms' must be greater than zero")]
    InvalidMetricsInterval,

    #[error("failed to read system prompt from {path:?}: {source}")]
    PromptIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("system prompt file {path:?} is empty")]
    EmptyPrompt { path: PathBuf },
}
