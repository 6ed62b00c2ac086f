use super::error::ConfigError;
use crate::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_API_PATH, DEFAULT_BIND, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS,
    DEFAULT_METRICS_INTERVAL_MS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::domain::SystemPrompt;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Relay configuration loaded from relay.toml, after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Base URL of the completion service
    pub endpoint: String,
    pub api_path: String,
    pub default_model: String,
    /// Name of the environment variable holding the bearer credential
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Replaces the embedded prompt when set
    pub system_prompt_file: Option<PathBuf>,
    pub bind: SocketAddr,
    pub metrics_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_prompt_file: None,
            bind: DEFAULT_BIND
                .parse()
                .unwrap_or(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080)),
            metrics_interval: Duration::from_millis(DEFAULT_METRICS_INTERVAL_MS),
        }
    }
}

impl RelayConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse a bind address the same way the TOML loader does.
    pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
        super::loader::parse_bind(value)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if self.default_model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }
        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::MissingApiKeyEnv);
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature {
                value: self.temperature,
            });
        }
        if self.metrics_interval.is_zero() {
            return Err(ConfigError::InvalidMetricsInterval);
        }
        Ok(())
    }

    /// Resolve the system prompt once, at startup.
    pub fn system_prompt(&self) -> Result<SystemPrompt, ConfigError> {
        let Some(path) = self.system_prompt_file.as_deref() else {
            return Ok(SystemPrompt::embedded());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::PromptIo {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(ConfigError::EmptyPrompt {
                path: path.to_path_buf(),
            });
        }
        info!(path = %path.display(), bytes = text.len(), "Loaded system prompt from file");
        Ok(SystemPrompt::new(text))
    }
}
