use super::error::ConfigError;
use super::relay::RelayConfig;
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML.
/// Every field is optional; absent fields keep the built-in default.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawConfig {
    pub endpoint: Option<String>,
    pub api_path: Option<String>,
    pub default_model: Option<String>,
    pub api_key_env: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub system_prompt_file: Option<PathBuf>,
    pub bind: Option<String>,
    pub metrics_interval_ms: Option<u64>,
}

/// Ensures environment variables are loaded from config/.env.
/// Variables already present in the process environment win.
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        load_env_file(Path::new(ENV_PATH));
    });
}

/// Load `path` into the process environment without overriding variables
/// that are already set. Returns whether the file was read.
pub fn load_env_file(path: &Path) -> bool {
    match from_filename(path) {
        Ok(_) => {
            debug!(path = %path.display(), "Loaded environment file");
            true
        }
        Err(_) => false,
    }
}

/// Load configuration from `path`, or from the default path when `None`.
///
/// A missing default file yields the built-in defaults; a missing file that
/// was asked for explicitly is an error.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            match read_config(default_path) {
                Err(ConfigError::NotFound { .. }) => {
                    debug!(
                        path = %default_path.display(),
                        "No configuration file found, using defaults"
                    );
                    Ok(RelayConfig::default())
                }
                other => other,
            }
        }
    }
}

/// Parse configuration from TOML text. Relative prompt paths resolve against
/// the directory containing `source`.
pub fn parse_config(content: &str, source: &Path) -> Result<RelayConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|err| ConfigError::Parse {
        path: source.to_path_buf(),
        source: err,
    })?;
    let base_dir = source.parent().unwrap_or_else(|| Path::new("."));
    build(parsed, base_dir)
}

fn read_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    debug!(path = %path.display(), "Reading relay configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

fn build(parsed: RawConfig, base_dir: &Path) -> Result<RelayConfig, ConfigError> {
    let mut config = RelayConfig::default();

    if let Some(endpoint) = parsed.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(api_path) = parsed.api_path {
        config.api_path = api_path;
    }
    if let Some(model) = parsed.default_model {
        config.default_model = model;
    }
    if let Some(api_key_env) = parsed.api_key_env {
        config.api_key_env = api_key_env;
    }
    if let Some(max_tokens) = parsed.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(temperature) = parsed.temperature {
        config.temperature = temperature;
    }
    if let Some(file) = parsed.system_prompt_file {
        let resolved = if file.is_relative() {
            base_dir.join(file)
        } else {
            file
        };
        config.system_prompt_file = Some(resolved);
    }
    if let Some(bind) = parsed.bind {
        config.bind = parse_bind(&bind)?;
    }
    if let Some(ms) = parsed.metrics_interval_ms {
        config.metrics_interval = Duration::from_millis(ms);
    }

    config.validate()?;
    Ok(config)
}

pub(super) fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidBind {
        value: value.to_string(),
        source,
    })
}
