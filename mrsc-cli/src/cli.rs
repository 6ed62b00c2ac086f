use clap::Parser;
use mrsc_core::config::load_env_file;
use mrsc_core::{ConfigError, RelayConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "mrsc-relay",
    version,
    about = "MRSC chat relay: forwards conversations to an OpenAI-compatible completion API"
)]
pub struct Cli {
    /// Configuration file (defaults to config/relay.toml when present)
    #[arg(long, short, env = "MRSC_CONFIG")]
    pub config: Option<PathBuf>,
    /// Address the REST server binds to
    #[arg(long, env = "MRSC_BIND")]
    pub bind: Option<String>,
    /// Base URL of the completion service
    #[arg(long, env = "MRSC_ENDPOINT")]
    pub endpoint: Option<String>,
    /// Model used when a request does not name one
    #[arg(long)]
    pub model: Option<String>,
    /// Environment variable holding the completion service API key
    #[arg(long)]
    pub api_key_env: Option<String>,
    /// File whose contents replace the embedded system prompt
    #[arg(long)]
    pub system_prompt_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parse `args` after loading `env_file`, so `MRSC_*` variables defined
    /// there act as flag defaults.
    pub fn parse_after_env<I, T>(env_file: &Path, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        load_env_file(env_file);
        Self::try_parse_from(args)
    }

    /// Layer command-line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut RelayConfig) -> Result<(), ConfigError> {
        if let Some(bind) = self.bind.as_deref() {
            config.bind = RelayConfig::parse_bind(bind)?;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.default_model = model.clone();
        }
        if let Some(api_key_env) = &self.api_key_env {
            config.api_key_env = api_key_env.clone();
        }
        if let Some(path) = &self.system_prompt_file {
            config.system_prompt_file = Some(path.clone());
        }
        config.validate()
    }
}
