//! Application constants
//!
//! Single source of truth for paths, upstream defaults and sampling knobs.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/relay.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default bind address for the REST server
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Base URL of the completion service
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com";

/// Chat-completion path on the completion service
pub const DEFAULT_API_PATH: &str = "/openai/v1/chat/completions";

/// Model used when the caller does not name one
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Environment variable holding the completion service credential
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Provider id used in logs and error messages
pub const DEFAULT_PROVIDER_ID: &str = "groq";

pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Tick period of the simulated metrics feed
pub const DEFAULT_METRICS_INTERVAL_MS: u64 = 1000;

/// Headers browsers may send to the relay
pub const CORS_ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
