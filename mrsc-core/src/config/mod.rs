pub mod error;
pub mod loader;
pub mod relay;

pub use error::ConfigError;
pub use loader::{ensure_env_loaded, load_env_file};
pub use relay::RelayConfig;
