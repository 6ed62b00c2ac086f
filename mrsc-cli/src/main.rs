mod cli;

use cli::Cli;
use mrsc_core::constants::ENV_PATH;
use mrsc_core::{RelayConfig, bootstrap, server};
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // config/.env must be in the environment before clap and the log filter read it.
    let cli = Cli::parse_after_env(Path::new(ENV_PATH), std::env::args_os())
        .unwrap_or_else(|err| err.exit());

    init_tracing(&cli.log_level);
    info!("Starting MRSC chat relay");
    debug!(config = ?cli.config, "CLI arguments parsed");

    let mut config = RelayConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config)?;
    info!(
        endpoint = config.endpoint.as_str(),
        model = config.default_model.as_str(),
        api_key_env = config.api_key_env.as_str(),
        "Configuration loaded"
    );

    let (relay, metrics) = bootstrap(&config)?;
    debug!(prompt_bytes = relay.system_prompt().len(), "System prompt ready");

    server::serve(relay, metrics, config.bind).await?;
    info!("Relay stopped");
    Ok(())
}

fn init_tracing(default_level: &str) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
