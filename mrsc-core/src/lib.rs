//! MRSC chat relay
//!
//! Receives a conversation, prepends the fixed MRSC system prompt, forwards it
//! to an OpenAI-compatible completion service and returns the first reply.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{ChatOutcome, ChatRelay, ChatRequest, CognitiveMetrics, MetricsFeed};
pub use config::{ConfigError, RelayConfig};
pub use domain::{ChatMessage, MessageRole, SystemPrompt};
pub use infrastructure::model;
#[cfg(feature = "server")]
pub use infrastructure::server;

use infrastructure::model::OpenAIClient;
use std::sync::Arc;

/// Wire the relay and metrics feed described by `config`.
///
/// Reads the system prompt file (if any) once; the credential is left to be
/// resolved per request. Must be called from within a Tokio runtime because
/// the metrics feed is spawned here.
pub fn bootstrap(
    config: &RelayConfig,
) -> Result<(Arc<ChatRelay<OpenAIClient>>, Arc<MetricsFeed>), ConfigError> {
    config.validate()?;
    let system_prompt = config.system_prompt()?;
    let client = OpenAIClient::from_config(config);
    let relay = ChatRelay::new(client, system_prompt, config.default_model.clone());
    let metrics = MetricsFeed::spawn(config.metrics_interval);
    Ok((Arc::new(relay), Arc::new(metrics)))
}
