pub mod metrics;
pub mod relay;

pub use metrics::{CognitiveMetrics, MetricsFeed};
pub use relay::{ChatOutcome, ChatRelay, ChatRequest};
