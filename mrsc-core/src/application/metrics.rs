//! Simulated cognitive metrics shown on the dashboard.
//!
//! Each metric is a bounded random walk. `CognitiveMetrics::next` is the pure
//! step; `MetricsFeed` drives it on a fixed interval and publishes snapshots.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use utoipa::ToSchema;

/// Inclusive band and per-tick step width of one metric.
#[derive(Debug, Clone, Copy)]
struct Walk {
    min: f64,
    max: f64,
    step: f64,
}

impl Walk {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    fn advance<R: Rng + ?Sized>(self, value: f64, rng: &mut R) -> f64 {
        let jitter = (rng.gen_range(0.0_f64..1.0) - 0.5) * self.step;
        (value + jitter).clamp(self.min, self.max)
    }
}

const CONSCIOUSNESS: Walk = Walk::new(80.0, 100.0, 2.0);
const SIGMA: Walk = Walk::new(90.0, 100.0, 1.5);
const ERPS: Walk = Walk::new(85.0, 100.0, 1.8);
const RECURSION: Walk = Walk::new(70.0, 100.0, 2.2);
const ETHICAL: Walk = Walk::new(95.0, 100.0, 0.5);

/// Percentages displayed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CognitiveMetrics {
    pub consciousness: f64,
    /// Σ-matrix coherence
    pub sigma: f64,
    pub erps: f64,
    pub recursion: f64,
    pub ethical: f64,
}

impl Default for CognitiveMetrics {
    fn default() -> Self {
        Self {
            consciousness: 94.7,
            sigma: 98.2,
            erps: 96.1,
            recursion: 89.3,
            ethical: 99.8,
        }
    }
}

impl CognitiveMetrics {
    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            consciousness: CONSCIOUSNESS.advance(self.consciousness, rng),
            sigma: SIGMA.advance(self.sigma, rng),
            erps: ERPS.advance(self.erps, rng),
            recursion: RECURSION.advance(self.recursion, rng),
            ethical: ETHICAL.advance(self.ethical, rng),
        }
    }

    pub fn within_bands(&self) -> bool {
        [
            (CONSCIOUSNESS, self.consciousness),
            (SIGMA, self.sigma),
            (ERPS, self.erps),
            (RECURSION, self.recursion),
            (ETHICAL, self.ethical),
        ]
        .iter()
        .all(|(walk, value)| (walk.min..=walk.max).contains(value))
    }
}

/// One published state of the feed; `tick` counts steps since spawn.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub tick: u64,
    pub updated_at: DateTime<Utc>,
    pub metrics: CognitiveMetrics,
}

impl MetricsSnapshot {
    fn initial() -> Self {
        Self {
            tick: 0,
            updated_at: Utc::now(),
            metrics: CognitiveMetrics::default(),
        }
    }
}

/// Background task stepping the metrics. Stops when dropped.
pub struct MetricsFeed {
    receiver: watch::Receiver<MetricsSnapshot>,
    task: JoinHandle<()>,
}

impl MetricsFeed {
    pub fn spawn(interval: Duration) -> Self {
        Self::spawn_with_rng(interval, StdRng::from_entropy())
    }

    pub fn spawn_with_rng<R>(interval: Duration, mut rng: R) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (sender, receiver) = watch::channel(MetricsSnapshot::initial());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately; the initial state is already published.
            ticker.tick().await;
            let mut current = MetricsSnapshot::initial();
            loop {
                ticker.tick().await;
                current = MetricsSnapshot {
                    tick: current.tick + 1,
                    updated_at: Utc::now(),
                    metrics: current.metrics.next(&mut rng),
                };
                if sender.send(current.clone()).is_err() {
                    debug!("Metrics feed has no subscribers, stopping");
                    break;
                }
            }
        });
        Self { receiver, task }
    }

    pub fn latest(&self) -> MetricsSnapshot {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MetricsSnapshot> {
        self.receiver.clone()
    }
}

impl Drop for MetricsFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}
