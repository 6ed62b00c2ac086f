use crate::application::{ChatRelay, MetricsFeed};
use crate::infrastructure::model::ModelClient;
use std::sync::Arc;

pub(crate) struct ServerState<C: ModelClient> {
    relay: Arc<ChatRelay<C>>,
    metrics: Arc<MetricsFeed>,
}

impl<C: ModelClient> ServerState<C> {
    pub(crate) fn new(relay: Arc<ChatRelay<C>>, metrics: Arc<MetricsFeed>) -> Self {
        Self { relay, metrics }
    }

    pub(crate) fn relay(&self) -> Arc<ChatRelay<C>> {
        Arc::clone(&self.relay)
    }

    pub(crate) fn metrics(&self) -> &MetricsFeed {
        &self.metrics
    }
}
