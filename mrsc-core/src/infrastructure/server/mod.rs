mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{ErrorResponse, HealthResponse, RelayChatRequest, RelayChatResponse};
pub use error::{ApiError, ServerError};
pub use router::build_router;

use crate::application::{ChatRelay, MetricsFeed};
use crate::infrastructure::model::ModelClient;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn serve<C>(
    relay: Arc<ChatRelay<C>>,
    metrics: Arc<MetricsFeed>,
    addr: SocketAddr,
) -> Result<(), ServerError>
where
    C: ModelClient + 'static,
{
    router::serve(relay, metrics, addr).await
}
