use super::super::state::ServerState;
use crate::application::CognitiveMetrics;
use crate::infrastructure::model::ModelClient;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "system",
    responses((status = 200, description = "Latest simulated metrics", body = CognitiveMetrics))
)]
pub async fn metrics_handler<C: ModelClient + 'static>(
    State(state): State<Arc<ServerState<C>>>,
) -> Json<CognitiveMetrics> {
    Json(state.metrics().latest().metrics)
}
