use super::super::dto::{ErrorResponse, RelayChatRequest, RelayChatResponse};
use super::super::error::ApiError;
use super::super::state::ServerState;
use crate::infrastructure::model::ModelClient;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::{error, info, warn};

#[utoipa::path(
    post,
    path = "/",
    tag = "chat",
    request_body = RelayChatRequest,
    responses(
        (status = 200, description = "First completion returned by the model", body = RelayChatResponse),
        (status = 400, description = "Request body does not match the schema", body = ErrorResponse),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorResponse)
    )
)]
pub async fn chat_handler<C: ModelClient + 'static>(
    State(state): State<Arc<ServerState<C>>>,
    payload: Result<Json<RelayChatRequest>, JsonRejection>,
) -> Result<Json<RelayChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(%rejection, "Rejecting chat request with malformed body");
        ApiError::from(rejection)
    })?;

    info!(
        messages = payload.messages.len(),
        model = payload.model.as_deref(),
        "Received chat request"
    );

    let relay = state.relay();
    match relay.relay(payload.into()).await {
        Ok(outcome) => Ok(Json(RelayChatResponse {
            content: outcome.content,
        })),
        Err(err) => {
            error!(error = %err, configuration = err.is_configuration(), "Error in chat relay");
            Err(ApiError::Relay(err))
        }
    }
}
