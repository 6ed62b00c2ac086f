use super::dto::{ErrorResponse, HealthResponse, RelayChatRequest, RelayChatResponse};
use super::routes;
use crate::application::CognitiveMetrics;
use crate::domain::{ChatMessage, MessageRole};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::chat::chat_handler,
        routes::metrics::metrics_handler,
        routes::health::health_handler
    ),
    components(
        schemas(
            RelayChatRequest,
            RelayChatResponse,
            ErrorResponse,
            HealthResponse,
            ChatMessage,
            MessageRole,
            CognitiveMetrics
        )
    ),
    tags(
        (name = "chat", description = "Relay a conversation to the completion service"),
        (name = "system", description = "Liveness and simulated dashboard metrics")
    )
)]
pub(super) struct ApiDoc;
