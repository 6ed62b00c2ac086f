use crate::application::ChatRequest;
use crate::domain::ChatMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /`. Unknown fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RelayChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub model: Option<String>,
}

impl From<RelayChatRequest> for ChatRequest {
    fn from(request: RelayChatRequest) -> Self {
        Self {
            messages: request.messages,
            model: request.model,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RelayChatResponse {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
