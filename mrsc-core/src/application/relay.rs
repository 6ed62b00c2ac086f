//! Chat relay: prepend the system prompt and delegate to the completion service.

use crate::domain::{ChatMessage, SystemPrompt};
use crate::infrastructure::model::{ModelClient, ModelError, ModelRequest};
use tracing::{debug, info};
use uuid::Uuid;

/// A conversation as received from the caller
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
}

/// Result of one relayed call
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub content: String,
    pub model: String,
    pub request_id: String,
}

/// Stateless relay. Holds only immutable configuration, so one instance can
/// serve any number of concurrent requests behind an `Arc`.
pub struct ChatRelay<C: ModelClient> {
    client: C,
    system_prompt: SystemPrompt,
    default_model: String,
}

impl<C: ModelClient> ChatRelay<C> {
    pub fn new(client: C, system_prompt: SystemPrompt, default_model: impl Into<String>) -> Self {
        Self {
            client,
            system_prompt,
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn system_prompt(&self) -> &SystemPrompt {
        &self.system_prompt
    }

    /// `[system prompt] ++ messages`, caller order preserved.
    pub fn outbound_messages(&self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let mut outbound = Vec::with_capacity(messages.len() + 1);
        outbound.push(self.system_prompt.to_message());
        outbound.extend(messages);
        outbound
    }

    pub fn resolve_model(&self, model: Option<String>) -> String {
        model.unwrap_or_else(|| self.default_model.clone())
    }

    /// Perform exactly one upstream call and return its text.
    pub async fn relay(&self, request: ChatRequest) -> Result<ChatOutcome, ModelError> {
        let request_id = Uuid::new_v4().to_string();
        let model = self.resolve_model(request.model);
        let inbound = request.messages.len();
        let messages = self.outbound_messages(request.messages);

        debug!(
            request_id = request_id.as_str(),
            model = model.as_str(),
            inbound,
            "Relaying conversation"
        );

        let response = self
            .client
            .chat(ModelRequest {
                model: model.clone(),
                messages,
                request_id: request_id.clone(),
            })
            .await?;

        info!(
            request_id = request_id.as_str(),
            provider = self.client.id(),
            chars = response.content().len(),
            "Relay completed"
        );

        Ok(ChatOutcome {
            content: response.message.content,
            model,
            request_id,
        })
    }
}
