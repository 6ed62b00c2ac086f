//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::RelayConfig;
use crate::constants::{DEFAULT_MAX_TOKENS, DEFAULT_PROVIDER_ID, DEFAULT_TEMPERATURE};
use crate::domain::ChatMessage;
use crate::infrastructure::model::credentials::ApiKeySource;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

/// Sampling knobs sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// OpenAI-compatible client (works with Groq, OpenAI, Mistral, etc.)
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    api_path: String,
    sampling: SamplingOptions,
}

impl OpenAIClient {
    pub fn new(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        api_path: impl Into<String>,
        api_key: ApiKeySource,
    ) -> Self {
        Self {
            base: HttpClientBase::new(id.into(), endpoint.into(), api_key),
            api_path: api_path.into(),
            sampling: SamplingOptions::default(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            DEFAULT_PROVIDER_ID,
            config.endpoint.clone(),
            config.api_path.clone(),
            ApiKeySource::env(config.api_key_env.clone()),
        )
        .with_sampling(SamplingOptions {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn url(&self) -> String {
        self.base.build_url(&self.api_path)
    }

    fn payload<'a>(&self, request: &'a ModelRequest) -> OpenAIRequest<'a> {
        OpenAIRequest {
            messages: &request.messages,
            model: &request.model,
            max_tokens: self.sampling.max_tokens,
            temperature: self.sampling.temperature,
            stream: false,
        }
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.url();
        let payload = self.payload(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            request_id = request.request_id.as_str(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;
        debug!(
            request_id = request.request_id.as_str(),
            choices = response.choices.len(),
            "Received response from OpenAI-compatible provider"
        );

        let content = first_content(response).ok_or_else(|| {
            ModelError::invalid_response(&self.base.id, "no content in first choice")
        })?;

        Ok(ModelResponse::new(content))
    }
}

/// Text of the first choice. Missing, null, and empty content all count as absent.
fn first_content(response: OpenAIResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|content| !content.is_empty())
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
