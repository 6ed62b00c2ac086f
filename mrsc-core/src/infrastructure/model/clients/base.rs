//! Base HTTP client with shared logic

use crate::infrastructure::model::credentials::ApiKeySource;
use crate::infrastructure::model::types::ModelError;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: ApiKeySource,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(id: String, endpoint: String, api_key: ApiKeySource) -> Self {
        Self {
            id,
            endpoint,
            api_key,
            http: Client::new(),
        }
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with bearer auth.
    ///
    /// The credential is resolved before any I/O. A non-2xx status is turned
    /// into `UpstreamStatus` carrying the response body text verbatim.
    pub async fn post_with_bearer<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;

        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_else(|err| {
                warn!(provider = self.id.as_str(), %err, "Failed to read upstream error body");
                String::new()
            });
            return Err(ModelError::upstream_status(&self.id, status.as_u16(), text));
        }

        response.json().await.map_err(|e| {
            if e.is_decode() {
                ModelError::invalid_response(&self.id, e.to_string())
            } else {
                ModelError::network(&self.id, e)
            }
        })
    }

    fn require_api_key(&self) -> Result<String, ModelError> {
        self.api_key
            .resolve(&self.id)
            .ok_or_else(|| ModelError::missing_api_key(&self.id, self.api_key.describe()))
    }
}
