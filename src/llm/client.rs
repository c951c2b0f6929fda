//! HTTP transport to the generative-AI API

use crate::llm::config::GeminiConfig;
use crate::llm::proto::{GenerateContentRequest, GenerateContentResponse};
use crate::{Result, RokoError};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::sync::Arc;
use tracing::debug;

/// Anything that can answer a `generateContent` request
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Gemini REST client
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(RokoError::ConfigError("Gemini API key is not set".into()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RokoError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!(
            "POST generateContent model={} contents={}",
            model,
            request.contents.len()
        );

        let resp = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .and_then(Response::error_for_status)?;

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| RokoError::MalformedReply(format!("Unreadable API response: {}", e)))
    }
}
