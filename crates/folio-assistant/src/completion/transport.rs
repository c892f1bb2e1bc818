//! The request/response seam between the completion client and the network.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::credentials::Credential;
use crate::AiError;

use super::request::{extract_content, ChatRequest};

/// Sends one chat request and returns the completion text.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, credential: &Credential, request: &ChatRequest)
        -> Result<String, AiError>;
}

/// reqwest-backed transport for an OpenAI-compatible endpoint.
pub struct HttpTransport {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(
        &self,
        credential: &Credential,
        request: &ChatRequest,
    ) -> Result<String, AiError> {
        debug!(model = %request.model, messages = request.messages.len(), "completion request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;
        extract_content(&body)
    }
}
