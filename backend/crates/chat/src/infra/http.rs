//! HTTP Model Client
//!
//! Client for an OpenAI-compatible provider API. Implements both the
//! completion contract used by chat and the external file store that
//! project uploads point into, since both live behind the same API key.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use projects::{FileStore, FileStoreError};

use crate::application::config::ChatConfig;
use crate::domain::model::{ChatTurn, ModelClient, ModelError};

/// HTTP-backed model client
pub struct HttpModelClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl HttpModelClient {
    /// Create a client against `base_url` (e.g. `https://api.openai.com/v1`)
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, config: &ChatConfig) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Classify a non-success completion response
    async fn classify_failure(response: reqwest::Response) -> ModelError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return ModelError::Auth;
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            // The provider reuses 429 for both throttling and exhausted
            // quota; the body tells them apart
            let body = response.text().await.unwrap_or_default();
            if body.contains("insufficient_quota") || body.contains("billing") {
                return ModelError::QuotaExceeded;
            }
            return ModelError::RateLimited;
        }

        ModelError::Other(format!("API returned status: {}", status))
    }
}

impl ModelClient for HttpModelClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, ModelError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: turns
                .iter()
                .map(|t| MessageDto {
                    role: t.role.as_str(),
                    content: &t.content,
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Other(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Other(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ModelError::Other("Empty completion".to_string()))
    }
}

impl FileStore for HttpModelClient {
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> Result<String, FileStoreError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .http
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| FileStoreError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FileStoreError(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let body: FileUploadResponse = response
            .json()
            .await
            .map_err(|e| FileStoreError(e.to_string()))?;

        Ok(body.id)
    }

    async fn delete(&self, external_file_id: &str) -> Result<(), FileStoreError> {
        let response = self
            .http
            .delete(format!("{}/files/{}", self.base_url, external_file_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| FileStoreError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FileStoreError(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<MessageDto<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessageDto<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct FileUploadResponse {
    id: String,
}
