//! Gemini implementation of the generative backend.
//!
//! One endpoint: `POST {base}/models/{model}:generateContent` with the API
//! key in the `x-goog-api-key` header. Structured operations set
//! `responseMimeType: application/json` plus a response schema so the model
//! answers in the declared shape.

use async_trait::async_trait;
use tracing::debug;

use super::api::{
    Blob, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use super::{BackendError, GenerateRequest, GenerativeBackend};

/// Public API base
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// HTTP client for the generateContent API
pub struct GeminiBackend {
    /// API key sent with every request
    api_key: String,
    /// Model name, e.g. "gemini-2.5-flash"
    model: String,
    /// API base URL (overridable for tests)
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a backend for the given key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the backend at a different API base
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the generateContent URL
    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Translate a backend-neutral request into the wire body
    fn build_body(request: GenerateRequest) -> GenerateContentRequest {
        let mut parts = vec![Part::Text(request.prompt)];

        if let Some(image) = request.image {
            parts.push(Part::InlineData(Blob {
                mime_type: image.mime_type,
                data: image.data,
            }));
        }

        let generation_config = request.response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });

        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config,
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError> {
        let url = self.request_url();
        let body = Self::build_body(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        let text = response.text().await?;
        debug!(bytes = text.len(), "model backend responded");

        let envelope: GenerateContentResponse = serde_json::from_str(&text)?;
        envelope.text().ok_or(BackendError::Empty)
    }
}
