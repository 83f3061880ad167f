//! Generative model backend.
//!
//! The content client talks to the model through the [`GenerativeBackend`]
//! trait. [`GeminiBackend`] is the production implementation; tests supply
//! scripted fakes.

mod api;
pub mod gemini;
pub mod schema;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

// Re-export the Gemini backend and the schema dialect
pub use gemini::GeminiBackend;
pub use schema::{Schema, SchemaType};

/// Errors from a backend call, before any domain interpretation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never completed (connect, DNS, timeout, body read)
    #[error("request to model backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("model backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not a readable envelope
    #[error("could not decode model backend response: {0}")]
    Envelope(#[from] serde_json::Error),

    /// The envelope decoded but carried no candidate text
    #[error("model backend returned no content")]
    Empty,
}

/// An image payload already encoded for transport.
///
/// Byte acquisition (camera, file) is the caller's job; this type only
/// carries the media type and the base64 data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Media type, e.g. "image/jpeg"
    pub mime_type: String,

    /// Base64-encoded image bytes
    pub data: String,
}

impl InlineImage {
    /// Wrap already-encoded data
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes for transport
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// JPEG helper for label captures
    pub fn jpeg(bytes: &[u8]) -> Self {
        Self::from_bytes("image/jpeg", bytes)
    }
}

/// One generation request, backend-neutral.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Prompt text
    pub prompt: String,

    /// Attached image, if the operation inspects one
    pub image: Option<InlineImage>,

    /// Response shape constraint; `None` means free-form prose
    pub response_schema: Option<Schema>,
}

impl GenerateRequest {
    /// A plain text prompt
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
            response_schema: None,
        }
    }

    /// Attach an image
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Constrain the response to a declared shape
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Trait for generative model backends
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run one generation request, returning the model's raw text output
    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError>;
}
