//! Wire types for the generateContent endpoint.

use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One message in a request
#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One part of a message: text or inline binary data
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(Blob),
}

/// Inline binary payload (base64)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Structured-output settings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Schema,
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if there is any
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;

        let mut out = String::new();
        for part in &content.parts {
            if let Some(text) = &part.text {
                out.push_str(text);
            }
        }

        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}
