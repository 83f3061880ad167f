//! Runtime configuration.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (GEMINI_API_KEY, SABOR_SCOUT_MODEL, SABOR_SCOUT_HOME)
//! 2. Defaults (gemini-2.5-flash, ~/.sabor-scout)
//!
//! Loading never fails. A missing API key is logged here and surfaces as an
//! error only when a model request is actually attempted, so offline
//! commands keep working without one.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::backend::gemini::DEFAULT_MODEL;

/// Environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Older name for the key variable, honored as a fallback
pub const API_KEY_FALLBACK_VAR: &str = "API_KEY";

/// Overrides the model identifier
pub const MODEL_VAR: &str = "SABOR_SCOUT_MODEL";

/// Overrides the record directory
pub const HOME_VAR: &str = "SABOR_SCOUT_HOME";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key; `None` leaves request commands unusable
    pub api_key: Option<String>,
    /// Model identifier sent to the backend
    pub model: String,
    /// Directory holding persisted records
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .or_else(|_| env::var(API_KEY_FALLBACK_VAR))
            .ok();
        let model = env::var(MODEL_VAR).ok();
        let data_dir = env::var(HOME_VAR).ok();

        resolve(api_key, model, data_dir)
    }

    /// Whether an API key is available for model requests
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Combine raw environment values with defaults
fn resolve(api_key: Option<String>, model: Option<String>, data_dir: Option<String>) -> Config {
    let api_key = api_key.filter(|key| !key.trim().is_empty());
    if api_key.is_none() {
        warn!(
            "No API key found; set {} to enable model requests",
            API_KEY_VAR
        );
    }

    let model = model
        .filter(|model| !model.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let data_dir = data_dir
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir);

    Config {
        api_key,
        model,
        data_dir,
    }
}

/// Default record directory (~/.sabor-scout)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sabor-scout")
}
