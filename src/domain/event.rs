//! Local beer event records.

use serde::{Deserialize, Serialize};

/// A beer-related event near a location, as returned by the events lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeerEvent {
    /// Event name
    pub name: String,

    /// Date as produced by the model; opaque display text, never parsed
    pub date: String,

    /// Venue or area
    pub location: String,

    /// Free-text description
    pub description: String,

    /// Event page, when the model supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
