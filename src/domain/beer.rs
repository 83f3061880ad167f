//! Core beer data model.
//!
//! A beer has no surrogate id: identity is the natural key of name plus
//! brewery, and every store and lookup keys on that pair.

use serde::{Deserialize, Serialize};

/// A beer as identified from a label, returned by search, or contributed
/// manually.
///
/// Field names serialize in camelCase to match the wire and persisted
/// layouts (`tastingNotes`, `imageUrl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beer {
    /// Beer name
    pub name: String,

    /// Producing brewery
    pub brewery: String,

    /// Style, e.g. "West Coast IPA"
    pub style: String,

    /// Alcohol by volume, percent
    pub abv: f64,

    /// International bitterness units, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibu: Option<f64>,

    /// Short tasting descriptors
    #[serde(default)]
    pub tasting_notes: Vec<String>,

    /// Free-text description
    pub description: String,

    /// Label image location, when one was captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Beer {
    /// Create a beer with the identifying fields set and everything else empty
    pub fn new(name: impl Into<String>, brewery: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brewery: brewery.into(),
            style: String::new(),
            abv: 0.0,
            ibu: None,
            tasting_notes: Vec::new(),
            description: String::new(),
            image_url: None,
        }
    }

    /// Set the style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the ABV
    pub fn with_abv(mut self, abv: f64) -> Self {
        self.abv = abv;
        self
    }

    /// Set the IBU
    pub fn with_ibu(mut self, ibu: f64) -> Self {
        self.ibu = Some(ibu);
        self
    }

    /// Set the tasting notes
    pub fn with_tasting_notes(
        mut self,
        notes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.tasting_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the label image location
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// The natural key for this beer
    pub fn key(&self) -> BeerKey {
        BeerKey::new(&self.name, &self.brewery)
    }

    /// Parse user-entered tasting notes: comma-separated, trimmed,
    /// empty entries dropped
    pub fn parse_tasting_notes(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Composite natural key for a beer: name plus brewery.
///
/// The storage form joins both fields with `|`; the persisted rating map
/// uses that string as its JSON object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeerKey {
    pub name: String,
    pub brewery: String,
}

impl BeerKey {
    /// Create a key from its parts
    pub fn new(name: impl Into<String>, brewery: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brewery: brewery.into(),
        }
    }

    /// The `"<name>|<brewery>"` form used in persisted records
    pub fn storage_key(&self) -> String {
        format!("{}|{}", self.name, self.brewery)
    }
}

impl std::fmt::Display for BeerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.name, self.brewery)
    }
}

impl From<&Beer> for BeerKey {
    fn from(beer: &Beer) -> Self {
        beer.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_storage_form() {
        let key = BeerKey::new("Hoppy Trail IPA", "Acme Brewing");
        assert_eq!(key.storage_key(), "Hoppy Trail IPA|Acme Brewing");
        assert_eq!(key.to_string(), "Hoppy Trail IPA|Acme Brewing");
    }

    #[test]
    fn test_key_equality_on_both_fields() {
        let a = BeerKey::new("Stout", "Acme Brewing");
        let b = BeerKey::new("Stout", "Zenith Brewing");
        assert_ne!(a, b);
        assert_eq!(a, BeerKey::new("Stout", "Acme Brewing"));
    }

    #[test]
    fn test_beer_serializes_camel_case() {
        let beer = Beer::new("Midnight Stout", "Acme Brewing")
            .with_style("Imperial Stout")
            .with_abv(9.5)
            .with_tasting_notes(["coffee", "dark chocolate"])
            .with_description("Rich and roasty");

        let json = serde_json::to_value(&beer).unwrap();
        assert_eq!(json["tastingNotes"][0], "coffee");
        // Unset optionals are omitted, matching the persisted layout
        assert!(json.get("ibu").is_none());
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_beer_decodes_without_optional_fields() {
        let json = r#"{
            "name": "Golden Ale",
            "brewery": "Riverbend",
            "style": "Blonde Ale",
            "abv": 4.8,
            "tastingNotes": ["honey", "biscuit"],
            "description": "Easy drinking"
        }"#;

        let beer: Beer = serde_json::from_str(json).unwrap();
        assert_eq!(beer.ibu, None);
        assert_eq!(beer.image_url, None);
        assert_eq!(beer.key(), BeerKey::new("Golden Ale", "Riverbend"));
    }

    #[test]
    fn test_parse_tasting_notes() {
        assert_eq!(
            Beer::parse_tasting_notes(" citrus, pine ,, resin "),
            vec!["citrus", "pine", "resin"]
        );
        assert!(Beer::parse_tasting_notes("   ").is_empty());
    }
}
