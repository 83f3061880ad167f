//! Producer-side types: recipe generation, quality analysis, marketing.

use serde::{Deserialize, Serialize};

/// A generated 5-gallon all-grain recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Creative recipe name
    pub recipe_name: String,

    /// Grain bill entries ("9 lb 2-row pale", ...)
    pub malt_bill: Vec<String>,

    /// Hop additions with timing
    pub hop_schedule: Vec<String>,

    /// Yeast strain
    pub yeast: String,

    /// Brewing instructions
    pub instructions: String,
}

/// Targets a recipe is generated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTarget {
    /// Beer style to brew
    pub style: String,

    /// Target alcohol by volume, percent
    pub abv: f64,

    /// Target bitterness
    pub ibu: f64,

    /// Desired flavor, in the brewer's words
    pub flavor_profile: String,
}

/// Inputs for generating marketing copy for a beer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingBrief {
    /// Beer name
    pub beer_name: String,

    /// Style
    pub style: String,

    /// Tasting descriptors to lean on, free-form
    pub tasting_notes: String,

    /// Who the copy should speak to
    pub target_audience: String,
}

/// Which quality inspection to run on a sample image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Clarity and haze assessment
    Turbidity,

    /// Foreign particles, fill level, packaging damage
    VisualDefects,
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisKind::Turbidity => write!(f, "turbidity"),
            AnalysisKind::VisualDefects => write!(f, "visual-defects"),
        }
    }
}
