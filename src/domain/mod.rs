//! Domain types for sabor-scout.
//!
//! This module contains the core data structures:
//! - Beer: the central item, keyed by name plus brewery
//! - BeerEvent: local event records from the events lookup
//! - Producer types: recipes, quality analysis, marketing briefs

pub mod beer;
pub mod event;
pub mod producer;

// Re-export commonly used types
pub use beer::{Beer, BeerKey};
pub use event::BeerEvent;
pub use producer::{AnalysisKind, MarketingBrief, Recipe, RecipeTarget};
