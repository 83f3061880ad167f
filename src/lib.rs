//! sabor-scout - AI beer discovery companion
//!
//! Scans beer labels, searches styles, and runs producer tools against a
//! schema-constrained Gemini backend.
//!
//! # Architecture
//!
//! The crate is built around three seams:
//! - Model calls go through the `GenerativeBackend` trait; prompts and
//!   response schemas live in the content client, transport in the backend
//! - Model prose is rendered to a block AST before any HTML exists, so
//!   nothing the model says reaches a page unescaped
//! - Favorites and ratings are write-through stores over a pluggable
//!   storage provider; consumers observe changes instead of polling
//!
//! # Modules
//!
//! - `backend`: Gemini transport, request assembly, response schemas
//! - `content`: prompts and typed decoding for each operation
//! - `domain`: data structures (Beer, Recipe, BeerEvent)
//! - `markup`: line-oriented markdown rendering to safe blocks
//! - `store`: persisted favorites and ratings
//! - `surface`: request gating for interactive frontends
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Identify a label photo
//! sabor-scout scan label.jpg
//!
//! # Search, filtered by your own ratings
//! sabor-scout search "hazy IPA" --min-rating 4
//!
//! # Producer tools
//! sabor-scout recipe --style "West Coast IPA" --abv 6.5 --ibu 60 \
//!     --flavor "pine and grapefruit"
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod content;
pub mod domain;
pub mod markup;
pub mod store;
pub mod surface;

// Re-export main types at crate root for convenience
pub use backend::{BackendError, GeminiBackend, GenerateRequest, GenerativeBackend, InlineImage};
pub use config::Config;
pub use content::{ContentClient, ContentError, Identification};
pub use domain::{AnalysisKind, Beer, BeerEvent, BeerKey, MarketingBrief, Recipe, RecipeTarget};
pub use store::{FavoriteSet, FileStorage, MemoryStorage, RatingMap, Storage};
pub use surface::{RequestGate, RequestTicket};
