//! Typed client for the generative backend.
//!
//! Each operation owns its prompt and, for structured calls, its declared
//! response shape. The backend returns raw text; structured operations
//! decode it into domain types and any mismatch surfaces as
//! [`ContentError::Shape`]. Prose operations hand their text to the markup
//! renderer untouched.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::backend::{
    BackendError, GenerateRequest, GenerativeBackend, GeminiBackend, InlineImage, Schema,
};
use crate::config::Config;
use crate::domain::{AnalysisKind, Beer, BeerEvent, MarketingBrief, Recipe, RecipeTarget};

/// Reserved name the model returns when it cannot identify a label.
pub const UNKNOWN_BEER_NAME: &str = "Unknown Beer";

/// Failures from content operations.
///
/// Callers present `Display` as the single user-facing message; the variant
/// split exists for diagnostic logging. Persistence problems never surface
/// here, the stores absorb them at their own boundary.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The backend call failed: transport, error status, or an unreadable
    /// envelope
    #[error("model backend call failed: {0}")]
    Backend(#[from] BackendError),

    /// The model answered, but not in the declared shape
    #[error("received an invalid response from the model: {0}")]
    Shape(#[from] serde_json::Error),

    /// The request was attempted without a required input
    #[error("missing required input: {0}")]
    Precondition(&'static str),
}

/// Outcome of a label identification.
///
/// The model signals "could not identify" with a reserved sentinel name;
/// the client folds that into [`Identification::Unknown`] so the fallback
/// to manual contribution is an explicit branch rather than a string
/// comparison at every call site.
#[derive(Debug, Clone, PartialEq)]
pub enum Identification {
    /// The label was recognized and described
    Recognized(Beer),

    /// The label could not be identified; offer manual contribution
    Unknown,
}

/// A single generation request, one variant per operation.
#[derive(Debug, Clone)]
pub enum ContentRequest {
    /// Identify a beer from a label image
    Identify { image: InlineImage },

    /// Free-text beer search
    Search { query: String },

    /// Food pairing suggestions for a known beer
    Pairings { beer: Beer },

    /// Educational prose on a topic
    Education { topic: String },

    /// Beer events near a location
    Events { location: String },

    /// Recipe generation against brewing targets
    Recipe(RecipeTarget),

    /// Quality inspection of a sample image
    Quality {
        image: InlineImage,
        analysis: AnalysisKind,
    },

    /// Marketing copy from a brief
    Marketing(MarketingBrief),
}

/// Typed result of [`ContentClient::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentResult {
    Identification(Identification),
    Beers(Vec<Beer>),
    Pairings(Vec<String>),
    Events(Vec<BeerEvent>),
    Recipe(Recipe),
    /// Prose markdown (education, quality report, marketing copy)
    Text(String),
}

/// Client for content generation, generic over the backend seam.
pub struct ContentClient<B> {
    backend: B,
}

impl ContentClient<GeminiBackend> {
    /// Client over the production Gemini backend described by `config`
    pub fn from_config(config: &Config) -> Self {
        let api_key = config.api_key.clone().unwrap_or_default();
        Self::new(GeminiBackend::new(api_key, config.model.clone()))
    }
}

impl<B: GenerativeBackend> ContentClient<B> {
    /// Wrap a backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Run one request, returning the result tagged by operation
    pub async fn execute(&self, request: ContentRequest) -> Result<ContentResult, ContentError> {
        match request {
            ContentRequest::Identify { image } => {
                Ok(ContentResult::Identification(self.identify(image).await?))
            }
            ContentRequest::Search { query } => Ok(ContentResult::Beers(self.search(&query).await?)),
            ContentRequest::Pairings { beer } => {
                Ok(ContentResult::Pairings(self.food_pairings(&beer).await?))
            }
            ContentRequest::Education { topic } => {
                Ok(ContentResult::Text(self.education(&topic).await?))
            }
            ContentRequest::Events { location } => {
                Ok(ContentResult::Events(self.local_events(&location).await?))
            }
            ContentRequest::Recipe(target) => {
                Ok(ContentResult::Recipe(self.optimize_recipe(&target).await?))
            }
            ContentRequest::Quality { image, analysis } => {
                Ok(ContentResult::Text(self.quality_report(image, analysis).await?))
            }
            ContentRequest::Marketing(brief) => {
                Ok(ContentResult::Text(self.marketing_copy(&brief).await?))
            }
        }
    }

    /// Identify a beer from a label photograph.
    ///
    /// A sentinel-named result maps to [`Identification::Unknown`]; it is
    /// not an error.
    #[instrument(skip(self, image))]
    pub async fn identify(&self, image: InlineImage) -> Result<Identification, ContentError> {
        let prompt = "Analyze the beer label in the image and provide details about the beer. \
                      If you cannot identify it, return \"Unknown Beer\" for the name and empty \
                      strings for other fields.";

        let request = GenerateRequest::text(prompt)
            .with_image(image)
            .with_schema(beer_schema());

        let beer: Beer = self.structured(request).await?;

        if beer.name == UNKNOWN_BEER_NAME {
            info!("label not recognized");
            return Ok(Identification::Unknown);
        }

        info!("identified beer: {}", beer.key());
        Ok(Identification::Recognized(beer))
    }

    /// Search for beers matching a free-text query
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Beer>, ContentError> {
        if query.trim().is_empty() {
            return Err(ContentError::Precondition("search query is empty"));
        }

        let prompt = format!(
            "Find beers matching the query: \"{}\". Return up to 10 results. \
             Provide fictional but realistic data for each beer.",
            query
        );

        let request = GenerateRequest::text(prompt).with_schema(search_schema());
        let found: SearchEnvelope = self.structured(request).await?;

        info!("search returned {} beers", found.beers.len());
        Ok(found.beers)
    }

    /// Suggest food pairings for a beer
    #[instrument(skip(self, beer))]
    pub async fn food_pairings(&self, beer: &Beer) -> Result<Vec<String>, ContentError> {
        let prompt = format!(
            "Provide 3-5 food pairing suggestions for a {} called \"{}\" from {}. \
             It has tasting notes of: {}.",
            beer.style,
            beer.name,
            beer.brewery,
            beer.tasting_notes.join(", ")
        );

        let request = GenerateRequest::text(prompt).with_schema(pairings_schema());
        let result: PairingsEnvelope = self.structured(request).await?;
        Ok(result.pairings)
    }

    /// Explain a topic for a beer enthusiast, as markdown prose
    #[instrument(skip(self))]
    pub async fn education(&self, topic: &str) -> Result<String, ContentError> {
        if topic.trim().is_empty() {
            return Err(ContentError::Precondition("topic is empty"));
        }

        let prompt = format!(
            "Explain the topic \"{}\" in a clear and concise way for a beer enthusiast. \
             Use markdown for formatting, including headers (##) and bullet points (*).",
            topic
        );

        self.prose(GenerateRequest::text(prompt)).await
    }

    /// Find beer events near a location.
    ///
    /// A blank location means there is nowhere to look: the lookup returns
    /// an empty list without calling the backend.
    #[instrument(skip(self))]
    pub async fn local_events(&self, location: &str) -> Result<Vec<BeerEvent>, ContentError> {
        if location.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = format!(
            "Find upcoming (fictional) beer-related events near {}. Return up to 5 events.",
            location
        );

        let request = GenerateRequest::text(prompt).with_schema(events_schema());
        let found: EventsEnvelope = self.structured(request).await?;
        Ok(found.events)
    }

    /// Generate a 5-gallon all-grain recipe against the given targets
    #[instrument(skip(self, target))]
    pub async fn optimize_recipe(&self, target: &RecipeTarget) -> Result<Recipe, ContentError> {
        let prompt = format!(
            "Generate a 5-gallon all-grain beer recipe for a {} with a target ABV of {}%, \
             IBU of {}, and a flavor profile described as \"{}\". \
             Provide a creative name for the recipe.",
            target.style, target.abv, target.ibu, target.flavor_profile
        );

        let request = GenerateRequest::text(prompt).with_schema(recipe_schema());
        self.structured(request).await
    }

    /// Inspect a sample image, returning a markdown report
    #[instrument(skip(self, image))]
    pub async fn quality_report(
        &self,
        image: InlineImage,
        analysis: AnalysisKind,
    ) -> Result<String, ContentError> {
        let prompt = match analysis {
            AnalysisKind::Turbidity => {
                "Analyze the provided beer sample image for turbidity and clarity. \
                 Provide a report in markdown format. Comment on haze, clarity, and \
                 any visible particles."
            }
            AnalysisKind::VisualDefects => {
                "Analyze the provided beer sample image for visual defects. \
                 Look for floaters, sediment, or other issues. \
                 Provide a report in markdown format."
            }
        };

        self.prose(GenerateRequest::text(prompt).with_image(image)).await
    }

    /// Write marketing copy for a beer, as markdown prose
    #[instrument(skip(self, brief))]
    pub async fn marketing_copy(&self, brief: &MarketingBrief) -> Result<String, ContentError> {
        let prompt = format!(
            "Generate engaging marketing copy for a new beer.\n    - Name: {}\n    \
             - Style: {}\n    - Tasting Notes: {}\n    - Target Audience: {}\n    \n    \
             Provide a short description and a longer, more evocative one. \
             Format the response as markdown.",
            brief.beer_name, brief.style, brief.tasting_notes, brief.target_audience
        );

        self.prose(GenerateRequest::text(prompt)).await
    }

    /// Submit a manual beer contribution.
    ///
    /// There is no community backend yet: the submission is validated and
    /// logged, then reported as accepted.
    pub async fn submit_contribution(
        &self,
        beer: &Beer,
        image: &InlineImage,
    ) -> Result<(), ContentError> {
        if beer.name.trim().is_empty() || beer.brewery.trim().is_empty() {
            return Err(ContentError::Precondition(
                "contribution needs a beer name and a brewery",
            ));
        }
        if image.data.is_empty() {
            return Err(ContentError::Precondition("contribution needs a label image"));
        }

        info!("accepted beer contribution: {}", beer.key());
        Ok(())
    }

    /// Run a schema-constrained request and decode the declared shape
    async fn structured<T: DeserializeOwned>(
        &self,
        request: GenerateRequest,
    ) -> Result<T, ContentError> {
        let text = self.backend.generate(request).await?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!("model response did not match the declared shape: {}", text);
                Err(ContentError::Shape(err))
            }
        }
    }

    /// Run a free-form request, returning prose untouched
    async fn prose(&self, request: GenerateRequest) -> Result<String, ContentError> {
        Ok(self.backend.generate(request).await?)
    }
}

/// Shape of a single beer, shared by identification and search results
fn beer_schema() -> Schema {
    Schema::object()
        .property("name", Schema::string())
        .property("brewery", Schema::string())
        .property("style", Schema::string())
        .property("abv", Schema::number())
        .property("ibu", Schema::number().nullable())
        .property("tastingNotes", Schema::array(Schema::string()))
        .property("description", Schema::string())
        .required(["name", "brewery", "style", "abv", "tastingNotes", "description"])
}

fn pairings_schema() -> Schema {
    Schema::object()
        .property("pairings", Schema::array(Schema::string()))
        .required(["pairings"])
}

fn search_schema() -> Schema {
    Schema::object()
        .property("beers", Schema::array(beer_schema()))
        .required(["beers"])
}

fn events_schema() -> Schema {
    Schema::object()
        .property(
            "events",
            Schema::array(
                Schema::object()
                    .property("name", Schema::string())
                    .property("date", Schema::string())
                    .property("location", Schema::string())
                    .property("description", Schema::string())
                    .property("url", Schema::string().nullable())
                    .required(["name", "date", "location", "description"]),
            ),
        )
        .required(["events"])
}

fn recipe_schema() -> Schema {
    Schema::object()
        .property("recipeName", Schema::string())
        .property("maltBill", Schema::array(Schema::string()))
        .property("hopSchedule", Schema::array(Schema::string()))
        .property("yeast", Schema::string())
        .property("instructions", Schema::string())
        .required(["recipeName", "maltBill", "hopSchedule", "yeast", "instructions"])
}

#[derive(Debug, Deserialize)]
struct PairingsEnvelope {
    pairings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    beers: Vec<Beer>,
}

#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    events: Vec<BeerEvent>,
}
