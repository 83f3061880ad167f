//! Command-line interface for sabor-scout.
//!
//! Provides commands for scanning beer labels, searching and saving beers,
//! rating them, and running the producer tools (recipes, quality reports,
//! marketing copy).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::backend::{GeminiBackend, InlineImage};
use crate::config::{Config, API_KEY_VAR};
use crate::content::{ContentClient, Identification};
use crate::domain::{AnalysisKind, Beer, BeerKey, MarketingBrief, Recipe, RecipeTarget};
use crate::markup::{self, Block, HeadingLevel, Span};
use crate::store::{FavoriteSet, FileStorage, RatingMap};

/// sabor-scout - AI beer discovery companion
#[derive(Parser, Debug)]
#[command(name = "sabor-scout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify a beer from a label photo
    Scan {
        /// Path to the label image (jpeg, png, or webp)
        image: PathBuf,
    },

    /// Submit a beer the scanner did not recognize
    Contribute {
        /// Beer name
        #[arg(long)]
        name: String,

        /// Brewery name
        #[arg(long)]
        brewery: String,

        /// Path to the label image
        #[arg(long)]
        image: PathBuf,

        /// Beer style
        #[arg(long)]
        style: Option<String>,

        /// Alcohol by volume (percent)
        #[arg(long)]
        abv: Option<f64>,

        /// Bitterness (IBU)
        #[arg(long)]
        ibu: Option<f64>,

        /// Comma-separated tasting notes
        #[arg(long)]
        notes: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },

    /// Search for beers by name, style, or brewery
    Search {
        /// Search query
        query: String,

        /// Only show beers you rated at least this highly (0 shows all)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        min_rating: u8,

        /// Lowest ABV to include
        #[arg(long)]
        abv_min: Option<f64>,

        /// Highest ABV to include
        #[arg(long)]
        abv_max: Option<f64>,
    },

    /// Suggest food pairings for a beer
    Pair {
        /// Beer name
        name: String,

        /// Brewery name
        brewery: String,

        /// Beer style, used when the beer is not in your favorites
        #[arg(short, long)]
        style: Option<String>,

        /// Comma-separated tasting notes, used when the beer is not in
        /// your favorites
        #[arg(long)]
        notes: Option<String>,
    },

    /// Get a short lesson on a brewing topic
    Learn {
        /// Topic, e.g. "IPA" or "decoction mashing"
        topic: String,

        /// Emit HTML instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Find craft beer events near a location
    Events {
        /// City or area to search around
        location: String,
    },

    /// Draft a recipe hitting target numbers
    Recipe {
        /// Beer style to brew
        #[arg(long)]
        style: String,

        /// Target ABV (percent)
        #[arg(long)]
        abv: f64,

        /// Target IBU
        #[arg(long)]
        ibu: f64,

        /// Desired flavor profile
        #[arg(long)]
        flavor: String,
    },

    /// Analyze a beer sample photo for quality issues
    Quality {
        /// Path to the sample image
        image: PathBuf,

        /// What to look for
        #[arg(short, long, value_enum)]
        analysis: AnalysisArg,

        /// Emit HTML instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Generate marketing copy for a beer
    Marketing {
        /// Beer name
        #[arg(long)]
        name: String,

        /// Beer style
        #[arg(long)]
        style: String,

        /// Tasting notes to lean on
        #[arg(long)]
        notes: String,

        /// Who the copy should speak to
        #[arg(long)]
        audience: String,
    },

    /// Rate a beer from 1 to 5
    Rate {
        /// Beer name
        name: String,

        /// Brewery name
        brewery: String,

        /// Stars (1-5)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        stars: u8,
    },

    /// Manage saved beers
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Show resolved configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommands {
    /// List saved beers
    List,

    /// Save a beer
    Add {
        /// Beer name
        name: String,

        /// Brewery name
        brewery: String,

        /// Beer style
        #[arg(short, long)]
        style: Option<String>,

        /// Alcohol by volume (percent)
        #[arg(long)]
        abv: Option<f64>,
    },

    /// Remove a saved beer
    Remove {
        /// Beer name
        name: String,

        /// Brewery name
        brewery: String,
    },
}

/// Analysis type for the quality command (maps to AnalysisKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AnalysisArg {
    /// Haze and clarity assessment
    #[value(alias = "clarity")]
    Turbidity,

    /// Floaters, sediment, and other visible issues
    #[value(alias = "defects")]
    VisualDefects,
}

impl From<AnalysisArg> for AnalysisKind {
    fn from(arg: AnalysisArg) -> Self {
        match arg {
            AnalysisArg::Turbidity => AnalysisKind::Turbidity,
            AnalysisArg::VisualDefects => AnalysisKind::VisualDefects,
        }
    }
}

/// Client-side filters applied to search results.
///
/// Mirrors the search surface's filter panel: a minimum saved rating
/// (0 disables the check) and an optional ABV window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFilter {
    pub min_rating: u8,
    pub abv_min: Option<f64>,
    pub abv_max: Option<f64>,
}

impl SearchFilter {
    /// Whether a beer passes the filters, reading its rating from the map
    pub fn passes(&self, beer: &Beer, ratings: &RatingMap) -> bool {
        let rating_ok =
            self.min_rating == 0 || ratings.get(&beer.key()) >= self.min_rating;
        let abv_ok = beer.abv >= self.abv_min.unwrap_or(0.0)
            && beer.abv <= self.abv_max.unwrap_or(100.0);
        rating_ok && abv_ok
    }
}

/// One search result resolved against the stores
struct SearchHit<'a> {
    beer: &'a Beer,
    rating: u8,
    saved: bool,
}

/// Apply the filters, then look up each surviving result's saved rating
/// and favorite status
fn resolve_hits<'a>(
    beers: &'a [Beer],
    filter: SearchFilter,
    ratings: &RatingMap,
    favorites: &FavoriteSet,
) -> Vec<SearchHit<'a>> {
    beers
        .iter()
        .filter(|beer| filter.passes(beer, ratings))
        .map(|beer| {
            let key = beer.key();
            SearchHit {
                beer,
                rating: ratings.get(&key),
                saved: favorites.contains(&key),
            }
        })
        .collect()
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Scan { image } => scan_label(&image).await,
            Commands::Contribute {
                name,
                brewery,
                image,
                style,
                abv,
                ibu,
                notes,
                description,
            } => {
                let mut beer = Beer::new(name, brewery);
                if let Some(style) = style {
                    beer = beer.with_style(style);
                }
                if let Some(abv) = abv {
                    beer = beer.with_abv(abv);
                }
                if let Some(ibu) = ibu {
                    beer = beer.with_ibu(ibu);
                }
                if let Some(notes) = notes {
                    beer = beer.with_tasting_notes(Beer::parse_tasting_notes(&notes));
                }
                if let Some(description) = description {
                    beer = beer.with_description(description);
                }
                contribute(beer, &image).await
            }
            Commands::Search {
                query,
                min_rating,
                abv_min,
                abv_max,
            } => {
                let filter = SearchFilter {
                    min_rating,
                    abv_min,
                    abv_max,
                };
                search_beers(&query, filter).await
            }
            Commands::Pair {
                name,
                brewery,
                style,
                notes,
            } => pair_beer(&name, &brewery, style, notes).await,
            Commands::Learn { topic, html } => learn_topic(&topic, html).await,
            Commands::Events { location } => list_events(&location).await,
            Commands::Recipe {
                style,
                abv,
                ibu,
                flavor,
            } => draft_recipe(style, abv, ibu, flavor).await,
            Commands::Quality {
                image,
                analysis,
                html,
            } => analyze_quality(&image, analysis, html).await,
            Commands::Marketing {
                name,
                style,
                notes,
                audience,
            } => write_marketing(name, style, notes, audience).await,
            Commands::Rate {
                name,
                brewery,
                stars,
            } => rate_beer(&name, &brewery, stars).await,
            Commands::Favorites { command } => execute_favorites(command).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Storage provider rooted at the configured data directory
fn storage(config: &Config) -> Arc<FileStorage> {
    Arc::new(FileStorage::new(config.data_dir.clone()))
}

/// Content client, refusing to start without an API key
fn client(config: &Config) -> Result<ContentClient<GeminiBackend>> {
    if !config.has_api_key() {
        anyhow::bail!("No API key configured. Set {} to use this command", API_KEY_VAR);
    }
    Ok(ContentClient::from_config(config))
}

/// Read an image file and wrap it for inline transport
fn load_image(path: &Path) -> Result<InlineImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image: {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let image = match ext.as_deref() {
        Some("png") => InlineImage::from_bytes("image/png", &bytes),
        Some("webp") => InlineImage::from_bytes("image/webp", &bytes),
        _ => InlineImage::jpeg(&bytes),
    };

    Ok(image)
}

/// Identify a beer from a label photo
async fn scan_label(image_path: &Path) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;
    let image = load_image(image_path)?;

    eprintln!("🔍 Scanning {}...", image_path.display());

    match client.identify(image).await? {
        Identification::Recognized(beer) => {
            let storage = storage(&config);
            let favorites = FavoriteSet::load(storage.clone()).await;
            let ratings = RatingMap::load(storage).await;

            let key = beer.key();
            println!();
            print_beer(&beer, ratings.get(&key), favorites.contains(&key));
        }
        Identification::Unknown => {
            eprintln!("Label not recognized.");
            eprintln!("Try a clearer photo, or add the beer with 'sabor-scout contribute'.");
        }
    }

    Ok(())
}

/// Submit a manual beer contribution
async fn contribute(beer: Beer, image_path: &Path) -> Result<()> {
    let config = Config::from_env();
    // Contributions are accepted offline, so no API key check here
    let client = ContentClient::from_config(&config);

    let image = load_image(image_path)?;

    client.submit_contribution(&beer, &image).await?;

    eprintln!("✅ Contribution submitted: {} by {}", beer.name, beer.brewery);
    eprintln!("   It will appear in search once reviewed.");

    Ok(())
}

/// Search for beers, filtered by saved ratings and ABV range
async fn search_beers(query: &str, filter: SearchFilter) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;

    eprintln!("🔎 Searching for \"{}\"...", query);
    let beers = client.search(query).await?;

    let store = storage(&config);
    let favorites = FavoriteSet::load(store.clone()).await;
    let ratings = RatingMap::load(store).await;

    let hits = resolve_hits(&beers, filter, &ratings, &favorites);

    if hits.is_empty() {
        println!("No results for: {}", query);
        return Ok(());
    }

    println!(
        "{:<28} {:<22} {:<18} {:>5} {:>7} {:>6}",
        "NAME", "BREWERY", "STYLE", "ABV", "RATING", "SAVED"
    );
    println!("{}", "-".repeat(91));

    for hit in &hits {
        let rating_str = if hit.rating > 0 {
            hit.rating.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<28} {:<22} {:<18} {:>4}% {:>7} {:>6}",
            truncate(&hit.beer.name, 26),
            truncate(&hit.beer.brewery, 20),
            truncate(&hit.beer.style, 16),
            hit.beer.abv,
            rating_str,
            if hit.saved { "*" } else { "" }
        );
    }

    println!("\nTotal: {} beer(s)", hits.len());

    Ok(())
}

/// Suggest food pairings for a beer
async fn pair_beer(
    name: &str,
    brewery: &str,
    style: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;

    let key = BeerKey::new(name, brewery);
    let favorites = FavoriteSet::load(storage(&config)).await;

    // A saved entry carries style and tasting notes, which make for a
    // better prompt than the bare name
    let beer = match favorites.get(&key) {
        Some(saved) => saved.clone(),
        None => {
            let mut beer = Beer::new(name, brewery);
            if let Some(style) = style {
                beer = beer.with_style(style);
            }
            if let Some(notes) = notes {
                beer = beer.with_tasting_notes(Beer::parse_tasting_notes(&notes));
            }
            beer
        }
    };

    eprintln!("🍽️  Finding pairings for {}...", beer.name);
    let pairings = client.food_pairings(&beer).await?;

    for pairing in &pairings {
        println!("- {}", pairing);
    }

    Ok(())
}

/// Print a short lesson on a brewing topic
async fn learn_topic(topic: &str, as_html: bool) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;

    eprintln!("📚 Looking up: {}", topic);
    let lesson = client.education(topic).await?;

    let blocks = markup::render_lesson(&lesson);
    print_rendered(&blocks, as_html);

    Ok(())
}

/// List craft beer events near a location
async fn list_events(location: &str) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;

    eprintln!("📅 Finding events near {}...", location);
    let events = client.local_events(location).await?;

    if events.is_empty() {
        println!("No events found near: {}", location);
        return Ok(());
    }

    for event in &events {
        println!("{} ({})", event.name, event.date);
        println!("  {}", event.location);
        println!("  {}", event.description);
        if let Some(url) = &event.url {
            println!("  {}", url);
        }
        println!();
    }

    Ok(())
}

/// Draft a recipe hitting the target numbers
async fn draft_recipe(style: String, abv: f64, ibu: f64, flavor: String) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;

    eprintln!("🍺 Drafting a {} recipe...", style);

    let target = RecipeTarget {
        style,
        abv,
        ibu,
        flavor_profile: flavor,
    };
    let recipe = client.optimize_recipe(&target).await?;

    print_recipe(&recipe);

    Ok(())
}

/// Analyze a beer sample photo for quality issues
async fn analyze_quality(image_path: &Path, analysis: AnalysisArg, as_html: bool) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;
    let image = load_image(image_path)?;

    let kind = AnalysisKind::from(analysis);
    eprintln!("🔬 Running {} analysis on {}...", kind, image_path.display());

    let report = client.quality_report(image, kind).await?;

    let blocks = markup::render_report(&report);
    print_rendered(&blocks, as_html);

    Ok(())
}

/// Generate marketing copy for a beer
async fn write_marketing(
    name: String,
    style: String,
    notes: String,
    audience: String,
) -> Result<()> {
    let config = Config::from_env();
    let client = client(&config)?;

    eprintln!("📣 Generating marketing copy for {}...", name);

    let brief = MarketingBrief {
        beer_name: name,
        style,
        tasting_notes: notes,
        target_audience: audience,
    };
    let copy = client.marketing_copy(&brief).await?;

    println!("{}", copy);

    Ok(())
}

/// Rate a beer from 1 to 5 stars
async fn rate_beer(name: &str, brewery: &str, stars: u8) -> Result<()> {
    let config = Config::from_env();
    let key = BeerKey::new(name, brewery);

    let mut ratings = RatingMap::load(storage(&config)).await;
    ratings.set(&key, stars).await;

    eprintln!("✅ Rated {} by {}: {}/5", name, brewery, stars);

    Ok(())
}

/// Execute favorites subcommands
async fn execute_favorites(command: FavoriteCommands) -> Result<()> {
    let config = Config::from_env();
    let mut favorites = FavoriteSet::load(storage(&config)).await;

    match command {
        FavoriteCommands::List => {
            if favorites.is_empty() {
                println!("No favorites yet. Scan or search for beers to save them.");
                return Ok(());
            }

            println!("{:<28} {:<22} {:<18} {:>5}", "NAME", "BREWERY", "STYLE", "ABV");
            println!("{}", "-".repeat(76));

            for beer in favorites.beers() {
                println!(
                    "{:<28} {:<22} {:<18} {:>4}%",
                    truncate(&beer.name, 26),
                    truncate(&beer.brewery, 20),
                    truncate(&beer.style, 16),
                    beer.abv
                );
            }

            println!("\nTotal: {} beer(s)", favorites.len());
        }
        FavoriteCommands::Add {
            name,
            brewery,
            style,
            abv,
        } => {
            let mut beer = Beer::new(name, brewery);
            if let Some(style) = style {
                beer = beer.with_style(style);
            }
            if let Some(abv) = abv {
                beer = beer.with_abv(abv);
            }

            let key = beer.key();
            if favorites.add(beer).await {
                eprintln!("✅ Saved {} by {}", key.name, key.brewery);
            } else {
                eprintln!("Already saved: {} by {}", key.name, key.brewery);
            }
        }
        FavoriteCommands::Remove { name, brewery } => {
            let key = BeerKey::new(&name, &brewery);
            match favorites.remove(&key).await {
                Some(beer) => eprintln!("Removed {} by {}", beer.name, beer.brewery),
                None => eprintln!("Not in favorites: {} by {}", name, brewery),
            }
        }
    }

    Ok(())
}

/// Show the resolved configuration
async fn show_config() -> Result<()> {
    let config = Config::from_env();

    println!("Sabor Scout configuration");
    println!("{}", "-".repeat(40));
    println!(
        "API key:  {}",
        if config.has_api_key() {
            "set"
        } else {
            "not set (export GEMINI_API_KEY)"
        }
    );
    println!("Model:    {}", config.model);
    println!("Data dir: {}", config.data_dir.display());
    println!();
    println!("Records:");
    println!(
        "  Favorites: {}",
        config.data_dir.join("favorites.json").display()
    );
    println!(
        "  Ratings:   {}",
        config.data_dir.join("ratings.json").display()
    );

    Ok(())
}

/// Print a beer detail card with its saved rating and favorite status
fn print_beer(beer: &Beer, rating: u8, saved: bool) {
    println!("{} by {}", beer.name, beer.brewery);
    println!("{}", "-".repeat(40));
    println!("Style: {}", beer.style);
    match beer.ibu {
        Some(ibu) => println!("ABV: {}%  IBU: {}", beer.abv, ibu),
        None => println!("ABV: {}%", beer.abv),
    }
    if !beer.tasting_notes.is_empty() {
        println!("Tasting notes: {}", beer.tasting_notes.join(", "));
    }
    println!();
    println!("{}", beer.description);
    println!();

    let stars = if rating > 0 {
        format!("{}/5", rating)
    } else {
        "unrated".to_string()
    };
    if saved {
        println!("Rating: {} (in favorites)", stars);
    } else {
        println!("Rating: {}", stars);
    }
}

/// Print a recipe in cookbook layout
fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.recipe_name);
    println!("{}", "=".repeat(recipe.recipe_name.chars().count()));
    println!();

    println!("Malt bill:");
    for malt in &recipe.malt_bill {
        println!("  - {}", malt);
    }
    println!();

    println!("Hop schedule:");
    for hop in &recipe.hop_schedule {
        println!("  - {}", hop);
    }
    println!();

    println!("Yeast: {}", recipe.yeast);
    println!();

    println!("Instructions:");
    println!("{}", recipe.instructions);
}

/// Print rendered blocks as HTML or plain text
fn print_rendered(blocks: &[Block], as_html: bool) {
    if as_html {
        println!("{}", markup::html::to_html(blocks));
    } else {
        print_blocks(blocks);
    }
}

/// Terminal rendering of the block AST
fn print_blocks(blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                let text = span_text(spans);
                let underline = match level {
                    HeadingLevel::H2 => "=",
                    HeadingLevel::H3 => "-",
                };
                println!();
                println!("{}", text);
                println!("{}", underline.repeat(text.chars().count()));
            }
            Block::List { items } => {
                for item in items {
                    println!("  - {}", span_text(item));
                }
            }
            Block::Paragraph { spans } => {
                println!("{}", span_text(spans));
            }
        }
    }
}

/// Flatten spans to plain text; bold emphasis is an HTML-only affordance
fn span_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => text.as_str(),
            Span::Strong(text) => text.as_str(),
        })
        .collect()
}

/// Shorten a value to fit a table column
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}
