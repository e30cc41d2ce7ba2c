//! Riftcrawl: bulk esports match telemetry harvester
//!
//! This crate turns a small crawl configuration (region, split, week selector)
//! into lolesports schedule links, walks schedule and game pages to find the
//! match-history stats links, and downloads the merged game/timeline JSON for
//! every match found.

pub mod config;
pub mod crawler;
pub mod harvester;
pub mod links;
pub mod matches;
pub mod output;

use thiserror::Error;

/// Main error type for Riftcrawl operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Week resolution error: {0}")]
    WeekResolution(String),

    #[error("Batch configuration error: {0}")]
    BatchConfig(String),

    #[error("Missing or invalid selector: {0}")]
    MissingSelector(String),

    #[error("No links were provided to fetch")]
    EmptyInput,

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed match history link: {0}")]
    MalformedMatchLink(String),

    #[error("Expected a JSON object from {url}")]
    NotAnObject { url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Batch {batch} failed ({completed} of {total} batches completed): {source}")]
    BatchFailed {
        batch: usize,
        total: usize,
        completed: usize,
        /// Results of every batch that did finish, keyed by batch index
        partial: Vec<(usize, Vec<String>)>,
        source: Box<HarvestError>,
    },

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required section [{0}]")]
    MissingSection(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid region '{0}': must be one of all, na, eu, lms, lck, acad or academy")]
    InvalidRegion(String),

    #[error("Invalid split '{0}': must be one of spring, summer or all")]
    InvalidSplit(String),

    #[error("Invalid base extension: {0}")]
    InvalidBaseExtension(String),
}

/// Non-fatal conditions reported alongside a successful result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// No year was configured, so the current calendar year was used
    YearDefaulted(i32),

    /// Link cleanup removed every generated link
    AllLinksRemoved,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::YearDefaulted(year) => write!(
                f,
                "year was set to the current year ({}); set `year` in the config for another season",
                year
            ),
            Advisory::AllLinksRemoved => write!(
                f,
                "all links were removed during cleanup; this usually means NA, EU or Academy \
                 was combined with a bracket such as Wild%20Card or Round%201"
            ),
        }
    }
}

/// A value together with the advisories raised while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advised<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Advised<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    pub fn with_advisory(mut self, advisory: Advisory) -> Self {
        self.advisories.push(advisory);
        self
    }
}

/// Result type alias for Riftcrawl operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlConfig, Region, Split, WeekSpec};
pub use harvester::Harvester;
pub use links::generate;
pub use matches::{GameJsonPair, JsonFetcher, MergedMatchRecord};
