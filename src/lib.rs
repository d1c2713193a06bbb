//! Catalog-Scraper: a sequential catalog crawler
//!
//! This crate walks a paginated catalog site (categories, listing pages, item
//! pages), extracts one structured record per item, archives each item's
//! image, and writes one CSV export per category.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Catalog-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Structural errors raised while reading a fetched page
///
/// Any of these collapses the enclosing extraction step: a listing page stops
/// pagination, an item page yields no record at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing element `{0}`")]
    MissingElement(&'static str),

    #[error("missing attribute `{attr}` on `{element}`")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("cannot resolve link `{href}`: {reason}")]
    InvalidLink { href: String, reason: String },

    #[error("invalid selector `{0}`")]
    InvalidSelector(&'static str),
}

/// Result type alias for Catalog-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_scrape, Coordinator};
pub use output::{ItemRecord, RunStatistics};
