//! Configuration module for Catalog-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and applying command-line overrides on top of them.
//!
//! # Example
//!
//! ```no_run
//! use catalog_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Exports go to: {}", config.output.output_dir);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_START_URL};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

impl Config {
    /// Applies command-line overrides and re-validates the result
    pub fn with_overrides(
        mut self,
        start_url: Option<String>,
        output_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(start_url) = start_url {
            self.crawler.start_url = start_url;
        }
        if let Some(output_dir) = output_dir {
            self.output.output_dir = output_dir;
        }
        validation::validate(&self)?;
        Ok(self)
    }

    /// Directory the per-category CSV files are written to
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.output_dir)
    }

    /// Request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.crawler.request_timeout_secs.map(Duration::from_secs)
    }
}
