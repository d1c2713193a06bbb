//! Crawler module for catalog traversal and extraction
//!
//! This module contains the scraping pipeline:
//! - HTTP fetching (one attempt per request)
//! - Category discovery on the home page
//! - Listing pagination per category
//! - Item extraction and image archiving
//! - Overall run coordination

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod paginator;

pub use coordinator::{run_scrape, Coordinator};
pub use discovery::{discover_categories, parse_categories, CategoryRef};
pub use extractor::{extract_item, parse_item, strip_currency, Extraction, ItemDetails};
pub use fetcher::{
    build_http_client, fetch_bytes, fetch_page, fetch_url, user_agent_string, FetchResult,
};
pub use paginator::{collect_item_urls, parse_listing_page, ListingPage, ListingPages};

use crate::{ParseError, ParseResult};
use scraper::Selector;

/// Compiles a CSS selector used by the page parsers
pub(crate) fn selector(css: &'static str) -> ParseResult<Selector> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css))
}
