//! Category discovery from the catalog home page
//!
//! The home page carries a navigation list whose first entry is the
//! catch-all ("all books") link. Every following entry is one category.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::selector;
use crate::url::{category_slug, display_name, resolve_link};
use crate::{ParseError, ParseResult};
use reqwest::Client;
use scraper::Html;
use url::Url;

/// A category listing discovered on the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    /// Absolute URL of the category's first listing page
    pub url: Url,

    /// Second-to-last path segment of `url`, used as the export file name
    pub slug: String,

    /// Human-readable name for progress output
    pub name: String,
}

impl CategoryRef {
    /// Builds a category reference from its listing URL
    pub fn from_url(url: Url) -> Self {
        let slug = category_slug(&url);
        let name = display_name(&slug);
        Self { url, slug, name }
    }
}

/// Extracts the category listing URLs from a home page
///
/// Entries are returned in navigation order with the first (catch-all) entry
/// removed. Each link is resolved against `base_url`.
///
/// # Errors
///
/// Fails if the navigation block is missing or an entry has no link.
pub fn parse_categories(html: &str, base_url: &Url) -> ParseResult<Vec<Url>> {
    let document = Html::parse_document(html);
    let nav_selector = selector("ul.nav.nav-list")?;
    let entry_selector = selector("li")?;
    let link_selector = selector("a")?;

    let nav = document
        .select(&nav_selector)
        .next()
        .ok_or(ParseError::MissingElement("ul.nav.nav-list"))?;

    nav.select(&entry_selector)
        .skip(1)
        .map(|entry| -> ParseResult<Url> {
            let link = entry
                .select(&link_selector)
                .next()
                .ok_or(ParseError::MissingElement("li > a"))?;
            let href = link.value().attr("href").ok_or(ParseError::MissingAttribute {
                element: "a",
                attr: "href",
            })?;
            resolve_link(base_url, href)
        })
        .collect()
}

/// Fetches the home page and returns the categories it lists
///
/// A failed fetch, a missing navigation block or a malformed entry all yield
/// an empty list; the caller treats that as "nothing to do".
pub async fn discover_categories(client: &Client, home_url: &Url) -> Vec<CategoryRef> {
    let Some((final_url, body)) = fetch_page(client, home_url).await else {
        return Vec::new();
    };

    let urls = match parse_categories(&body, &final_url) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("Failed to read categories from {}: {}", home_url, e);
            return Vec::new();
        }
    };

    let categories: Vec<CategoryRef> = urls.into_iter().map(CategoryRef::from_url).collect();

    tracing::info!("Discovered {} categories on {}", categories.len(), home_url);
    categories
}
