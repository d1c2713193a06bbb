//! Listing pagination
//!
//! A category's items are spread over listing pages chained by a "next"
//! link. `ListingPages` walks that chain lazily, one fetch per call, and
//! `collect_item_urls` drains it into the ordered list of item links.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::selector;
use crate::url::resolve_link;
use crate::{ParseError, ParseResult};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Item links and continuation found on one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// URL the page was fetched from
    pub url: Url,

    /// Item detail links, in document order
    pub items: Vec<Url>,

    /// The "next page" link, if the page has one
    pub next: Option<Url>,
}

/// Parses one listing page
///
/// Every `article.product_pod` contributes the link in its `h3`; the
/// `li.next` control, when present, supplies the continuation. Links resolve
/// against `page_url`.
///
/// # Errors
///
/// Fails if a product block has no link. A next control without a usable
/// link ends the chain at this page instead.
pub fn parse_listing_page(html: &str, page_url: &Url) -> ParseResult<ListingPage> {
    let document = Html::parse_document(html);
    let product_selector = selector("article.product_pod")?;
    let link_selector = selector("h3 a")?;
    let next_selector = selector("li.next")?;
    let anchor_selector = selector("a")?;

    let mut items = Vec::new();
    for product in document.select(&product_selector) {
        let href = product
            .select(&link_selector)
            .next()
            .ok_or(ParseError::MissingElement("article.product_pod h3 a"))?
            .value()
            .attr("href")
            .ok_or(ParseError::MissingAttribute {
                element: "h3 a",
                attr: "href",
            })?;
        items.push(resolve_link(page_url, href)?);
    }

    let next = match document.select(&next_selector).next() {
        Some(control) => next_link(control, &anchor_selector, page_url),
        None => None,
    };

    Ok(ListingPage {
        url: page_url.clone(),
        items,
        next,
    })
}

fn next_link(control: ElementRef<'_>, anchor_selector: &Selector, page_url: &Url) -> Option<Url> {
    let Some(href) = control
        .select(anchor_selector)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
    else {
        tracing::warn!("Next control on {} has no link; stopping here", page_url);
        return None;
    };

    match resolve_link(page_url, href) {
        Ok(next) => Some(next),
        Err(e) => {
            tracing::warn!("Unusable next link on {}: {}", page_url, e);
            None
        }
    }
}

/// Lazy cursor over a category's listing pages
///
/// Each call to [`ListingPages::next_page`] fetches one page. The walk ends
/// after a page without a next link, or at the first page that fails to fetch
/// or parse; pages already yielded stay valid. Build a new cursor to restart
/// from the first page.
pub struct ListingPages<'a> {
    client: &'a Client,
    cursor: Option<Url>,
    pages_fetched: usize,
}

impl<'a> ListingPages<'a> {
    /// Creates a cursor positioned at the category's first listing page
    pub fn new(client: &'a Client, first_page: Url) -> Self {
        Self {
            client,
            cursor: Some(first_page),
            pages_fetched: 0,
        }
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches and parses the next listing page
    ///
    /// Returns None once the chain is exhausted or broken.
    pub async fn next_page(&mut self) -> Option<ListingPage> {
        let url = self.cursor.take()?;

        let (final_url, body) = fetch_page(self.client, &url).await?;
        self.pages_fetched += 1;

        match parse_listing_page(&body, &final_url) {
            Ok(page) => {
                tracing::debug!(
                    "Listing page {} ({}): {} items, next: {}",
                    self.pages_fetched,
                    page.url,
                    page.items.len(),
                    page.next.as_ref().map(Url::as_str).unwrap_or("none")
                );
                self.cursor = page.next.clone();
                Some(page)
            }
            Err(e) => {
                tracing::error!("Failed to read listing page {}: {}", url, e);
                None
            }
        }
    }
}

/// Collects every item link of a category, following next links to the end
///
/// Output keeps page order then document order, without deduplication.
pub async fn collect_item_urls(client: &Client, first_page: &Url) -> Vec<Url> {
    let mut pages = ListingPages::new(client, first_page.clone());
    let mut item_urls = Vec::new();

    while let Some(page) = pages.next_page().await {
        item_urls.extend(page.items);
    }

    tracing::debug!(
        "Collected {} item links over {} pages from {}",
        item_urls.len(),
        pages.pages_fetched(),
        first_page
    );
    item_urls
}
