//! Item detail page extraction
//!
//! Reads the fixed set of fields from an item page, archives the item's image
//! and assembles the `ItemRecord`. Extraction is all-or-nothing: the first
//! missing field aborts the item and no partial record is produced.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::selector;
use crate::output::{image_relative_path, ArchiveOutcome, ImageArchiver, ItemRecord};
use crate::url::resolve_against_origin;
use crate::{ParseError, ParseResult};
use reqwest::Client;
use scraper::{ElementRef, Html};
use url::Url;

/// Fields read from an item detail page, before any side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub upc: String,
    pub title: String,
    pub price_incl_tax: String,
    pub price_excl_tax: String,
    pub availability: String,
    pub description: String,
    pub category: String,
    pub rating: String,
    /// Absolute image URL, resolved against the page origin
    pub image_url: Url,
}

/// A complete record plus what happened to its image
#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: ItemRecord,
    pub image: ArchiveOutcome,
}

/// Drops the leading currency symbol from a displayed price
///
/// No numeric parsing happens; the digits are kept exactly as displayed.
///
/// # Examples
///
/// ```
/// use catalog_scraper::crawler::strip_currency;
///
/// assert_eq!(strip_currency("£51.77"), "51.77");
/// ```
pub fn strip_currency(price: &str) -> String {
    price.trim().chars().skip(1).collect()
}

/// Parses an item detail page
///
/// `page_url` is the address the page was served from; the image path is
/// resolved against its scheme and host.
pub fn parse_item(html: &str, page_url: &Url) -> ParseResult<ItemDetails> {
    let document = Html::parse_document(html);

    let title = first_text(&document, "h1")?;
    let upc = product_field(&document, "UPC")?;
    let price_incl_tax = strip_currency(&product_field(&document, "Price (incl. tax)")?);
    let price_excl_tax = strip_currency(&product_field(&document, "Price (excl. tax)")?);
    let availability = product_field(&document, "Availability")?;
    let description = first_attr(&document, "meta[name=\"description\"]", "content")?
        .trim()
        .to_string();
    let category = breadcrumb_entry(&document, 2)?;
    let rating = rating_token(&document)?;

    let image_src = first_attr(&document, "div.item.active img", "src")?;
    let image_url = resolve_against_origin(page_url, &image_src)?;

    Ok(ItemDetails {
        upc,
        title,
        price_incl_tax,
        price_excl_tax,
        availability,
        description,
        category,
        rating,
        image_url,
    })
}

/// Fetches an item page, archives its image and builds the record
///
/// Returns None when the page cannot be fetched or any field is missing; a
/// parse failure logs exactly one error naming the item URL. A failed image
/// download does not prevent the record: the outcome is reported alongside.
pub async fn extract_item(
    client: &Client,
    archiver: &ImageArchiver,
    item_url: &Url,
) -> Option<Extraction> {
    let (final_url, body) = fetch_page(client, item_url).await?;

    let details = match parse_item(&body, &final_url) {
        Ok(details) => details,
        Err(e) => {
            tracing::error!("Failed to extract item from {}: {}", item_url, e);
            return None;
        }
    };

    let image_name = format!("{}.jpg", details.title);
    let image = archiver
        .archive(&details.image_url, &details.category, &image_name)
        .await;
    let image_path = image_relative_path(archiver.images_dir(), &details.category, &image_name);

    let record = ItemRecord {
        product_page_url: item_url.to_string(),
        upc: details.upc,
        title: details.title,
        price_incl_tax: details.price_incl_tax,
        price_excl_tax: details.price_excl_tax,
        availability: details.availability,
        description: details.description,
        category: details.category,
        rating: details.rating,
        image_url: details.image_url.to_string(),
        image_path: image_path.to_string_lossy().into_owned(),
    };

    Some(Extraction { record, image })
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, css: &'static str) -> ParseResult<String> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .map(trimmed_text)
        .ok_or(ParseError::MissingElement(css))
}

fn first_attr(document: &Html, css: &'static str, attr: &'static str) -> ParseResult<String> {
    let sel = selector(css)?;
    let element = document
        .select(&sel)
        .next()
        .ok_or(ParseError::MissingElement(css))?;
    element
        .value()
        .attr(attr)
        .map(str::to_string)
        .ok_or(ParseError::MissingAttribute {
            element: css,
            attr,
        })
}

/// Value cell of the product information row whose header reads `label`
fn product_field(document: &Html, label: &'static str) -> ParseResult<String> {
    let row_selector = selector("tr")?;
    let header_selector = selector("th")?;
    let value_selector = selector("td")?;

    document
        .select(&row_selector)
        .find(|row| {
            row.select(&header_selector)
                .next()
                .is_some_and(|th| trimmed_text(th) == label)
        })
        .and_then(|row| row.select(&value_selector).next())
        .map(trimmed_text)
        .ok_or(ParseError::MissingField(label))
}

fn breadcrumb_entry(document: &Html, index: usize) -> ParseResult<String> {
    let breadcrumb_selector = selector("ul.breadcrumb")?;
    let entry_selector = selector("li")?;

    let breadcrumb = document
        .select(&breadcrumb_selector)
        .next()
        .ok_or(ParseError::MissingElement("ul.breadcrumb"))?;
    breadcrumb
        .select(&entry_selector)
        .nth(index)
        .map(trimmed_text)
        .ok_or(ParseError::MissingField("category"))
}

/// Second class token of the star rating paragraph, e.g. `Three`
fn rating_token(document: &Html) -> ParseResult<String> {
    let classes = first_attr(document, "p.star-rating", "class")?;
    classes
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or(ParseError::MissingField("rating"))
}
