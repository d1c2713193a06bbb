//! URL helpers for Catalog-Scraper
//!
//! Link resolution against a page or its origin, and the naming conventions
//! derived from catalog URLs (category slugs and display names).

mod naming;

pub use naming::{category_slug, display_name};

use crate::{ParseError, ParseResult};
use url::Url;

/// Resolves `href` relative to the page it was found on
///
/// # Examples
///
/// ```
/// use url::Url;
/// use catalog_scraper::url::resolve_link;
///
/// let page = Url::parse("https://example.com/catalogue/category/books/index.html").unwrap();
/// let item = resolve_link(&page, "../../a-book_1/index.html").unwrap();
/// assert_eq!(item.as_str(), "https://example.com/catalogue/a-book_1/index.html");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> ParseResult<Url> {
    let href = href.trim();
    base.join(href).map_err(|e| ParseError::InvalidLink {
        href: href.to_string(),
        reason: e.to_string(),
    })
}

/// Returns the scheme, host and port of `url` as a root URL (path `/`)
///
/// Returns None for URLs without a tuple origin (e.g. `data:` URLs).
pub fn origin_url(url: &Url) -> Option<Url> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Url::parse(&origin.ascii_serialization()).ok()
}

/// Resolves `href` against the origin of `page` rather than the page itself
///
/// Parent-directory segments that climb above the root are dropped, so
/// `../../media/x.jpg` on any page of `https://example.com` resolves to
/// `https://example.com/media/x.jpg`.
pub fn resolve_against_origin(page: &Url, href: &str) -> ParseResult<Url> {
    let origin = origin_url(page).ok_or_else(|| ParseError::InvalidLink {
        href: href.to_string(),
        reason: format!("{} has no origin", page),
    })?;
    resolve_link(&origin, href)
}
