//! Output handler traits and types
//!
//! This module defines the record written for each extracted item, the
//! per-category export unit, and the trait implemented by export backends.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected export format: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One extracted catalog item
///
/// Every field is plain text. The two prices are the displayed amounts with
/// their currency symbol removed. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub product_page_url: String,
    pub upc: String,
    pub title: String,
    pub price_incl_tax: String,
    pub price_excl_tax: String,
    pub availability: String,
    pub description: String,
    pub category: String,
    pub rating: String,
    pub image_url: String,
    /// Archive location relative to the output directory
    pub image_path: String,
}

impl ItemRecord {
    /// Export header, in column order
    pub const HEADERS: [&'static str; 11] = [
        "product_page_url",
        "upc",
        "title",
        "price_incl_tax",
        "price_excl_tax",
        "availability",
        "description",
        "category",
        "rating",
        "image_url",
        "image_path",
    ];
}

/// The records of one category, written once at the end of its traversal
#[derive(Debug, Clone, Default)]
pub struct CategoryExport {
    /// Category slug, used verbatim as the export file's base name
    pub slug: String,

    /// Records in item traversal order
    pub records: Vec<ItemRecord>,
}

impl CategoryExport {
    pub fn new(slug: impl Into<String>, records: Vec<ItemRecord>) -> Self {
        Self {
            slug: slug.into(),
            records,
        }
    }
}

/// Trait for export backends
///
/// A backend receives each category exactly once. Writing replaces any
/// previous export of the same category.
pub trait OutputHandler: Send + Sync {
    /// Writes one category's export and returns where it went
    fn write_category(&self, export: &CategoryExport) -> OutputResult<PathBuf>;
}
