//! Output module for scrape results
//!
//! This module handles:
//! - Writing one CSV export per category
//! - Archiving item images under sanitized names
//! - Recording and printing run statistics

mod csv_export;
mod images;
mod sanitize;
pub mod stats;
mod traits;

pub use csv_export::{read_category_csv, CsvExporter};
pub use images::{image_relative_path, ArchiveOutcome, ImageArchiver};
pub use sanitize::{sanitize_filename, RESERVED_CHARS};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{CategoryExport, ItemRecord, OutputError, OutputHandler, OutputResult};
