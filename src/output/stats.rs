//! Run statistics
//!
//! Counters collected while the coordinator walks the catalog, and a
//! human-readable report printed at the end of a run.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one scraping run
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, once it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Categories listed on the home page
    pub categories_discovered: u64,

    /// Categories written to an export file
    pub categories_exported: u64,

    /// Categories skipped because no item links were found
    pub categories_skipped: u64,

    /// Item links collected across all listing pages
    pub item_links_found: u64,

    /// Items that produced a complete record
    pub items_extracted: u64,

    /// Items whose page could not be fetched or parsed
    pub items_failed: u64,

    /// Images written to the archive
    pub images_archived: u64,

    /// Images that could not be downloaded or written
    pub images_failed: u64,

    /// Export files, in write order
    pub exported_files: Vec<PathBuf>,
}

impl RunStatistics {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            categories_discovered: 0,
            categories_exported: 0,
            categories_skipped: 0,
            item_links_found: 0,
            items_extracted: 0,
            items_failed: 0,
            images_archived: 0,
            images_failed: 0,
            exported_files: Vec::new(),
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in seconds, if the run has finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Percentage of attempted items that produced a record
    pub fn success_rate(&self) -> f64 {
        let attempted = self.items_extracted + self.items_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.items_extracted as f64 / attempted as f64) * 100.0
    }
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {}s", duration);
    }
    println!();

    println!("Categories:");
    println!("  Discovered: {}", stats.categories_discovered);
    println!("  Exported: {}", stats.categories_exported);
    println!("  Skipped (no items): {}", stats.categories_skipped);
    println!();

    println!("Items:");
    println!("  Links found: {}", stats.item_links_found);
    println!("  Extracted: {}", stats.items_extracted);
    println!("  Failed: {}", stats.items_failed);
    println!();

    println!("Images:");
    println!("  Archived: {}", stats.images_archived);
    println!("  Failed: {}", stats.images_failed);
    println!();

    if !stats.exported_files.is_empty() {
        println!("Export Files ({}):", stats.exported_files.len());
        for path in &stats.exported_files {
            println!("  - {}", path.display());
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} items extracted)",
        stats.success_rate(),
        stats.items_extracted,
        stats.items_extracted + stats.items_failed
    );
}
