//! Scrape coordinator - main run orchestration logic
//!
//! This module sequences the whole run, one request at a time:
//! - Discovering categories on the home page
//! - Paginating each category's listing
//! - Extracting every item and archiving its image
//! - Writing one export per category

use crate::config::Config;
use crate::crawler::discovery::{discover_categories, CategoryRef};
use crate::crawler::extractor::extract_item;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::paginator::collect_item_urls;
use crate::output::{CategoryExport, CsvExporter, ImageArchiver, OutputHandler, RunStatistics};
use crate::url::{category_slug, display_name};
use crate::ScrapeError;
use reqwest::Client;
use url::Url;

/// Main scrape coordinator structure
pub struct Coordinator {
    start_url: Url,
    client: Client,
    archiver: ImageArchiver,
    exporter: Box<dyn OutputHandler>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Start URL, output directory and image directory all come from
    /// `config`; nothing is read from global state.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid start URL or HTTP client setup failure
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let start_url = Url::parse(&config.crawler.start_url)?;
        let client = build_http_client(&config.user_agent, config.request_timeout())?;

        let output_dir = config.output_dir();
        let archiver = ImageArchiver::new(
            client.clone(),
            output_dir.clone(),
            config.output.images_dir.clone(),
        );
        let exporter = Box::new(CsvExporter::new(output_dir));

        Ok(Self {
            start_url,
            client,
            archiver,
            exporter,
        })
    }

    /// Replaces the export backend
    pub fn with_output_handler(mut self, handler: Box<dyn OutputHandler>) -> Self {
        self.exporter = handler;
        self
    }

    /// Runs the scrape from discovery to the last export
    ///
    /// An empty category list ends the run immediately. Categories without
    /// item links are skipped without an export. Only export write failures
    /// abort the run; fetch and parse failures are logged and skipped.
    pub async fn run(&self) -> Result<RunStatistics, ScrapeError> {
        let mut stats = RunStatistics::new();
        tracing::info!("Starting scrape from {}", self.start_url);

        let categories = discover_categories(&self.client, &self.start_url).await;
        stats.categories_discovered = categories.len() as u64;

        if categories.is_empty() {
            tracing::info!("No categories found on {}", self.start_url);
            stats.finish();
            return Ok(stats);
        }

        for category in &categories {
            self.scrape_category(category, &mut stats).await?;
        }

        stats.finish();
        tracing::info!(
            "Scrape completed: {} categories exported, {} items extracted, {} failed",
            stats.categories_exported,
            stats.items_extracted,
            stats.items_failed
        );

        Ok(stats)
    }

    /// Processes one category: paginate, extract each item, export
    async fn scrape_category(
        &self,
        category: &CategoryRef,
        stats: &mut RunStatistics,
    ) -> Result<(), ScrapeError> {
        tracing::info!("Extracting category: {}", category.name);

        let item_urls = collect_item_urls(&self.client, &category.url).await;
        stats.item_links_found += item_urls.len() as u64;

        if item_urls.is_empty() {
            tracing::info!("No items found in category {}", category.url);
            stats.categories_skipped += 1;
            return Ok(());
        }

        let mut records = Vec::with_capacity(item_urls.len());
        for item_url in &item_urls {
            let item_name = display_name(&category_slug(item_url));
            tracing::info!("  Extracting item: {}", item_name);

            match extract_item(&self.client, &self.archiver, item_url).await {
                Some(extraction) => {
                    if extraction.image.is_saved() {
                        stats.images_archived += 1;
                    } else {
                        stats.images_failed += 1;
                    }
                    stats.items_extracted += 1;
                    records.push(extraction.record);
                }
                None => stats.items_failed += 1,
            }
        }

        let record_count = records.len();
        let export = CategoryExport::new(category.slug.clone(), records);
        let path = self.exporter.write_category(&export)?;
        tracing::info!("Wrote {} records to {}", record_count, path.display());

        stats.categories_exported += 1;
        stats.exported_files.push(path);
        Ok(())
    }
}

/// Runs a complete scrape with the given configuration
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Scrape finished; counters describe what happened
/// * `Err(ScrapeError)` - Setup failed or an export could not be written
pub async fn run_scrape(config: Config) -> Result<RunStatistics, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
