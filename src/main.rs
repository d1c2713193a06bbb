//! Catalog-Scraper main entry point
//!
//! This is the command-line interface for the catalog scraper.

use anyhow::Context;
use catalog_scraper::config::{load_config_with_hash, Config};
use catalog_scraper::crawler::{run_scrape, user_agent_string};
use catalog_scraper::output::print_statistics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Scraper: extract a paginated catalog into CSV files and images
///
/// Reads the category list from the home page, walks every category's
/// listing pages, extracts each item, archives its image and writes one CSV
/// file per category.
#[derive(Parser, Debug)]
#[command(name = "catalog-scraper")]
#[command(version)]
#[command(about = "Extract a paginated catalog into CSV files and images", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Home page to start from (overrides the config file)
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Directory for CSV files and the image archive (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let config = config
        .with_overrides(cli.start_url, cli.output_dir)
        .context("Invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let stats = run_scrape(config).await.context("Scrape failed")?;
    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_scraper=info,warn"),
            1 => EnvFilter::new("catalog_scraper=debug,info"),
            2 => EnvFilter::new("catalog_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: prints what a run would use
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Scraper Dry Run ===\n");

    println!("Crawler:");
    println!("  Start URL: {}", config.crawler.start_url);
    match config.crawler.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nOutput:");
    println!("  CSV directory: {}", config.output.output_dir);
    println!(
        "  Images: {}",
        config.output_dir().join(&config.output.images_dir).display()
    );

    println!("\n✓ Configuration is valid");
}
