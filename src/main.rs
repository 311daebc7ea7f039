//! Resource-Scout main entry point
//!
//! This is the command-line interface for discovering the data files linked
//! from dataset landing pages.

use anyhow::Context;
use clap::Parser;
use resource_scout::config::{load_config_or_default, Config};
use resource_scout::output::{load_statistics, print_resources, print_statistics};
use resource_scout::storage::{open_cache, ResourceCache, SqliteCache};
use resource_scout::{refresh, Crawler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resource-Scout: finds the data files linked from dataset landing pages
///
/// Each URL is crawled one level deep. Every same-site link allowed by
/// robots.txt is classified from its response headers and cached; the data
/// files found for the URL are then printed.
#[derive(Parser, Debug)]
#[command(name = "resource-scout")]
#[command(version)]
#[command(about = "Finds the data files linked from dataset landing pages", long_about = None)]
struct Cli {
    /// Landing pages to crawl
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cache database file (overrides the configuration)
    #[arg(long, value_name = "FILE", conflicts_with = "no_cache")]
    database: Option<PathBuf>,

    /// Use a throwaway in-memory cache
    #[arg(long)]
    no_cache: bool,

    /// Evict expired cache entries before crawling
    #[arg(long)]
    evict: bool,

    /// Show cache statistics and exit
    #[arg(long)]
    stats: bool,

    /// Print resources as CKAN JSON instead of text
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from: {}", path.display());
    }

    let mut cache = open(&cli, &config)?;

    if cli.stats {
        let stats = load_statistics(&cache)?;
        print_statistics(&stats);
        return Ok(());
    }

    if cli.evict {
        let removed = cache.evict(config.cache.retention_days)?;
        tracing::info!("Evicted {} expired entries", removed);
    }

    if cli.urls.is_empty() {
        tracing::warn!("No URLs given, nothing to crawl");
        return Ok(());
    }

    let crawler = Crawler::new(&config)?;
    for url in &cli.urls {
        handle_url(&crawler, &mut cache, url, cli.json).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("resource_scout=info,warn"),
            1 => EnvFilter::new("resource_scout=debug,info"),
            2 => EnvFilter::new("resource_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the cache selected by the command line
fn open(cli: &Cli, config: &Config) -> anyhow::Result<SqliteCache> {
    if cli.no_cache {
        tracing::debug!("Using an in-memory cache");
        return Ok(SqliteCache::open_in_memory()?);
    }

    let path = cli
        .database
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.cache.database_path));
    tracing::debug!("Opening cache database: {}", path.display());

    open_cache(&path).with_context(|| format!("opening cache database {}", path.display()))
}

/// Refreshes the cache for one URL and prints its data resources
async fn handle_url(
    crawler: &Crawler,
    cache: &mut SqliteCache,
    url: &str,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        println!("{}", url);
    }

    let summary = refresh(crawler, cache, url).await;
    tracing::debug!("{:?}", summary);

    print_resources(cache, url, json)?;
    Ok(())
}
