use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use drivefin_cli::{ListingCategory, reconcile_listing};
use drivefin_metadata::ReconcileConfig;
use drivefin_metadata::reconcile::DEFAULT_API_PREFIX;
use drivefin_metadata::tmdb::{DEFAULT_BASE_URL, TmdbClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drivefin", about = "Match a drive listing against TMDB")]
struct Cli {
    /// JSON array of `{id, name, type, entries}` categories
    listing: PathBuf,
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: String,
    /// Base path for thumbnail URLs
    #[arg(long, env = "DRIVEFIN_API_PREFIX", default_value = DEFAULT_API_PREFIX)]
    api_prefix: String,
    #[arg(long, env = "DRIVEFIN_TMDB_URL", default_value = DEFAULT_BASE_URL)]
    tmdb_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = tokio::fs::read_to_string(&cli.listing)
        .await
        .with_context(|| format!("failed to read {}", cli.listing.display()))?;
    let listing: Vec<ListingCategory> =
        serde_json::from_str(&raw).context("failed to parse listing")?;
    info!(path = %cli.listing.display(), categories = listing.len(), "listing loaded");

    let provider = TmdbClient::with_base_url(cli.tmdb_api_key, cli.tmdb_url);
    let config = ReconcileConfig {
        api_prefix: cli.api_prefix,
    };

    let buckets = reconcile_listing(&provider, listing, &config).await;
    info!(
        movies = buckets.movies.len(),
        series = buckets.series.len(),
        "reconciliation finished"
    );

    let out = serde_json::to_string_pretty(&buckets).context("failed to encode output")?;
    println!("{out}");
    Ok(())
}
