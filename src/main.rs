// src/main.rs
mod config;
mod extractors;
mod fetch;
mod storage;
mod utils;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use config::{ExtractionMode, ExtractorConfig, FetchConfig};
use extractors::CatalogueExtractor;
use fetch::HttpFetcher;
use storage::StorageManager;
use utils::AppError;

/// Extracts the FINOS AI Governance Framework risk and mitigation catalogue
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Index page of the governance framework site
    #[arg(long, env = "FINOS_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// shallow: card summaries only; deep: fetch and flatten every detail page
    #[arg(short, long, env = "FINOS_MODE", default_value = "shallow")]
    mode: ExtractionMode,

    /// Detail pages fetched concurrently in deep mode (1 = sequential)
    #[arg(long, default_value_t = 1)]
    detail_concurrency: usize,

    /// Output directory for extracted content
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Delay before each HTTP request, in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_DELAY_MS)]
    request_delay_ms: u64,

    /// HTTP request timeout, in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Debug mode - save the raw index page and log at debug level
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // 1. Setup Logging (RUST_LOG overrides)
    utils::logging::setup_logging(if args.debug { "debug" } else { "info" });
    tracing::info!("Starting extraction with args: {:?}", args);

    // 2. Build configuration
    if args.detail_concurrency == 0 {
        return Err(AppError::Config("--detail-concurrency must be at least 1".to_string()));
    }
    let extractor_config = ExtractorConfig::new(&args.base_url, args.mode)?
        .with_detail_concurrency(args.detail_concurrency);
    let fetch_config = FetchConfig {
        request_delay: Duration::from_millis(args.request_delay_ms),
        timeout: Duration::from_secs(args.timeout_secs),
        ..FetchConfig::default()
    };

    // 3. Initialize storage and fetcher
    let storage = StorageManager::new(&args.output_dir)?;
    let fetcher = Arc::new(HttpFetcher::new(fetch_config)?);

    // 4. Fetch the index page
    let index_html = fetcher.download(extractor_config.base_url.as_str()).await?;
    tracing::info!("Downloaded index page ({} bytes)", index_html.len());

    if args.debug {
        if let Err(e) = storage.save_raw_index(&index_html) {
            tracing::warn!("Failed to save raw index page: {}", e);
        }
    }

    // 5. Extract
    let extractor = CatalogueExtractor::new(extractor_config.clone(), fetcher);
    let catalogue = extractor.extract(&index_html).await;

    if catalogue.item_count() == 0 {
        tracing::warn!("Catalogue is empty; the page layout may have changed");
    }

    // 6. Persist
    let path = storage.save_catalogue(&catalogue)?;
    storage.save_catalogue_metadata(&catalogue, &extractor_config)?;

    tracing::info!(
        "Processing finished. {} risk section(s), {} mitigation section(s), {} item(s) -> {}",
        catalogue.risk_sections.len(),
        catalogue.mitigation_sections.len(),
        catalogue.item_count(),
        path.display()
    );

    Ok(())
}
