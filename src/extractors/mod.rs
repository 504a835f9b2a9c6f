// src/extractors/mod.rs
pub mod body;
pub mod card;
pub mod catalogue;
pub mod detail;
pub mod models;
pub mod section;
pub mod text;

use std::sync::Arc;

use scraper::Html;

use crate::config::{ExtractionMode, ExtractorConfig};
use crate::fetch::DetailFetcher;

// Re-export key extraction types for convenience
pub use models::{Catalogue, CatalogueRecord};

/// Runs one extraction pass over an already-fetched index page.
pub struct CatalogueExtractor {
    config: ExtractorConfig,
    fetcher: Arc<dyn DetailFetcher>,
}

impl CatalogueExtractor {
    pub fn new(config: ExtractorConfig, fetcher: Arc<dyn DetailFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub async fn extract(&self, index_html: &str) -> Catalogue {
        tracing::info!(
            "Extracting catalogue from {} ({} mode, {} bytes)",
            self.config.base_url,
            self.config.mode,
            index_html.len()
        );

        // The parsed DOM is not Send; keep it out of the await below.
        let catalogue = {
            let document = Html::parse_document(index_html);
            catalogue::build_catalogue(&document, &self.config.base_url)
        };

        match self.config.mode {
            ExtractionMode::Shallow => catalogue,
            ExtractionMode::Deep => {
                detail::enrich(&catalogue, self.fetcher.as_ref(), self.config.detail_concurrency).await
            }
        }
    }
}
