// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExtractorConfig;
use crate::extractors::{Catalogue, CatalogueRecord};
use crate::utils::error::StorageError;

const DOMAIN_DIR: &str = "finos";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    fn domain_dir(&self) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(DOMAIN_DIR);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Writes the catalogue as pretty JSON: /base_dir/finos/catalogue.json
    pub fn save_catalogue(&self, catalogue: &Catalogue) -> Result<PathBuf, StorageError> {
        let file_path = self.domain_dir()?.join("catalogue.json");

        let record = CatalogueRecord::from(catalogue);
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved catalogue to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the pass in JSON format
    pub fn save_catalogue_metadata(
        &self,
        catalogue: &Catalogue,
        config: &ExtractorConfig,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.domain_dir()?.join("catalogue_meta.json");

        let metadata = serde_json::json!({
            "domain": catalogue.domain,
            "base_url": config.base_url.as_str(),
            "mode": config.mode.to_string(),
            "risk_section_count": catalogue.risk_sections.len(),
            "mitigation_section_count": catalogue.mitigation_sections.len(),
            "item_count": catalogue.item_count(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Keeps the raw index page next to the output for debugging selectors.
    pub fn save_raw_index(&self, html: &str) -> Result<PathBuf, StorageError> {
        let debug_dir = self.domain_dir()?.join("debug");
        fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;

        let file_path = debug_dir.join("index.html");
        fs::write(&file_path, html).map_err(StorageError::IoError)?;

        tracing::info!("Saved raw index page to {}", file_path.display());
        Ok(file_path)
    }
}
