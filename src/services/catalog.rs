use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Attraction;

/// Errors that can occur while loading an attraction catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Source of the full list of known attractions
///
/// Expected to be cheap and to return the same list for the duration of a
/// calculation.
pub trait AttractionCatalog: Send + Sync {
    fn list_attractions(&self) -> Arc<[Attraction]>;
}

/// Catalog backed by a fixed, in-memory list
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    attractions: Arc<[Attraction]>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    attractions: Vec<Attraction>,
}

impl StaticCatalog {
    pub fn new(attractions: Vec<Attraction>) -> Self {
        Self {
            attractions: attractions.into(),
        }
    }

    /// Parse a catalog from TOML `[[attractions]]` tables
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        Ok(Self::new(file.attractions))
    }

    /// Load a catalog from a TOML file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&source)?;
        tracing::info!(
            "Loaded {} attractions from {}",
            catalog.attractions.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}

impl AttractionCatalog for StaticCatalog {
    fn list_attractions(&self) -> Arc<[Attraction]> {
        Arc::clone(&self.attractions)
    }
}
