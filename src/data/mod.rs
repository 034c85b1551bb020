//! Data module - catalog loading and cleaning

mod catalog;
mod loader;
mod processor;

pub use catalog::{CatalogRow, CatalogTable, ContentType, Rating};
pub use loader::{DataLoader, LoaderError};
pub use processor::DataProcessor;

use std::path::Path;

/// Load and clean the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<CatalogTable, LoaderError> {
    let raw = DataLoader::load_raw(path)?;
    Ok(DataProcessor::clean(&raw))
}
