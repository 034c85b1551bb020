//! CSV Data Loader Module
//! Handles catalog CSV loading and required-column extraction using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Columns every catalog file must provide. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "type",
    "country",
    "rating",
    "listed_in",
    "release_year",
    "date_added",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Raw text cells of the required columns, in file order.
#[derive(Debug, Default)]
pub struct RawCatalog {
    pub content_type: Vec<Option<String>>,
    pub country: Vec<Option<String>>,
    pub rating: Vec<Option<String>>,
    pub listed_in: Vec<Option<String>>,
    pub release_year: Vec<Option<String>>,
    pub date_added: Vec<Option<String>>,
}

impl RawCatalog {
    pub fn len(&self) -> usize {
        self.content_type.len()
    }
}

/// Handles catalog CSV loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a catalog CSV with every column read as text.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        // Schema inference over zero rows keeps all columns as strings;
        // typing happens during cleaning.
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "catalog CSV loaded"
        );
        Ok(df)
    }

    /// Extract the required columns as optional strings.
    pub fn extract_columns(df: &DataFrame) -> Result<RawCatalog, LoaderError> {
        let names = df.get_column_names();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|n| n.as_str() == **required))
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        Ok(RawCatalog {
            content_type: Self::string_column(df, "type")?,
            country: Self::string_column(df, "country")?,
            rating: Self::string_column(df, "rating")?,
            listed_in: Self::string_column(df, "listed_in")?,
            release_year: Self::string_column(df, "release_year")?,
            date_added: Self::string_column(df, "date_added")?,
        })
    }

    /// Load and extract in one step.
    pub fn load_raw(path: &Path) -> Result<RawCatalog, LoaderError> {
        let df = Self::load_csv(path)?;
        Self::extract_columns(&df)
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let series = column.as_materialized_series().cast(&DataType::String)?;
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }
}
