//! Report Pipeline
//! Loads the catalog once, renders every chart in order and writes the
//! aggregation summary.

use crate::charts::{ChartKind, RenderError, StaticChartRenderer};
use crate::config::ReportConfig;
use crate::data::{self, CatalogTable, LoaderError};
use crate::stats::{CatalogSummary, StatsCalculator};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const BANNER_WIDTH: usize = 60;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write summary {}: {source}", path.display())]
    SummaryIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Files produced by one run.
#[derive(Debug)]
pub struct ReportOutput {
    pub titles: usize,
    pub charts: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
}

/// Runs the full chart report.
pub struct ReportPipeline;

impl ReportPipeline {
    pub fn run(config: &ReportConfig) -> Result<ReportOutput, ReportError> {
        Self::banner("NETFLIX CONTENT ANALYSIS - GENERATING CHARTS");

        println!("Loading dataset...");
        let table = data::load_catalog(&config.data_path)?;
        println!("Dataset loaded: {} titles\n", Self::thousands(table.len()));
        info!(path = %config.data_path.display(), titles = table.len(), "catalog ready");
        if table.is_empty() {
            warn!(path = %config.data_path.display(), "catalog has no rows; charts will be empty");
        }

        println!("Generating business intelligence charts...\n");
        // Charts render in fixed order; the first failure aborts the run.
        let mut charts = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            charts.push(StaticChartRenderer::render(kind, &table, &config.output_dir)?);
        }

        let summary = if config.write_summary {
            let path = config.summary_path();
            Self::write_summary(&table, &path)?;
            Some(path)
        } else {
            None
        };

        println!();
        println!("{}", "=".repeat(BANNER_WIDTH));
        println!("✓ ALL CHARTS GENERATED SUCCESSFULLY");
        println!("✓ Location: {}/ directory", config.output_dir.display());
        println!("{}\n", "=".repeat(BANNER_WIDTH));

        Ok(ReportOutput {
            titles: table.len(),
            charts,
            summary,
        })
    }

    /// Serialize every aggregation as pretty JSON.
    pub fn summary_json(table: &CatalogTable) -> Result<String, ReportError> {
        let summary: CatalogSummary = StatsCalculator::summarize(table);
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    fn write_summary(table: &CatalogTable, path: &Path) -> Result<(), ReportError> {
        let json = Self::summary_json(table)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ReportError::SummaryIo {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| ReportError::SummaryIo {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "summary written");
        Ok(())
    }

    fn banner(title: &str) {
        println!("\n{}", "=".repeat(BANNER_WIDTH));
        println!("{title}");
        println!("{}\n", "=".repeat(BANNER_WIDTH));
    }

    fn thousands(value: usize) -> String {
        crate::charts::ChartPlotter::format_count(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CSV: &str = "show_id,type,title,director,country,date_added,release_year,rating,duration,listed_in\n\
        s1,Movie,Alpha,,United States,\"September 25, 2021\",2020,PG-13,90 min,\"Dramas, Comedies\"\n\
        s2,TV Show,Beta,,\"India, United States\",\" August 4, 2017\",2016,TV-MA,2 Seasons,International TV Shows\n\
        s3,Movie,Gamma,,,,1995,74 min,,Dramas\n";

    fn fixture(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("titles.csv");
        fs::write(&path, CSV).unwrap();
        path
    }

    #[test]
    fn test_summary_is_idempotent_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir);
        let first = ReportPipeline::summary_json(&data::load_catalog(&path).unwrap()).unwrap();
        let second = ReportPipeline::summary_json(&data::load_catalog(&path).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_loaded_catalog_is_cleaned() {
        let dir = TempDir::new().unwrap();
        let table = data::load_catalog(&fixture(&dir)).unwrap();
        assert_eq!(table.len(), 3);

        let ratings: Vec<&str> = table.rows().iter().map(|r| r.rating.code()).collect();
        assert_eq!(ratings, vec!["PG-13", "TV-MA", "NR"]);

        let gamma = &table.rows()[2];
        assert_eq!(gamma.country, None);
        assert_eq!((gamma.year_added(), gamma.month_added()), (None, None));
        assert_eq!(table.rows()[1].year_added(), Some(2017));

        let summary = StatsCalculator::summarize(&table);
        assert_eq!(summary.top_countries[0].label, "United States");
        assert_eq!(summary.top_countries[0].count, 2);
        assert_eq!(summary.top_genres[0].label, "Dramas");
    }

    #[test]
    fn test_full_run_writes_every_chart_and_summary() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            data_path: fixture(&dir),
            output_dir: dir.path().join("charts"),
            write_summary: true,
        };
        let output = ReportPipeline::run(&config).unwrap();
        assert_eq!(output.titles, 3);

        let expected: Vec<PathBuf> = ChartKind::ALL
            .iter()
            .map(|kind| config.output_dir.join(kind.file_name()))
            .collect();
        assert_eq!(output.charts, expected);
        for path in &expected {
            let size = fs::metadata(path).unwrap().len();
            assert!(size > 0, "{} is empty", path.display());
        }

        let summary = config.summary_path();
        assert_eq!(output.summary.as_deref(), Some(summary.as_path()));
        assert!(fs::metadata(&summary).unwrap().len() > 0);
    }

    #[test]
    fn test_missing_input_aborts_run() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            data_path: dir.path().join("missing.csv"),
            output_dir: dir.path().join("charts"),
            write_summary: true,
        };
        let err = ReportPipeline::run(&config).unwrap_err();
        assert!(matches!(err, ReportError::Load(LoaderError::NotFound(_))));
        assert!(!config.output_dir.exists());
    }
}
