//! Catalog Charts - Media Catalog CSV Analysis & Static Chart Generator
//!
//! Loads the title catalog, cleans it, and renders ten business charts as PNGs.

mod charts;
mod config;
mod data;
mod report;
mod stats;

use anyhow::Context;
use config::ReportConfig;
use report::ReportPipeline;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = ReportConfig::from_env();
    let output = ReportPipeline::run(&config)
        .with_context(|| format!("chart report failed for {}", config.data_path.display()))?;

    tracing::debug!(
        titles = output.titles,
        charts = output.charts.len(),
        summary = ?output.summary,
        "report complete"
    );
    Ok(())
}
