//! Static Chart Renderer
//! The ten catalog charts: each aggregates the cleaned table and writes one PNG.
//!
//! Charts, in run order:
//! 1. Content portfolio mix (movies vs TV shows)
//! 2. Annual additions, stacked by type
//! 3. Top 15 producing countries
//! 4. Target-audience buckets
//! 5. Top 15 genres
//! 6. Content age when added
//! 7. Monthly addition pattern
//! 8. US vs international origin
//! 9. Release decades, grouped by type
//! 10. Type mix in the top 10 countries

use crate::charts::plotter::{
    Bar, ChartLayout, ChartPlotter, RenderError, SeriesData, NETFLIX_RED, PALETTE,
};
use crate::data::{CatalogTable, ContentType};
use crate::stats::{
    CategoryShare, StatsCalculator, TypeSplit, MIN_DECADE, MIN_YEAR_ADDED, TOP_COUNTRIES,
    TOP_COUNTRIES_BY_TYPE, TOP_GENRES,
};
use plotters::style::RGBColor;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Colors for the Movie / TV Show series.
const TYPE_COLORS: [RGBColor; 2] = [NETFLIX_RED, PALETTE[1]];

/// One of the ten fixed charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PortfolioMix,
    AcquisitionTrends,
    GeographicDistribution,
    TargetAudience,
    TopGenres,
    ContentAge,
    MonthlyPatterns,
    UsVsInternational,
    ReleaseDecades,
    TypeByCountry,
}

impl ChartKind {
    pub const ALL: [ChartKind; 10] = [
        ChartKind::PortfolioMix,
        ChartKind::AcquisitionTrends,
        ChartKind::GeographicDistribution,
        ChartKind::TargetAudience,
        ChartKind::TopGenres,
        ChartKind::ContentAge,
        ChartKind::MonthlyPatterns,
        ChartKind::UsVsInternational,
        ChartKind::ReleaseDecades,
        ChartKind::TypeByCountry,
    ];

    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::PortfolioMix => "01_content_portfolio_mix.png",
            ChartKind::AcquisitionTrends => "02_content_acquisition_trends.png",
            ChartKind::GeographicDistribution => "03_geographic_distribution.png",
            ChartKind::TargetAudience => "04_target_audience_ratings.png",
            ChartKind::TopGenres => "05_top_genres.png",
            ChartKind::ContentAge => "06_content_age_analysis.png",
            ChartKind::MonthlyPatterns => "07_monthly_acquisition_patterns.png",
            ChartKind::UsVsInternational => "08_us_vs_international.png",
            ChartKind::ReleaseDecades => "09_release_decade_distribution.png",
            ChartKind::TypeByCountry => "10_content_type_by_country.png",
        }
    }

    /// Name shown in the completion notice.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::PortfolioMix => "Content Portfolio Mix",
            ChartKind::AcquisitionTrends => "Content Acquisition Trends",
            ChartKind::GeographicDistribution => "Geographic Distribution",
            ChartKind::TargetAudience => "Target Audience Ratings",
            ChartKind::TopGenres => "Top Content Categories",
            ChartKind::ContentAge => "Content Age Analysis",
            ChartKind::MonthlyPatterns => "Monthly Acquisition Patterns",
            ChartKind::UsVsInternational => "US vs International Content",
            ChartKind::ReleaseDecades => "Release Decade Distribution",
            ChartKind::TypeByCountry => "Content Type by Country",
        }
    }

    pub fn layout(&self) -> ChartLayout {
        match self {
            ChartKind::PortfolioMix => ChartLayout {
                title: "Netflix Content Portfolio: Movies vs TV Shows",
                x_desc: "",
                y_desc: "Number of Titles",
                size: (1000, 600),
            },
            ChartKind::AcquisitionTrends => ChartLayout {
                title: "Content Acquisition Trends: Annual Additions to Netflix Library",
                x_desc: "Year Added to Netflix",
                y_desc: "Number of Titles Added",
                size: (1400, 700),
            },
            ChartKind::GeographicDistribution => ChartLayout {
                title: "Geographic Content Distribution: Top 15 Countries",
                x_desc: "Number of Titles",
                y_desc: "",
                size: (1200, 800),
            },
            ChartKind::TargetAudience => ChartLayout {
                title: "Target Audience Distribution by Content Rating",
                x_desc: "",
                y_desc: "Number of Titles",
                size: (1200, 700),
            },
            ChartKind::TopGenres => ChartLayout {
                title: "Top 15 Content Categories in Netflix Library",
                x_desc: "Number of Titles",
                y_desc: "",
                size: (1200, 800),
            },
            ChartKind::ContentAge => ChartLayout {
                title: "Content Freshness: Age of Content When Added to Netflix",
                x_desc: "",
                y_desc: "Number of Titles",
                size: (1400, 700),
            },
            ChartKind::MonthlyPatterns => ChartLayout {
                title: "Seasonal Content Acquisition: Monthly Addition Patterns",
                x_desc: "Month",
                y_desc: "Total Titles Added",
                size: (1200, 600),
            },
            ChartKind::UsVsInternational => ChartLayout {
                title: "US vs International Content Strategy",
                x_desc: "",
                y_desc: "Number of Titles",
                size: (1000, 600),
            },
            ChartKind::ReleaseDecades => ChartLayout {
                title: "Content Library Distribution by Release Decade",
                x_desc: "Decade of Release",
                y_desc: "Number of Titles",
                size: (1200, 700),
            },
            ChartKind::TypeByCountry => ChartLayout {
                title: "Content Type Distribution in Top 10 Producing Countries",
                x_desc: "Country",
                y_desc: "Number of Titles",
                size: (1400, 800),
            },
        }
    }
}

/// Renders the catalog charts to a fixed output directory.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart and print its completion notice.
    pub fn render(
        kind: ChartKind,
        table: &CatalogTable,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(kind.file_name());
        let layout = kind.layout();

        match kind {
            ChartKind::PortfolioMix => Self::portfolio_mix(table, &path, &layout)?,
            ChartKind::AcquisitionTrends => Self::acquisition_trends(table, &path, &layout)?,
            ChartKind::GeographicDistribution => {
                Self::geographic_distribution(table, &path, &layout)?
            }
            ChartKind::TargetAudience => Self::target_audience(table, &path, &layout)?,
            ChartKind::TopGenres => Self::top_genres(table, &path, &layout)?,
            ChartKind::ContentAge => Self::content_age(table, &path, &layout)?,
            ChartKind::MonthlyPatterns => Self::monthly_patterns(table, &path, &layout)?,
            ChartKind::UsVsInternational => Self::us_vs_international(table, &path, &layout)?,
            ChartKind::ReleaseDecades => Self::release_decades(table, &path, &layout)?,
            ChartKind::TypeByCountry => Self::type_by_country(table, &path, &layout)?,
        }

        debug!(chart = kind.number(), path = %path.display(), "chart written");
        println!("✓ Chart {}: {}", kind.number(), kind.display_name());
        Ok(path)
    }

    fn portfolio_mix(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let mix = StatsCalculator::content_type_mix(table);
        let bars = Self::share_bars(&mix, &TYPE_COLORS);
        ChartPlotter::bar_chart(path, layout, &bars)
    }

    fn acquisition_trends(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let years = StatsCalculator::yearly_additions(table, MIN_YEAR_ADDED);
        let (labels, series) = Self::type_series(&years, ContentType::label);
        ChartPlotter::stacked_bar_chart(path, layout, &labels, &series)
    }

    fn geographic_distribution(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let entries: Vec<(String, usize)> = StatsCalculator::top_countries(table, TOP_COUNTRIES)
            .into_iter()
            .map(|c| (c.label, c.count))
            .collect();
        ChartPlotter::horizontal_bar_chart(path, layout, &entries)
    }

    fn target_audience(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let buckets = StatsCalculator::audience_distribution(table);
        let bars = Self::share_bars(&buckets, &PALETTE);
        ChartPlotter::bar_chart(path, layout, &bars)
    }

    fn top_genres(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let entries: Vec<(String, usize)> = StatsCalculator::top_genres(table, TOP_GENRES)
            .into_iter()
            .map(|c| (c.label, c.count))
            .collect();
        ChartPlotter::horizontal_bar_chart(path, layout, &entries)
    }

    fn content_age(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let ages = StatsCalculator::content_age(table);
        let bars = Self::share_bars(&ages, &PALETTE);
        ChartPlotter::bar_chart(path, layout, &bars)
    }

    fn monthly_patterns(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let bars: Vec<Bar> = StatsCalculator::monthly_additions(table)
            .into_iter()
            .map(|m| Bar {
                annotation: ChartPlotter::format_count(m.count),
                label: m.label,
                value: m.count,
                color: NETFLIX_RED,
            })
            .collect();
        ChartPlotter::bar_chart(path, layout, &bars)
    }

    fn us_vs_international(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let origins = StatsCalculator::origin_distribution(table);
        let colors = [NETFLIX_RED, PALETTE[2], PALETTE[1], PALETTE[3]];
        let bars = Self::share_bars(&origins, &colors);
        ChartPlotter::bar_chart(path, layout, &bars)
    }

    fn release_decades(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let decades = StatsCalculator::release_decades(table, MIN_DECADE);
        let (labels, series) = Self::type_series(&decades, ContentType::plural);
        ChartPlotter::grouped_bar_chart(path, layout, &labels, &series)
    }

    fn type_by_country(
        table: &CatalogTable,
        path: &Path,
        layout: &ChartLayout,
    ) -> Result<(), RenderError> {
        let countries = StatsCalculator::type_by_country(table, TOP_COUNTRIES_BY_TYPE);
        let (labels, series) = Self::type_series(&countries, ContentType::label);
        ChartPlotter::grouped_bar_chart(path, layout, &labels, &series)
    }

    /// Bars annotated with "count (pct%)", colors cycling through `colors`.
    fn share_bars(shares: &[CategoryShare], colors: &[RGBColor]) -> Vec<Bar> {
        shares
            .iter()
            .enumerate()
            .map(|(i, share)| Bar {
                label: share.label.clone(),
                value: share.count,
                color: colors[i % colors.len()],
                annotation: format!(
                    "{} ({:.1}%)",
                    ChartPlotter::format_count(share.count),
                    share.percent
                ),
            })
            .collect()
    }

    /// Category labels plus one Movie and one TV Show series.
    fn type_series(
        splits: &[TypeSplit],
        series_name: fn(&ContentType) -> &'static str,
    ) -> (Vec<String>, Vec<SeriesData>) {
        let labels = splits.iter().map(|s| s.label.clone()).collect();
        let series = ContentType::ALL
            .iter()
            .zip(TYPE_COLORS)
            .map(|(content_type, color)| SeriesData {
                name: series_name(content_type).to_string(),
                color,
                values: splits.iter().map(|s| s.get(*content_type)).collect(),
            })
            .collect();
        (labels, series)
    }
}
