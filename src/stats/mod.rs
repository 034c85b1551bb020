//! Stats module - catalog aggregations

mod buckets;
mod calculator;

pub use calculator::{
    CatalogSummary, CategoryShare, StatsCalculator, TypeSplit, MIN_DECADE, MIN_YEAR_ADDED,
    TOP_COUNTRIES, TOP_COUNTRIES_BY_TYPE, TOP_GENRES,
};
