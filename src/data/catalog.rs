//! Catalog Model
//! Typed rows of the cleaned media catalog.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Content type of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    /// Both types in column order (alphabetical, as grouped output lists them).
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    /// Plural form used in chart legends.
    pub fn plural(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movies",
            ContentType::TvShow => "TV Shows",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maturity rating, restricted to the fourteen valid codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rating {
    #[serde(rename = "G")]
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    #[serde(rename = "R")]
    R,
    #[serde(rename = "NC-17")]
    Nc17,
    #[serde(rename = "TV-Y")]
    TvY,
    #[serde(rename = "TV-Y7")]
    TvY7,
    #[serde(rename = "TV-Y7-FV")]
    TvY7Fv,
    #[serde(rename = "TV-G")]
    TvG,
    #[serde(rename = "TV-PG")]
    TvPg,
    #[serde(rename = "TV-14")]
    Tv14,
    #[serde(rename = "TV-MA")]
    TvMa,
    #[serde(rename = "NR")]
    NotRated,
    #[serde(rename = "UR")]
    Unrated,
}

impl Rating {
    pub const ALL: [Rating; 14] = [
        Rating::G,
        Rating::Pg,
        Rating::Pg13,
        Rating::R,
        Rating::Nc17,
        Rating::TvY,
        Rating::TvY7,
        Rating::TvY7Fv,
        Rating::TvG,
        Rating::TvPg,
        Rating::Tv14,
        Rating::TvMa,
        Rating::NotRated,
        Rating::Unrated,
    ];

    /// Parse an exact rating code.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == value)
    }

    /// Coerce a raw cell into a valid rating.
    ///
    /// Anything outside the valid set (empty cells, shifted duration values
    /// such as `"74 min"`) becomes `NR`.
    pub fn normalize(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or(Rating::NotRated)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg => "PG",
            Rating::Pg13 => "PG-13",
            Rating::R => "R",
            Rating::Nc17 => "NC-17",
            Rating::TvY => "TV-Y",
            Rating::TvY7 => "TV-Y7",
            Rating::TvY7Fv => "TV-Y7-FV",
            Rating::TvG => "TV-G",
            Rating::TvPg => "TV-PG",
            Rating::Tv14 => "TV-14",
            Rating::TvMa => "TV-MA",
            Rating::NotRated => "NR",
            Rating::Unrated => "UR",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One content title after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub content_type: Option<ContentType>,
    pub country: Option<String>,
    pub rating: Rating,
    pub listed_in: Option<String>,
    pub release_year: Option<i32>,
    pub date_added: Option<NaiveDate>,
}

impl CatalogRow {
    pub fn year_added(&self) -> Option<i32> {
        self.date_added.map(|d| d.year())
    }

    pub fn month_added(&self) -> Option<u32> {
        self.date_added.map(|d| d.month())
    }
}

/// Cleaned catalog, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CatalogTable {
    rows: Vec<CatalogRow>,
}

impl CatalogTable {
    pub fn from_rows(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
