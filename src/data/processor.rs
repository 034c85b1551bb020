//! Data Processor Module
//! Handles catalog cleaning: date parsing, rating coercion and typed rows.

use crate::data::catalog::{CatalogRow, CatalogTable, ContentType, Rating};
use crate::data::loader::RawCatalog;
use chrono::NaiveDate;
use std::ops::RangeInclusive;
use tracing::debug;

/// Delimiter used by the multi-valued `country` and `listed_in` fields.
pub const LIST_DELIMITER: &str = ", ";

/// Accepted `date_added` layouts, tried in order.
const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Release years outside this range are treated as absent.
const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Turn raw text columns into the cleaned catalog.
    pub fn clean(raw: &RawCatalog) -> CatalogTable {
        let mut invalid_ratings = 0usize;
        let mut missing_dates = 0usize;

        let rows: Vec<CatalogRow> = (0..raw.len())
            .map(|i| {
                let rating_cell = Self::cell(&raw.rating, i);
                let rating = Rating::normalize(rating_cell);
                if rating_cell.and_then(Rating::parse).is_none() {
                    invalid_ratings += 1;
                }

                let date_added = Self::cell(&raw.date_added, i).and_then(Self::parse_date_added);
                if date_added.is_none() {
                    missing_dates += 1;
                }

                CatalogRow {
                    content_type: Self::cell(&raw.content_type, i).and_then(ContentType::parse),
                    country: Self::cell(&raw.country, i).map(str::to_string),
                    rating,
                    listed_in: Self::cell(&raw.listed_in, i).map(str::to_string),
                    release_year: Self::cell(&raw.release_year, i).and_then(Self::parse_year),
                    date_added,
                }
            })
            .collect();

        debug!(
            rows = rows.len(),
            invalid_ratings, missing_dates, "catalog cleaned"
        );
        CatalogTable::from_rows(rows)
    }

    /// Parse a `date_added` cell; unparseable values are absent.
    pub fn parse_date_added(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    }

    /// Parse a release year, tolerating float-formatted integers.
    pub fn parse_year(value: &str) -> Option<i32> {
        let value = value.trim();
        let year = match value.parse::<i64>() {
            Ok(year) => year,
            Err(_) => {
                let float = value.parse::<f64>().ok()?;
                if !float.is_finite() || float.fract() != 0.0 || float.abs() > i64::MAX as f64 {
                    return None;
                }
                float as i64
            }
        };
        i32::try_from(year).ok().filter(|y| YEAR_RANGE.contains(y))
    }

    /// Split a delimited multi-value field into its values (explode).
    pub fn split_values(value: &str) -> impl Iterator<Item = &str> {
        value.split(LIST_DELIMITER).filter(|v| !v.is_empty())
    }

    /// Non-blank cell at `index`.
    fn cell(column: &[Option<String>], index: usize) -> Option<&str> {
        column
            .get(index)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[[Option<&str>; 6]]) -> RawCatalog {
        let col = |i: usize| -> Vec<Option<String>> {
            rows.iter().map(|r| r[i].map(str::to_string)).collect()
        };
        RawCatalog {
            content_type: col(0),
            country: col(1),
            rating: col(2),
            listed_in: col(3),
            release_year: col(4),
            date_added: col(5),
        }
    }

    #[test]
    fn test_shifted_rating_becomes_nr() {
        let table = DataProcessor::clean(&raw(&[
            [Some("Movie"), None, Some("74 min"), None, Some("2017"), None],
            [Some("TV Show"), None, Some("TV-MA"), None, Some("2020"), None],
        ]));
        let ratings: Vec<&str> = table.rows().iter().map(|r| r.rating.code()).collect();
        assert_eq!(ratings, vec!["NR", "TV-MA"]);
    }

    #[test]
    fn test_every_rating_valid_after_cleaning() {
        let table = DataProcessor::clean(&raw(&[
            [Some("Movie"), None, None, None, None, None],
            [Some("Movie"), None, Some(""), None, None, None],
            [Some("Movie"), None, Some("66 min"), None, None, None],
            [Some("Movie"), None, Some("PG-13"), None, None, None],
        ]));
        assert!(table
            .rows()
            .iter()
            .all(|r| Rating::ALL.contains(&r.rating)));
        assert_eq!(table.rows()[3].rating, Rating::Pg13);
    }

    #[test]
    fn test_parse_date_added() {
        assert_eq!(
            DataProcessor::parse_date_added("September 25, 2021"),
            NaiveDate::from_ymd_opt(2021, 9, 25)
        );
        assert_eq!(
            DataProcessor::parse_date_added(" August 4, 2017"),
            NaiveDate::from_ymd_opt(2017, 8, 4)
        );
        assert_eq!(
            DataProcessor::parse_date_added("2020-01-15"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        assert_eq!(DataProcessor::parse_date_added("not a date"), None);
        assert_eq!(DataProcessor::parse_date_added(""), None);
    }

    #[test]
    fn test_unparseable_date_clears_derived_fields() {
        let table = DataProcessor::clean(&raw(&[
            [Some("Movie"), None, Some("R"), None, Some("2010"), Some("someday")],
            [Some("Movie"), None, Some("R"), None, Some("2010"), Some("March 1, 2019")],
        ]));
        let rows = table.rows();
        assert_eq!((rows[0].year_added(), rows[0].month_added()), (None, None));
        assert_eq!((rows[1].year_added(), rows[1].month_added()), (Some(2019), Some(3)));
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let table = DataProcessor::clean(&raw(&[[
            Some(" "),
            Some(""),
            Some("G"),
            Some("  "),
            Some("n/a"),
            None,
        ]]));
        let row = &table.rows()[0];
        assert_eq!(row.content_type, None);
        assert_eq!(row.country, None);
        assert_eq!(row.listed_in, None);
        assert_eq!(row.release_year, None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(DataProcessor::parse_year("1995"), Some(1995));
        assert_eq!(DataProcessor::parse_year("2019.0"), Some(2019));
        assert_eq!(DataProcessor::parse_year("2019.5"), None);
        assert_eq!(DataProcessor::parse_year("soon"), None);
    }

    #[test]
    fn test_parse_year_rejects_out_of_range() {
        assert_eq!(DataProcessor::parse_year("-2147483648"), None);
        assert_eq!(DataProcessor::parse_year("-1e300"), None);
        assert_eq!(DataProcessor::parse_year("1e300"), None);
        assert_eq!(DataProcessor::parse_year("99999999999"), None);
        assert_eq!(DataProcessor::parse_year("0"), None);
        assert_eq!(DataProcessor::parse_year("1925"), Some(1925));

        let table = DataProcessor::clean(&raw(&[[
            Some("Movie"),
            None,
            Some("R"),
            None,
            Some("-2147483648"),
            Some("March 1, 2019"),
        ]]));
        assert_eq!(table.rows()[0].release_year, None);
    }

    #[test]
    fn test_split_values() {
        let values: Vec<&str> =
            DataProcessor::split_values("United States, India, ").collect();
        assert_eq!(values, vec!["United States", "India"]);
    }
}
