//! Statistics Calculator Module
//! Handles the grouping/counting aggregations behind each chart.

use crate::data::{CatalogTable, ContentType, DataProcessor};
use crate::stats::buckets::{AgeBucket, AudienceBucket, OriginCategory};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Additions before this year are too sparse to chart.
pub const MIN_YEAR_ADDED: i32 = 2008;
/// Oldest release decade shown in the decade breakdown.
pub const MIN_DECADE: i32 = 1940;
pub const TOP_COUNTRIES: usize = 15;
pub const TOP_GENRES: usize = 15;
pub const TOP_COUNTRIES_BY_TYPE: usize = 10;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A labeled count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// A labeled count with its percentage of the included rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Movie / TV Show counts for one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSplit {
    pub label: String,
    pub movies: usize,
    pub tv_shows: usize,
}

impl TypeSplit {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            movies: 0,
            tv_shows: 0,
        }
    }

    pub fn add(&mut self, content_type: ContentType) {
        match content_type {
            ContentType::Movie => self.movies += 1,
            ContentType::TvShow => self.tv_shows += 1,
        }
    }

    pub fn get(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Movie => self.movies,
            ContentType::TvShow => self.tv_shows,
        }
    }

}

/// Every aggregation of one run, in chart order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_titles: usize,
    pub content_type_mix: Vec<CategoryShare>,
    pub yearly_additions: Vec<TypeSplit>,
    pub top_countries: Vec<CategoryCount>,
    pub audience_distribution: Vec<CategoryShare>,
    pub top_genres: Vec<CategoryCount>,
    pub content_age: Vec<CategoryShare>,
    pub monthly_additions: Vec<CategoryCount>,
    pub origin_distribution: Vec<CategoryShare>,
    pub release_decades: Vec<TypeSplit>,
    pub type_by_country: Vec<TypeSplit>,
}

/// Handles catalog aggregations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count values, most frequent first; ties keep first-seen order.
    pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (seen, value) in values.into_iter().enumerate() {
            counts.entry(value).or_insert((0, seen)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(label, (count, first))| (label, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .map(|(label, count, _)| CategoryCount {
                label: label.to_string(),
                count,
            })
            .collect()
    }

    /// Attach percentages computed over the sum of the given counts.
    pub fn with_shares(counts: Vec<CategoryCount>) -> Vec<CategoryShare> {
        let total: usize = counts.iter().map(|c| c.count).sum();
        counts
            .into_iter()
            .map(|c| CategoryShare {
                percent: if total == 0 {
                    0.0
                } else {
                    c.count as f64 / total as f64 * 100.0
                },
                label: c.label,
                count: c.count,
            })
            .collect()
    }

    /// Movies vs TV shows.
    pub fn content_type_mix(table: &CatalogTable) -> Vec<CategoryShare> {
        let counts = Self::value_counts(
            table
                .rows()
                .iter()
                .filter_map(|r| r.content_type)
                .map(|t| t.label()),
        );
        Self::with_shares(counts)
    }

    /// Additions per year (from `min_year` on), split by type.
    pub fn yearly_additions(table: &CatalogTable, min_year: i32) -> Vec<TypeSplit> {
        let mut by_year: BTreeMap<i32, TypeSplit> = BTreeMap::new();
        for row in table.rows() {
            let (Some(year), Some(content_type)) = (row.year_added(), row.content_type) else {
                continue;
            };
            if year < min_year {
                continue;
            }
            by_year
                .entry(year)
                .or_insert_with(|| TypeSplit::new(year.to_string()))
                .add(content_type);
        }
        by_year.into_values().collect()
    }

    /// Most frequent countries after exploding the country list.
    pub fn top_countries(table: &CatalogTable, limit: usize) -> Vec<CategoryCount> {
        let mut counts = Self::value_counts(
            table
                .rows()
                .iter()
                .filter_map(|r| r.country.as_deref())
                .flat_map(DataProcessor::split_values),
        );
        counts.truncate(limit);
        counts
    }

    /// Rows per audience bucket, largest bucket first.
    pub fn audience_distribution(table: &CatalogTable) -> Vec<CategoryShare> {
        let mut counts = [0usize; AudienceBucket::ALL.len()];
        for row in table.rows() {
            if let Some(bucket) = AudienceBucket::for_rating(row.rating) {
                counts[bucket as usize] += 1;
            }
        }

        let mut buckets: Vec<CategoryCount> = AudienceBucket::ALL
            .iter()
            .map(|b| CategoryCount {
                label: b.label().to_string(),
                count: counts[*b as usize],
            })
            .collect();
        // Stable: equal counts keep definition order.
        buckets.sort_by(|a, b| b.count.cmp(&a.count));
        Self::with_shares(buckets)
    }

    /// Most frequent genres after exploding `listed_in`.
    pub fn top_genres(table: &CatalogTable, limit: usize) -> Vec<CategoryCount> {
        let mut counts = Self::value_counts(
            table
                .rows()
                .iter()
                .filter_map(|r| r.listed_in.as_deref())
                .flat_map(DataProcessor::split_values),
        );
        counts.truncate(limit);
        counts
    }

    /// Years between release and addition, binned in fixed label order.
    pub fn content_age(table: &CatalogTable) -> Vec<CategoryShare> {
        let mut counts = [0usize; AgeBucket::ALL.len()];
        for row in table.rows() {
            let (Some(added), Some(released)) = (row.year_added(), row.release_year) else {
                continue;
            };
            if let Some(bucket) = added.checked_sub(released).and_then(AgeBucket::for_age) {
                counts[bucket as usize] += 1;
            }
        }

        Self::with_shares(
            AgeBucket::ALL
                .iter()
                .map(|b| CategoryCount {
                    label: b.label().to_string(),
                    count: counts[*b as usize],
                })
                .collect(),
        )
    }

    /// Additions per calendar month, zero-filled.
    pub fn monthly_additions(table: &CatalogTable) -> Vec<CategoryCount> {
        let mut counts = [0usize; 12];
        for month in table.rows().iter().filter_map(|r| r.month_added()) {
            counts[(month - 1) as usize] += 1;
        }
        MONTH_NAMES
            .iter()
            .zip(counts)
            .map(|(name, count)| CategoryCount {
                label: name.to_string(),
                count,
            })
            .collect()
    }

    /// US / international / co-production split over rows with a country.
    pub fn origin_distribution(table: &CatalogTable) -> Vec<CategoryShare> {
        let mut counts = [0usize; OriginCategory::ALL.len()];
        for country in table.rows().iter().filter_map(|r| r.country.as_deref()) {
            counts[OriginCategory::classify(country) as usize] += 1;
        }

        Self::with_shares(
            OriginCategory::ALL
                .iter()
                .map(|c| CategoryCount {
                    label: c.label().to_string(),
                    count: counts[*c as usize],
                })
                .collect(),
        )
    }

    /// Titles per release decade (from `min_decade` on), split by type.
    pub fn release_decades(table: &CatalogTable, min_decade: i32) -> Vec<TypeSplit> {
        let mut by_decade: BTreeMap<i32, TypeSplit> = BTreeMap::new();
        for row in table.rows() {
            let (Some(year), Some(content_type)) = (row.release_year, row.content_type) else {
                continue;
            };
            let Some(decade) = Self::decade_of(year).filter(|d| *d >= min_decade) else {
                continue;
            };
            by_decade
                .entry(decade)
                .or_insert_with(|| TypeSplit::new(format!("{decade}s")))
                .add(content_type);
        }
        by_decade.into_values().collect()
    }

    /// Type split for the `limit` most frequent countries, in ranking order.
    pub fn type_by_country(table: &CatalogTable, limit: usize) -> Vec<TypeSplit> {
        let top = Self::top_countries(table, limit);
        let wanted: HashSet<&str> = top.iter().map(|c| c.label.as_str()).collect();

        let mut by_country: HashMap<&str, TypeSplit> = HashMap::new();
        for row in table.rows() {
            let (Some(countries), Some(content_type)) = (row.country.as_deref(), row.content_type)
            else {
                continue;
            };
            for country in DataProcessor::split_values(countries) {
                if wanted.contains(country) {
                    by_country
                        .entry(country)
                        .or_insert_with(|| TypeSplit::new(country))
                        .add(content_type);
                }
            }
        }

        top.iter()
            .map(|c| {
                by_country
                    .remove(c.label.as_str())
                    .unwrap_or_else(|| TypeSplit::new(c.label.clone()))
            })
            .collect()
    }

    /// Start year of the decade containing `year`.
    pub fn decade_of(year: i32) -> Option<i32> {
        year.div_euclid(10).checked_mul(10)
    }

    /// Compute every aggregation.
    pub fn summarize(table: &CatalogTable) -> CatalogSummary {
        CatalogSummary {
            total_titles: table.len(),
            content_type_mix: Self::content_type_mix(table),
            yearly_additions: Self::yearly_additions(table, MIN_YEAR_ADDED),
            top_countries: Self::top_countries(table, TOP_COUNTRIES),
            audience_distribution: Self::audience_distribution(table),
            top_genres: Self::top_genres(table, TOP_GENRES),
            content_age: Self::content_age(table),
            monthly_additions: Self::monthly_additions(table),
            origin_distribution: Self::origin_distribution(table),
            release_decades: Self::release_decades(table, MIN_DECADE),
            type_by_country: Self::type_by_country(table, TOP_COUNTRIES_BY_TYPE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CatalogRow, Rating};
    use chrono::NaiveDate;

    fn row(
        content_type: ContentType,
        country: Option<&str>,
        rating: Rating,
        release_year: i32,
        added: Option<(i32, u32)>,
    ) -> CatalogRow {
        CatalogRow {
            content_type: Some(content_type),
            country: country.map(str::to_string),
            rating,
            listed_in: None,
            release_year: Some(release_year),
            date_added: added.and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1)),
        }
    }

    fn sample() -> CatalogTable {
        use ContentType::{Movie, TvShow};
        CatalogTable::from_rows(vec![
            row(Movie, Some("United States"), Rating::Pg13, 2019, Some((2020, 1))),
            row(Movie, Some("United States, Canada"), Rating::R, 1995, Some((2019, 7))),
            row(TvShow, Some("India"), Rating::TvMa, 2018, Some((2019, 7))),
            row(Movie, Some("India, United Kingdom"), Rating::TvY, 1939, Some((2007, 12))),
            row(TvShow, None, Rating::NotRated, 2021, None),
            row(Movie, Some("Canada, France"), Rating::TvMa, 2010, Some((2021, 3))),
        ])
    }

    #[test]
    fn test_value_counts_ties_keep_first_seen() {
        let counts = StatsCalculator::value_counts(["b", "a", "c", "a", "b", "d"]);
        let labels: Vec<&str> = counts.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c", "d"]);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn test_content_type_mix() {
        let mix = StatsCalculator::content_type_mix(&sample());
        assert_eq!(mix[0].label, "Movie");
        assert_eq!(mix[0].count, 4);
        assert_eq!(mix[1].count, 2);
        assert!((mix[0].percent - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_yearly_additions_filters_and_fills() {
        let years = StatsCalculator::yearly_additions(&sample(), MIN_YEAR_ADDED);
        let labels: Vec<&str> = years.iter().map(|y| y.label.as_str()).collect();
        assert_eq!(labels, vec!["2019", "2020", "2021"]);
        assert_eq!((years[0].movies, years[0].tv_shows), (1, 1));
        assert_eq!((years[1].movies, years[1].tv_shows), (1, 0));
    }

    #[test]
    fn test_top_countries_explodes_lists() {
        let top = StatsCalculator::top_countries(&sample(), 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].label, "United States");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].label, "Canada");
        assert_eq!(top[2].label, "India");
    }

    #[test]
    fn test_audience_sum_matches_mapped_rows() {
        let table = sample();
        let buckets = StatsCalculator::audience_distribution(&table);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, table.len());
        assert_eq!(buckets[0].label, AudienceBucket::Mature.label());
        assert_eq!(buckets[0].count, 3);
        // Zero-count bucket sorts last.
        assert_eq!(buckets[4].label, AudienceBucket::Family.label());
        assert_eq!(buckets[4].count, 0);
    }

    #[test]
    fn test_top_genres() {
        let mut rows = sample().rows().to_vec();
        rows[0].listed_in = Some("Dramas, Comedies".into());
        rows[1].listed_in = Some("Dramas".into());
        rows[2].listed_in = Some("International TV Shows, Comedies, Dramas".into());
        let genres = StatsCalculator::top_genres(&CatalogTable::from_rows(rows), 2);
        assert_eq!(
            genres,
            vec![
                CategoryCount { label: "Dramas".into(), count: 3 },
                CategoryCount { label: "Comedies".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_content_age_bins() {
        let ages = StatsCalculator::content_age(&sample());
        let counts: Vec<usize> = ages.iter().map(|a| a.count).collect();
        // ages: 1, 24, 1, 68, 11
        assert_eq!(counts, vec![0, 2, 0, 0, 1, 2]);
        assert_eq!(ages[0].label, "Same/Prior Year");
        assert!((ages.iter().map(|a| a.percent).sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_sum_matches_dated_rows() {
        let table = sample();
        let months = StatsCalculator::monthly_additions(&table);
        assert_eq!(months.len(), 12);
        assert_eq!(months[6].label, "Jul");
        assert_eq!(months[6].count, 2);
        assert_eq!(months[1].count, 0);
        let dated = table.rows().iter().filter(|r| r.month_added().is_some()).count();
        assert_eq!(months.iter().map(|m| m.count).sum::<usize>(), dated);
    }

    #[test]
    fn test_origin_sum_matches_rows_with_country() {
        let table = sample();
        let origins = StatsCalculator::origin_distribution(&table);
        let counts: Vec<usize> = origins.iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        let with_country = table.rows().iter().filter(|r| r.country.is_some()).count();
        assert_eq!(counts.iter().sum::<usize>(), with_country);
    }

    #[test]
    fn test_release_decades() {
        let decades = StatsCalculator::release_decades(&sample(), MIN_DECADE);
        let labels: Vec<&str> = decades.iter().map(|d| d.label.as_str()).collect();
        // 1939 falls below the 1940 floor.
        assert_eq!(labels, vec!["1990s", "2010s", "2020s"]);
        assert_eq!((decades[1].movies, decades[1].tv_shows), (2, 1));
        assert_eq!(StatsCalculator::decade_of(1995), Some(1990));
        assert_eq!(StatsCalculator::decade_of(1939), Some(1930));
        assert_eq!(StatsCalculator::decade_of(i32::MIN), None);
    }

    #[test]
    fn test_type_by_country_follows_ranking() {
        let table = sample();
        let split = StatsCalculator::type_by_country(&table, 3);
        let labels: Vec<&str> = split.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["United States", "Canada", "India"]);
        assert_eq!((split[2].movies, split[2].tv_shows), (1, 1));
        assert_eq!((split[1].movies, split[1].tv_shows), (2, 0));

        // A title without a type still counts toward the country ranking.
        let mut rows = table.rows().to_vec();
        rows.push(CatalogRow {
            content_type: None,
            ..row(ContentType::Movie, Some("India"), Rating::R, 2015, None)
        });
        let split = StatsCalculator::type_by_country(&CatalogTable::from_rows(rows), 3);
        let labels: Vec<&str> = split.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["India", "United States", "Canada"]);
        assert_eq!((split[0].movies, split[0].tv_shows), (1, 1));
    }

    #[test]
    fn test_extreme_release_year_is_skipped() {
        let table = CatalogTable::from_rows(vec![
            row(ContentType::Movie, Some("France"), Rating::R, i32::MIN, Some((2020, 1))),
            row(ContentType::Movie, Some("France"), Rating::R, 2018, Some((2020, 1))),
        ]);
        let ages = StatsCalculator::content_age(&table);
        assert_eq!(ages.iter().map(|a| a.count).sum::<usize>(), 1);
        let decades = StatsCalculator::release_decades(&table, i32::MIN);
        let labels: Vec<&str> = decades.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["2010s"]);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let table = sample();
        let first = serde_json::to_string(&StatsCalculator::summarize(&table)).unwrap();
        let second = serde_json::to_string(&StatsCalculator::summarize(&table)).unwrap();
        assert_eq!(first, second);
    }
}
