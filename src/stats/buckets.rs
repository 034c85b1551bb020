//! Fixed categorical buckets used by the aggregations.

use crate::data::Rating;
use serde::Serialize;

/// Target-audience tier a rating maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AudienceBucket {
    Kids,
    Family,
    Teen,
    Mature,
    NotRated,
}

impl AudienceBucket {
    /// Definition order; sorting by count keeps this order for ties.
    pub const ALL: [AudienceBucket; 5] = [
        AudienceBucket::Kids,
        AudienceBucket::Family,
        AudienceBucket::Teen,
        AudienceBucket::Mature,
        AudienceBucket::NotRated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AudienceBucket::Kids => "Kids (G, TV-Y, TV-Y7)",
            AudienceBucket::Family => "Family (PG, TV-G, TV-PG)",
            AudienceBucket::Teen => "Teen (PG-13, TV-14)",
            AudienceBucket::Mature => "Mature (R, TV-MA, NC-17)",
            AudienceBucket::NotRated => "Not Rated",
        }
    }

    pub fn ratings(&self) -> &'static [Rating] {
        match self {
            AudienceBucket::Kids => &[Rating::G, Rating::TvY, Rating::TvY7, Rating::TvY7Fv],
            AudienceBucket::Family => &[Rating::Pg, Rating::TvG, Rating::TvPg],
            AudienceBucket::Teen => &[Rating::Pg13, Rating::Tv14],
            AudienceBucket::Mature => &[Rating::R, Rating::TvMa, Rating::Nc17],
            AudienceBucket::NotRated => &[Rating::NotRated, Rating::Unrated],
        }
    }

    pub fn for_rating(rating: Rating) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.ratings().contains(&rating))
    }
}

/// Age of a title (years between release and addition) when it was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeBucket {
    SamePriorYear,
    OneToTwo,
    ThreeToFive,
    SixToTen,
    ElevenToTwenty,
    OverTwenty,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 6] = [
        AgeBucket::SamePriorYear,
        AgeBucket::OneToTwo,
        AgeBucket::ThreeToFive,
        AgeBucket::SixToTen,
        AgeBucket::ElevenToTwenty,
        AgeBucket::OverTwenty,
    ];

    /// Bin edges; bucket `i` covers `(EDGES[i], EDGES[i + 1]]`.
    pub const EDGES: [i32; 7] = [-10, 0, 2, 5, 10, 20, 100];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::SamePriorYear => "Same/Prior Year",
            AgeBucket::OneToTwo => "1-2 Years",
            AgeBucket::ThreeToFive => "3-5 Years",
            AgeBucket::SixToTen => "6-10 Years",
            AgeBucket::ElevenToTwenty => "11-20 Years",
            AgeBucket::OverTwenty => "20+ Years",
        }
    }

    /// Right-closed binning; ages outside `(-10, 100]` fall in no bucket.
    pub fn for_age(age: i32) -> Option<Self> {
        Self::EDGES
            .windows(2)
            .position(|edge| age > edge[0] && age <= edge[1])
            .map(|i| Self::ALL[i])
    }
}

/// Production origin of a title relative to the United States.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OriginCategory {
    UsOnly,
    International,
    MultiCountryWithUs,
    MultiCountryWithoutUs,
}

impl OriginCategory {
    pub const ALL: [OriginCategory; 4] = [
        OriginCategory::UsOnly,
        OriginCategory::International,
        OriginCategory::MultiCountryWithUs,
        OriginCategory::MultiCountryWithoutUs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OriginCategory::UsOnly => "US Content",
            OriginCategory::International => "International Content",
            OriginCategory::MultiCountryWithUs => "Multi-Country (incl. US)",
            OriginCategory::MultiCountryWithoutUs => "Multi-Country (excl. US)",
        }
    }

    /// Classify a raw `country` value.
    pub fn classify(country: &str) -> Self {
        let is_us = country.contains("United States");
        let is_multi = country.contains(',');
        match (is_us, is_multi) {
            (true, false) => OriginCategory::UsOnly,
            (false, false) => OriginCategory::International,
            (true, true) => OriginCategory::MultiCountryWithUs,
            (false, true) => OriginCategory::MultiCountryWithoutUs,
        }
    }
}
