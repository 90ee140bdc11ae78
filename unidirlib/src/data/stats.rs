//! Dataset-wide statistics: headline counts, per-region and per-country
//! breakdowns, and the featured list of top-ranked universities.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::university::University;

/// Universities ranked at or above this count as top ranked
pub const TOP_RANKED_CUTOFF: u32 = 50;

/// Universities ranked at or above this can be featured
pub const FEATURED_CUTOFF: u32 = 30;

/// Maximum number of featured universities
pub const FEATURED_LIMIT: usize = 10;

/// Number of countries in the country breakdown
pub const TOP_COUNTRIES_LIMIT: usize = 8;

/// A labelled count (one bar of a breakdown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

impl Count {
    fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Summary statistics of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of universities
    pub universities: usize,
    /// Number of distinct countries
    pub countries: usize,
    /// Universities ranked within `TOP_RANKED_CUTOFF`
    pub top_ranked: usize,
    /// Universities per region, in mapping order
    pub by_region: Vec<Count>,
    /// Countries with most universities, descending (ties by name)
    pub top_countries: Vec<Count>,
}

impl DatasetStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let universities = &dataset.universities;

        let countries = universities
            .iter()
            .map(|u| u.country.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let top_ranked = universities
            .iter()
            .filter(|u| u.rank().is_some_and(|r| r <= TOP_RANKED_CUTOFF))
            .count();

        let by_region = dataset
            .regions
            .keys()
            .map(|key| {
                let count = universities
                    .iter()
                    .filter(|u| dataset.regions.contains(key, &u.country))
                    .count();
                Count::new(key, count)
            })
            .collect();

        DatasetStats {
            universities: universities.len(),
            countries,
            top_ranked,
            by_region,
            top_countries: top_countries(universities, TOP_COUNTRIES_LIMIT),
        }
    }
}

/// Countries by number of universities, most first.
fn top_countries(universities: &[University], limit: usize) -> Vec<Count> {
    let mut per_country: BTreeMap<&str, usize> = BTreeMap::new();
    for uni in universities {
        *per_country.entry(uni.country.as_str()).or_default() += 1;
    }

    let mut counts: Vec<Count> = per_country
        .into_iter()
        .map(|(country, count)| Count::new(country, count))
        .collect();
    // Stable sort over name-ordered input keeps ties alphabetical
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Top-ranked universities to feature, best rank first.
pub fn featured(dataset: &Dataset) -> Vec<&University> {
    let mut items: Vec<&University> = dataset
        .universities
        .iter()
        .filter(|u| u.rank().is_some_and(|r| r <= FEATURED_CUTOFF))
        .collect();
    items.sort_by_key(|u| u.rank());
    items.truncate(FEATURED_LIMIT);
    items
}
