//! Region key → member countries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed lookup from a region key (e.g. `europe`) to its country names.
///
/// Keys keep their insertion order so region listings and per-region counts
/// come out in the order the mapping was defined. Mappings read from JSON
/// are ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct RegionMapping {
    entries: Vec<(String, Vec<String>)>,
}

impl From<BTreeMap<String, Vec<String>>> for RegionMapping {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<RegionMapping> for BTreeMap<String, Vec<String>> {
    fn from(mapping: RegionMapping) -> Self {
        mapping.entries.into_iter().collect()
    }
}

impl RegionMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a region with its countries
    pub fn with_region<I, S>(mut self, key: impl Into<String>, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .push((key.into(), countries.into_iter().map(Into::into).collect()));
        self
    }

    /// The six regions used by the directory.
    pub fn standard() -> Self {
        Self::new()
            .with_region(
                "americas",
                [
                    "USA",
                    "Canada",
                    "Mexico",
                    "Brazil",
                    "Argentina",
                    "Chile",
                    "Colombia",
                    "Peru",
                ],
            )
            .with_region(
                "europe",
                [
                    "UK",
                    "Germany",
                    "France",
                    "Netherlands",
                    "Switzerland",
                    "Sweden",
                    "Denmark",
                    "Norway",
                    "Finland",
                    "Belgium",
                    "Austria",
                    "Ireland",
                    "Italy",
                    "Spain",
                    "Portugal",
                    "Poland",
                    "Czech Republic",
                    "Russia",
                ],
            )
            .with_region(
                "asia",
                [
                    "China",
                    "Japan",
                    "South Korea",
                    "Singapore",
                    "Hong Kong",
                    "Taiwan",
                    "India",
                    "Malaysia",
                    "Thailand",
                    "Indonesia",
                    "Philippines",
                    "Vietnam",
                    "Pakistan",
                    "Bangladesh",
                ],
            )
            .with_region("oceania", ["Australia", "New Zealand"])
            .with_region(
                "middle-east",
                [
                    "UAE",
                    "Saudi Arabia",
                    "Qatar",
                    "Israel",
                    "Turkey",
                    "Iran",
                    "Lebanon",
                    "Jordan",
                ],
            )
            .with_region(
                "africa",
                [
                    "South Africa",
                    "Egypt",
                    "Nigeria",
                    "Kenya",
                    "Ghana",
                    "Morocco",
                    "Ethiopia",
                ],
            )
    }

    /// Countries of a region. Unknown keys yield an empty slice.
    pub fn countries(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, countries)| countries.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `country` belongs to region `key`
    pub fn contains(&self, key: &str, country: &str) -> bool {
        self.countries(key).iter().any(|c| c == country)
    }

    /// First region listing `country`, if any
    pub fn region_of(&self, country: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, countries)| countries.iter().any(|c| c == country))
            .map(|(key, _)| key.as_str())
    }

    /// Region keys in definition order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Whether the mapping has a region named `key`
    pub fn has_region(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
