//! Filter and sort options for directory queries.
//!
//! A `FilterSortSpec` is a plain value: the caller builds a fresh one (or
//! edits its own copy) on every input change and hands it to the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnidirError;

/// How to order (or, for `Unranked`, select) query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep dataset order
    #[default]
    None,
    /// Order by name (locale-style comparison)
    Name,
    /// Order by global rank, unranked last
    Ranking,
    /// Order by country name
    Country,
    /// Not an ordering: select every unranked university in the dataset,
    /// ignoring all other filters
    Unranked,
}

impl SortKey {
    /// Whether this key replaces filtering instead of ordering
    pub fn is_filter_override(&self) -> bool {
        matches!(self, SortKey::Unranked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Name => "name",
            SortKey::Ranking => "ranking",
            SortKey::Country => "country",
            SortKey::Unranked => "unranked",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnidirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "default" => Ok(SortKey::None),
            "name" => Ok(SortKey::Name),
            "ranking" | "rank" => Ok(SortKey::Ranking),
            "country" => Ok(SortKey::Country),
            "unranked" => Ok(SortKey::Unranked),
            _ => Err(UnidirError::UnknownSortKey(s.to_string())),
        }
    }
}

/// The current combination of search text, filters and sort key.
///
/// Unset filters pass every record. Empty strings count as unset, so a
/// cleared input box behaves like no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSortSpec {
    /// Case-insensitive substring over name, location, country and programs
    pub search: String,
    /// Region key resolved through the region mapping
    pub region: Option<String>,
    /// Exact, case-sensitive country match
    pub country: Option<String>,
    /// Case-insensitive substring of programs
    pub stream: Option<String>,
    pub sort: SortKey,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl FilterSortSpec {
    /// Spec with no filters and dataset order
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Builder: set region key
    pub fn region(mut self, key: impl Into<String>) -> Self {
        self.region = non_empty(key);
        self
    }

    /// Builder: set country
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = non_empty(country);
        self
    }

    /// Builder: set stream
    pub fn stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = non_empty(stream);
        self
    }

    /// Builder: set sort key
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Search text as matched: trimmed and lower-cased
    pub fn search_needle(&self) -> String {
        self.search.trim().to_lowercase()
    }
}
