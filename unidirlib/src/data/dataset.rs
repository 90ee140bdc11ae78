//! Loading the static dataset.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::region::RegionMapping;
use super::university::University;
use crate::error::UnidirError;
use crate::Result;

/// The immutable source of truth: every university plus the region mapping.
///
/// Loaded once at startup. Queries borrow records from it; nothing mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub universities: Vec<University>,
    #[serde(default = "RegionMapping::standard")]
    pub regions: RegionMapping,
}

/// Parse either accepted file shape: a bare array of records, or an object
/// with `universities` and an optional `regions` table.
///
/// The shape is picked from the first token so serde_json reports errors
/// against the concrete type, with line and column.
fn parse_dataset(json: &str) -> serde_json::Result<Dataset> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<University>>(json).map(Dataset::new)
    } else {
        serde_json::from_str(json)
    }
}

impl Dataset {
    /// Create a dataset using the standard region mapping
    pub fn new(universities: Vec<University>) -> Self {
        Self {
            universities,
            regions: RegionMapping::standard(),
        }
    }

    /// Parse a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(parse_dataset(json)?)
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| UnidirError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = parse_dataset(&text).map_err(|source| UnidirError::DatasetParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            universities = dataset.len(),
            regions = dataset.regions.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Number of universities
    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    /// Look up a university by id
    pub fn get(&self, id: u32) -> Option<&University> {
        self.universities.iter().find(|u| u.id == id)
    }

    /// Look up a university by id, failing for unknown ids
    pub fn require(&self, id: u32) -> Result<&University> {
        self.get(id).ok_or(UnidirError::UnknownUniversity(id))
    }

    /// Distinct countries, sorted
    pub fn countries(&self) -> Vec<&str> {
        self.universities
            .iter()
            .map(|u| u.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct countries of the dataset that belong to `region`, sorted.
    ///
    /// Unknown regions yield no countries.
    pub fn countries_in_region(&self, region: &str) -> Vec<&str> {
        self.universities
            .iter()
            .filter(|u| self.regions.contains(region, &u.country))
            .map(|u| u.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::university::tests::uni;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Dataset {
        Dataset::new(vec![
            uni(1, "Oxford", "UK", Some(3)),
            uni(2, "MIT", "USA", Some(1)),
            uni(3, "Cambridge", "UK", Some(5)),
            uni(4, "Tokyo", "Japan", None),
        ])
    }

    #[test]
    fn test_countries_sorted_unique() {
        assert_eq!(sample().countries(), vec!["Japan", "UK", "USA"]);
    }

    #[test]
    fn test_countries_in_region() {
        let dataset = sample();
        assert_eq!(dataset.countries_in_region("europe"), vec!["UK"]);
        assert_eq!(dataset.countries_in_region("asia"), vec!["Japan"]);
        assert!(dataset.countries_in_region("nowhere").is_empty());
    }

    #[test]
    fn test_get_and_require() {
        let dataset = sample();
        assert_eq!(dataset.get(2).map(|u| u.name.as_str()), Some("MIT"));
        assert!(dataset.get(99).is_none());
        assert!(matches!(
            dataset.require(99),
            Err(UnidirError::UnknownUniversity(99))
        ));
    }

    #[test]
    fn test_from_json_array() {
        let dataset =
            Dataset::from_json_str(r#"[{"id": 1, "name": "A", "country": "UK"}]"#).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.regions, RegionMapping::standard());
    }

    #[test]
    fn test_from_json_object_with_regions() {
        let json = r#"{
            "universities": [{"id": 1, "name": "A", "country": "Atlantis"}],
            "regions": {"sea": ["Atlantis"]}
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.countries_in_region("sea"), vec!["Atlantis"]);
        assert!(!dataset.regions.has_region("europe"));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 5, "name": "B", "country": "USA"}}]"#).unwrap();
        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.get(5).unwrap().country, "USA");
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = Dataset::from_path("/nonexistent/universities.json");
        assert!(matches!(result, Err(UnidirError::DatasetRead { .. })));
    }

    #[test]
    fn test_bad_record_field_is_located() {
        let json = r#"[
            {"id": 1, "name": "A", "country": "UK"},
            {"id": 2, "name": "B", "country": "UK", "globalRank": "N/A"}
        ]"#;
        let message = Dataset::from_json_str(json).unwrap_err().to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("globalRank") || message.contains("N/A"), "{message}");

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"universities": [{{"id": "x"}}]}}"#).unwrap();
        let message = Dataset::from_path(file.path()).unwrap_err().to_string();
        assert!(message.contains("line 1"), "{message}");
    }

    #[test]
    fn test_from_path_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = Dataset::from_path(file.path());
        assert!(matches!(result, Err(UnidirError::DatasetParse { .. })));
    }
}
