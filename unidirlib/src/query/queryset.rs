//! Query set: evaluated results ready for presentation.
//!
//! A QuerySet sits between the dataset and whatever renders it. It holds
//! the ordered records from `evaluate` plus what a results header needs:
//! the dataset size, the active filter tags and the summary line.

use serde::Serialize;

use crate::data::{Dataset, University};

use super::engine::evaluate;
use super::options::FilterSortSpec;

/// One active filter, as shown in a row of removable filter tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTag {
    /// Which filter this is ("Search", "Region", "Country", "Stream")
    pub label: String,
    pub value: String,
}

/// Evaluated results for one spec.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySet<'a> {
    /// Spec the items were produced from
    pub spec: FilterSortSpec,
    /// Ordered results
    pub items: Vec<&'a University>,
    /// Size of the whole dataset
    pub total: usize,
}

impl<'a> QuerySet<'a> {
    /// Evaluate `spec` against the dataset.
    pub fn new(dataset: &'a Dataset, spec: FilterSortSpec) -> Self {
        let items = evaluate(&dataset.universities, &dataset.regions, &spec);
        QuerySet {
            spec,
            items,
            total: dataset.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the results cover the whole dataset
    pub fn is_complete(&self) -> bool {
        self.items.len() == self.total
    }

    /// Tags for the filters currently narrowing the results.
    pub fn active_filters(&self) -> Vec<FilterTag> {
        let spec = &self.spec;
        let search = spec.search.trim();
        [
            ("Search", (!search.is_empty()).then_some(search)),
            ("Region", spec.region.as_deref()),
            ("Country", spec.country.as_deref()),
            ("Stream", spec.stream.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value.map(|v| FilterTag {
                label: label.to_string(),
                value: v.to_string(),
            })
        })
        .collect()
    }

    /// Results header line given how many rows are currently shown.
    pub fn summary(&self, shown: usize) -> String {
        if self.is_complete() {
            format!(
                "Showing {} of {} universities",
                shown.min(self.len()),
                self.len()
            )
        } else {
            format!("Found {} universities matching your criteria", self.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::university::tests::uni;
    use crate::query::options::SortKey;

    fn sample() -> Dataset {
        Dataset::new(vec![
            uni(1, "Oxford", "UK", Some(3)),
            uni(2, "MIT", "USA", Some(1)),
            uni(3, "Cambridge", "UK", Some(5)),
        ])
    }

    #[test]
    fn test_queryset_full_summary() {
        let dataset = sample();
        let qs = QuerySet::new(&dataset, FilterSortSpec::new());
        assert!(qs.is_complete());
        assert_eq!(qs.summary(2), "Showing 2 of 3 universities");
        assert_eq!(qs.summary(1000), "Showing 3 of 3 universities");
    }

    #[test]
    fn test_queryset_filtered_summary() {
        let dataset = sample();
        let qs = QuerySet::new(&dataset, FilterSortSpec::new().country("UK"));
        assert_eq!(qs.len(), 2);
        assert_eq!(qs.total, 3);
        assert_eq!(qs.summary(2), "Found 2 universities matching your criteria");
    }

    #[test]
    fn test_queryset_sorted() {
        let dataset = sample();
        let qs = QuerySet::new(&dataset, FilterSortSpec::new().sort(SortKey::Ranking));
        let names: Vec<&str> = qs.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["MIT", "Oxford", "Cambridge"]);
    }

    #[test]
    fn test_active_filters() {
        let dataset = sample();
        let spec = FilterSortSpec::new()
            .search(" ox ")
            .country("UK")
            .sort(SortKey::Name);
        let qs = QuerySet::new(&dataset, spec);
        assert_eq!(
            qs.active_filters(),
            vec![
                FilterTag {
                    label: "Search".to_string(),
                    value: "ox".to_string()
                },
                FilterTag {
                    label: "Country".to_string(),
                    value: "UK".to_string()
                },
            ]
        );
        assert!(QuerySet::new(&dataset, FilterSortSpec::new())
            .active_filters()
            .is_empty());
    }
}
