//! Side-by-side comparison table.
//!
//! `CompareTable` is a pure presentation structure: one column per selected
//! university, one row per criterion, every cell already formatted as text.
//! Templates iterate over headers and rows; JSON output serializes it as is.

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, University};
use crate::error::UnidirError;
use crate::Result;

/// Number of universities that can be compared at once
pub const COMPARE_SLOTS: usize = 3;

/// A single criterion row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Criterion name ("Country", "Global Rank", ...)
    pub label: String,
    /// One formatted value per compared university
    pub values: Vec<String>,
}

/// Comparison of up to `COMPARE_SLOTS` universities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareTable {
    /// University names, in selection order
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

type Criterion = (&'static str, fn(&University) -> String);

/// Criteria shown in the comparison, in display order.
fn criteria() -> [Criterion; 7] {
    [
        ("Country", |u: &University| u.country.clone()),
        ("Location", |u: &University| u.location.clone()),
        ("Global Rank", University::rank_label),
        ("Programs", |u: &University| u.programs.clone()),
        ("Qualification", |u: &University| u.qualification.clone()),
        ("Fee Structure", |u: &University| u.fee_structure.clone()),
        ("Academic Session", |u: &University| u.academic_session.clone()),
    ]
}

impl CompareTable {
    /// Build a table from universities already looked up.
    pub fn from_universities(selected: &[&University]) -> Self {
        let headers = selected.iter().map(|u| u.name.clone()).collect();
        let rows = criteria()
            .into_iter()
            .map(|(label, format)| TableRow {
                label: label.to_string(),
                values: selected.iter().map(|u| format(u)).collect(),
            })
            .collect();

        CompareTable { headers, rows }
    }

    /// Look up `ids` in the dataset and compare them.
    ///
    /// Fails when more ids are given than there are slots, or when an id is
    /// not in the dataset.
    pub fn from_ids(dataset: &Dataset, ids: &[u32]) -> Result<Self> {
        if ids.len() > COMPARE_SLOTS {
            return Err(UnidirError::CompareSlotsFull {
                slots: COMPARE_SLOTS,
                requested: ids.len(),
            });
        }
        let selected = ids
            .iter()
            .map(|id| dataset.require(*id))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_universities(&selected))
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::university::tests::uni;

    fn sample() -> Dataset {
        Dataset::new(vec![
            uni(1, "Oxford", "UK", Some(3)),
            uni(2, "MIT", "USA", Some(1)),
            uni(3, "Lagos", "Nigeria", None),
            uni(4, "Tokyo", "Japan", Some(28)),
        ])
    }

    #[test]
    fn test_compare_two() {
        let table = CompareTable::from_ids(&sample(), &[2, 3]).unwrap();
        assert_eq!(table.headers, vec!["MIT", "Lagos"]);
        assert_eq!(table.rows.len(), 7);
        assert_eq!(table.rows[0].label, "Country");
        assert_eq!(table.rows[0].values, vec!["USA", "Nigeria"]);
        assert_eq!(table.rows[2].label, "Global Rank");
        assert_eq!(table.rows[2].values, vec!["#1", "Not Ranked"]);
    }

    #[test]
    fn test_compare_empty_selection() {
        let table = CompareTable::from_ids(&sample(), &[]).unwrap();
        assert!(table.is_empty());
        assert!(table.rows.iter().all(|r| r.values.is_empty()));
    }

    #[test]
    fn test_compare_unknown_id() {
        let result = CompareTable::from_ids(&sample(), &[1, 42]);
        assert!(matches!(result, Err(UnidirError::UnknownUniversity(42))));
    }

    #[test]
    fn test_compare_too_many() {
        let result = CompareTable::from_ids(&sample(), &[1, 2, 3, 4]);
        assert!(matches!(
            result,
            Err(UnidirError::CompareSlotsFull {
                slots: 3,
                requested: 4
            })
        ));
    }
}
