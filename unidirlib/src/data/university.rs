//! The university record.

use serde::{Deserialize, Serialize};

/// Label used wherever an unranked university's rank would be shown.
pub const NOT_RANKED: &str = "Not Ranked";

/// Separator used in the joined `programs` field.
const PROGRAM_SEPARATOR: &str = ", ";

/// One university entry of the static dataset.
///
/// Text fields default to empty strings when missing from the source JSON,
/// so display and export never see an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    /// Unique identifier, stable for the lifetime of the dataset
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub location: String,
    /// Program labels joined with `", "`
    #[serde(default)]
    pub programs: String,
    /// Global rank; `None` (or missing) means unranked
    #[serde(default)]
    pub global_rank: Option<u32>,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub fee_structure: String,
    #[serde(default)]
    pub academic_session: String,
    /// Website URL
    #[serde(default)]
    pub link: String,
}

impl University {
    /// Global rank, if the university is ranked.
    ///
    /// A rank of zero is not a valid position and counts as unranked.
    pub fn rank(&self) -> Option<u32> {
        self.global_rank.filter(|rank| *rank > 0)
    }

    /// Whether the university has a global rank
    pub fn is_ranked(&self) -> bool {
        self.rank().is_some()
    }

    /// Rank for display: `#12` or `Not Ranked`
    pub fn rank_label(&self) -> String {
        match self.rank() {
            Some(rank) => format!("#{}", rank),
            None => NOT_RANKED.to_string(),
        }
    }

    /// Program labels as a list.
    ///
    /// Matching always runs against the joined `programs` text; this view is
    /// only for display.
    pub fn program_list(&self) -> Vec<&str> {
        self.programs
            .split(PROGRAM_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}
