//! # unidirlib
//!
//! Query engine and spreadsheet exporter for a static directory of universities.
//!
//! ## Overview
//!
//! The library works on a fixed, in-memory dataset loaded once at startup.
//! Every query is a pure function of the dataset and a filter/sort value;
//! nothing is cached or mutated between calls. The data flows through three
//! stages:
//!
//! - **Data**: `University` records, the `RegionMapping` and the `Dataset`
//! - **Query**: `FilterSortSpec` in, ordered `Vec<&University>` out (`evaluate`, `QuerySet`)
//! - **Output**: `ExportDocument` (SpreadsheetML) and `CompareTable`
//!
//! ## Filtering
//!
//! Search text, region, country and stream filters are ANDed. Search and
//! stream match case-insensitively as substrings; country matches exactly.
//! An unknown region key has no countries, so it matches nothing.
//!
//! The `Unranked` sort key is not an ordering: it selects every unranked
//! university in the dataset and ignores the other filters.
//!
//! ## Example
//!
//! ```rust
//! use unidirlib::{Dataset, ExportDocument, FilterSortSpec, QuerySet, SortKey};
//!
//! let dataset = Dataset::from_json_str(r#"[
//!     {"id": 1, "name": "Oxford", "country": "UK", "globalRank": 3, "programs": "Law, Medicine"},
//!     {"id": 2, "name": "MIT", "country": "USA", "globalRank": 1, "programs": "Engineering"},
//!     {"id": 3, "name": "Lagos", "country": "Nigeria", "programs": "Law"}
//! ]"#).unwrap();
//!
//! // Filter and sort
//! let spec = FilterSortSpec::new().stream("law").sort(SortKey::Ranking);
//! let qs = QuerySet::new(&dataset, spec);
//! assert_eq!(qs.items.len(), 2);
//! assert_eq!(qs.items[0].name, "Oxford");
//!
//! // Export the narrowed view
//! let doc = ExportDocument::standard(&qs.items, dataset.len());
//! assert_eq!(doc.file_name, "Filtered_Universities.xls");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;

pub use data::{featured, Count, Dataset, DatasetStats, RegionMapping, University, NOT_RANKED};
pub use error::UnidirError;
pub use output::{
    escape_xml, CellStyle, CellValue, Column, ColumnKey, CompareTable, ExportDocument, TableRow,
    COMPARE_SLOTS,
};
pub use query::{evaluate, DisplayWindow, FilterSortSpec, FilterTag, QuerySet, SortKey};

/// Result type for unidirlib operations
pub type Result<T> = std::result::Result<T, UnidirError>;
