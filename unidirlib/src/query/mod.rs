//! Query processing: filter, sort and window the dataset.
//!
//! This is the second stage of the pipeline. It provides:
//!
//! - **Options**: the filter/sort value driving a query (`FilterSortSpec`, `SortKey`)
//! - **Engine**: `evaluate`, the pure filter-then-order function
//! - **QuerySet**: evaluated results with summary and active filter tags
//! - **DisplayWindow**: how many leading results are revealed
//!
//! ## Example
//!
//! ```rust
//! use unidirlib::data::{Dataset, University};
//! use unidirlib::query::{FilterSortSpec, QuerySet, SortKey};
//!
//! let dataset = Dataset::new(vec![
//!     University { id: 1, name: "Oxford".into(), country: "UK".into(), global_rank: Some(3), ..Default::default() },
//!     University { id: 2, name: "MIT".into(), country: "USA".into(), global_rank: Some(1), ..Default::default() },
//! ]);
//!
//! let qs = QuerySet::new(&dataset, FilterSortSpec::new().sort(SortKey::Ranking));
//! assert_eq!(qs.items[0].name, "MIT");
//! ```

pub mod engine;
pub mod options;
pub mod queryset;
pub mod window;

pub use engine::{evaluate, locale_cmp, UNRANKED_SORT_RANK};
pub use options::{FilterSortSpec, SortKey};
pub use queryset::{FilterTag, QuerySet};
pub use window::DisplayWindow;
