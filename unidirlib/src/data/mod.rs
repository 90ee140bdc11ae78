//! Raw data: university records, region mapping and the loaded dataset.
//!
//! This is the first stage of the pipeline. Everything here is loaded once
//! and never mutated afterwards; later stages only borrow from it.

pub mod dataset;
pub mod region;
pub mod stats;
pub mod university;

pub use dataset::Dataset;
pub use region::RegionMapping;
pub use stats::{featured, Count, DatasetStats};
pub use university::{University, NOT_RANKED};
