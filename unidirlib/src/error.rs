//! Error types for unidirlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying the directory.
///
/// The query engine and the spreadsheet exporter are total and never
/// return these; they come from dataset loading and from lookups driven
/// by user input (ids, sort keys, compare slots).
#[derive(Error, Debug)]
pub enum UnidirError {
    /// Failed to read the dataset file
    #[error("failed to read dataset '{path}': {source}")]
    DatasetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Dataset file is not valid JSON or does not match the record shape
    #[error("failed to parse dataset '{path}': {source}")]
    DatasetParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Dataset given as a string could not be parsed
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Sort key not recognized
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    /// No university with this id
    #[error("no university with id {0}")]
    UnknownUniversity(u32),

    /// More universities selected for comparison than there are slots
    #[error("all {slots} compare slots are filled ({requested} requested)")]
    CompareSlotsFull { slots: usize, requested: usize },
}
