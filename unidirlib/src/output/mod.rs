//! Output formatting: spreadsheet export and comparison tables.
//!
//! This module handles the last stage of the pipeline. It provides:
//!
//! - **ExportDocument**: SpreadsheetML workbook built from a list of universities
//! - **CompareTable**: side-by-side criteria table for a few universities
//!
//! Both are pure presentation. Filtering and ordering happen in `query`;
//! writing files happens in the caller.
//!
//! ## Example
//!
//! ```rust
//! use unidirlib::data::{Dataset, University};
//! use unidirlib::output::ExportDocument;
//!
//! let dataset = Dataset::new(vec![University { id: 1, name: "A & B".into(), ..Default::default() }]);
//! let records: Vec<&University> = dataset.universities.iter().collect();
//!
//! let doc = ExportDocument::standard(&records, dataset.len());
//! assert_eq!(doc.file_name, "Global_Universities_Database.xls");
//! assert!(String::from_utf8(doc.bytes).unwrap().contains("A &amp; B"));
//! ```

pub mod spreadsheet;
pub mod table;

pub use spreadsheet::{
    escape_xml, export_file_name, CellStyle, CellValue, Column, ColumnKey, ExportDocument,
    FILTERED_EXPORT_FILE_NAME, FULL_EXPORT_FILE_NAME,
};
pub use table::{CompareTable, TableRow, COMPARE_SLOTS};
