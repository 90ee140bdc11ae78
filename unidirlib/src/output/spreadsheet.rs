//! Spreadsheet export (SpreadsheetML 2003 XML).
//!
//! Produces a `Workbook` with a single worksheet: a header row followed by
//! one row per university. Cells carry a `String` or `Number` data type,
//! decided per cell, so one column can mix both (the global rank column
//! holds numbers for ranked universities and `Not Ranked` text otherwise).
//!
//! The document is built in memory only. Writing it somewhere is the
//! caller's job.

use std::fmt::Write;

use serde::Serialize;

use crate::data::{University, NOT_RANKED};

/// File name used when every university is exported
pub const FULL_EXPORT_FILE_NAME: &str = "Global_Universities_Database.xls";

/// File name used when a narrowed selection is exported
pub const FILTERED_EXPORT_FILE_NAME: &str = "Filtered_Universities.xls";

/// Worksheet title
pub const WORKSHEET_NAME: &str = "Universities Database";

/// Height of the header row, in points
const HEADER_ROW_HEIGHT: u32 = 30;

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CellValue {
    Number(u64),
    Text(String),
}

impl CellValue {
    /// SpreadsheetML `ss:Type` of this cell
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "Number",
            CellValue::Text(_) => "String",
        }
    }

    /// Cell content, escaped for embedding in XML
    pub fn to_xml(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => escape_xml(s),
        }
    }
}

/// Named cell styles declared in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellStyle {
    Header,
    Data,
    Link,
}

impl CellStyle {
    pub fn id(&self) -> &'static str {
        match self {
            CellStyle::Header => "Header",
            CellStyle::Data => "Data",
            CellStyle::Link => "Link",
        }
    }
}

/// Which value a column projects out of a university.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKey {
    /// 1-based position in the exported list
    Index,
    Name,
    Country,
    Location,
    Programs,
    GlobalRank,
    About,
    Qualification,
    FeeStructure,
    AcademicSession,
    Link,
}

impl ColumnKey {
    /// Value of this column for the university at `position` (0-based)
    pub fn value(&self, position: usize, uni: &University) -> CellValue {
        let text = |s: &str| CellValue::Text(s.to_string());
        match self {
            ColumnKey::Index => CellValue::Number(position as u64 + 1),
            ColumnKey::Name => text(&uni.name),
            ColumnKey::Country => text(&uni.country),
            ColumnKey::Location => text(&uni.location),
            ColumnKey::Programs => text(&uni.programs),
            ColumnKey::GlobalRank => match uni.rank() {
                Some(rank) => CellValue::Number(u64::from(rank)),
                None => text(NOT_RANKED),
            },
            ColumnKey::About => text(&uni.about),
            ColumnKey::Qualification => text(&uni.qualification),
            ColumnKey::FeeStructure => text(&uni.fee_structure),
            ColumnKey::AcademicSession => text(&uni.academic_session),
            ColumnKey::Link => text(&uni.link),
        }
    }
}

/// Optional override for how a column renders a university.
pub type CellFormatter = fn(&University) -> CellValue;

/// One exported column: projection, header label and display width.
#[derive(Debug, Clone)]
pub struct Column {
    pub key: ColumnKey,
    pub label: String,
    /// Column width in points
    pub width: u32,
    pub style: CellStyle,
    pub formatter: Option<CellFormatter>,
}

impl Column {
    pub fn new(key: ColumnKey, label: impl Into<String>, width: u32) -> Self {
        Self {
            key,
            label: label.into(),
            width,
            style: CellStyle::Data,
            formatter: None,
        }
    }

    /// Builder: cell style for data rows
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: render with `formatter` instead of the key's default value.
    ///
    /// Applies to every column, `Index` included; the formatter sees only
    /// the university, not its position.
    pub fn format(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// The fixed export layout.
    pub fn standard() -> Vec<Column> {
        vec![
            Column::new(ColumnKey::Index, "S.No", 40),
            Column::new(ColumnKey::Name, "University Name", 200),
            Column::new(ColumnKey::Country, "Country", 100),
            Column::new(ColumnKey::Location, "Location", 120),
            Column::new(ColumnKey::Programs, "Programs/Best Known For", 200),
            Column::new(ColumnKey::GlobalRank, "Global Rank", 60),
            Column::new(ColumnKey::About, "About", 300),
            Column::new(ColumnKey::Qualification, "Qualification", 200),
            Column::new(ColumnKey::FeeStructure, "Fee Structure", 150),
            Column::new(ColumnKey::AcademicSession, "Academic Session", 150),
            Column::new(ColumnKey::Link, "Website Link", 200).style(CellStyle::Link),
        ]
    }

    /// Cell for the university at `position` (0-based)
    pub fn cell(&self, position: usize, uni: &University) -> CellValue {
        match self.formatter {
            Some(format) => format(uni),
            None => self.key.value(position, uni),
        }
    }
}

/// Escape the five XML special characters.
///
/// Works in a single pass, so an `&` introduced by one entity is never
/// escaped again.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Suggested file name for an export of `exported` out of `source_len` universities.
pub fn export_file_name(exported: usize, source_len: usize) -> &'static str {
    if exported == source_len {
        FULL_EXPORT_FILE_NAME
    } else {
        FILTERED_EXPORT_FILE_NAME
    }
}

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// UTF-8 SpreadsheetML document
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub file_name: String,
    /// Number of data rows (header excluded)
    pub row_count: usize,
}

impl ExportDocument {
    /// Build a document for `records` with the given column layout.
    ///
    /// `source_len` is the size of the full dataset and only decides the
    /// suggested file name. An empty `records` slice yields a header-only
    /// document; callers that want to refuse empty exports check first.
    pub fn build(records: &[&University], columns: &[Column], source_len: usize) -> Self {
        let mut xml = String::new();
        write_document(&mut xml, records, columns);

        let file_name = export_file_name(records.len(), source_len).to_string();
        tracing::debug!(
            rows = records.len(),
            columns = columns.len(),
            bytes = xml.len(),
            file_name = %file_name,
            "built spreadsheet export"
        );

        ExportDocument {
            bytes: xml.into_bytes(),
            file_name,
            row_count: records.len(),
        }
    }

    /// Build a document with the standard column layout.
    pub fn standard(records: &[&University], source_len: usize) -> Self {
        Self::build(records, &Column::standard(), source_len)
    }

    /// Whether this export covers the whole dataset
    pub fn is_full(&self) -> bool {
        self.file_name == FULL_EXPORT_FILE_NAME
    }
}

// Writing to a String cannot fail, so the fmt::Result values are dropped.
fn write_document(xml: &mut String, records: &[&University], columns: &[Column]) {
    xml.push_str(WORKBOOK_HEAD);
    let _ = writeln!(
        xml,
        "    <Worksheet ss:Name=\"{}\">",
        escape_xml(WORKSHEET_NAME)
    );
    xml.push_str("        <Table>\n");

    for column in columns {
        let _ = writeln!(xml, "            <Column ss:Width=\"{}\"/>", column.width);
    }

    let _ = writeln!(xml, "            <Row ss:Height=\"{}\">", HEADER_ROW_HEIGHT);
    for column in columns {
        write_cell(
            xml,
            CellStyle::Header,
            &CellValue::Text(column.label.clone()),
        );
    }
    xml.push_str("            </Row>\n");

    for (position, uni) in records.iter().enumerate() {
        xml.push_str("            <Row>\n");
        for column in columns {
            write_cell(xml, column.style, &column.cell(position, uni));
        }
        xml.push_str("            </Row>\n");
    }

    xml.push_str("        </Table>\n    </Worksheet>\n</Workbook>");
}

fn write_cell(xml: &mut String, style: CellStyle, value: &CellValue) {
    let _ = writeln!(
        xml,
        "                <Cell ss:StyleID=\"{}\"><Data ss:Type=\"{}\">{}</Data></Cell>",
        style.id(),
        value.type_name(),
        value.to_xml()
    );
}

const WORKBOOK_HEAD: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<?mso-application progid="Excel.Sheet"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
    xmlns:o="urn:schemas-microsoft-com:office:office"
    xmlns:x="urn:schemas-microsoft-com:office:excel"
    xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
    <Styles>
        <Style ss:ID="Header">
            <Font ss:Bold="1" ss:Color="#FFFFFF"/>
            <Interior ss:Color="#4472C4" ss:Pattern="Solid"/>
            <Alignment ss:Horizontal="Center" ss:Vertical="Center" ss:WrapText="1"/>
        </Style>
        <Style ss:ID="Data">
            <Alignment ss:Vertical="Top" ss:WrapText="1"/>
        </Style>
        <Style ss:ID="Link">
            <Font ss:Color="#0563C1" ss:Underline="Single"/>
        </Style>
    </Styles>
"##;
