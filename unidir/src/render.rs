//! Template contexts for text output.
//!
//! Handlers return raw library data in structured (JSON) mode. For text
//! modes they build one of these contexts, with every cell padded and
//! truncated here so templates only iterate and print.

use serde::Serialize;
use unidirlib::{
    CompareTable, Count, DatasetStats, FilterTag, QuerySet, RegionMapping, TableRow, University,
};

const RANK_WIDTH: usize = 11;
const NAME_WIDTH: usize = 40;
const COUNTRY_WIDTH: usize = 16;
const PROGRAMS_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 18;
const COMPARE_CELL_WIDTH: usize = 28;
const BAR_WIDTH: usize = 30;

/// Truncate to `max_len` characters, marking the cut with ".."
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let kept: String = text.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        text.to_string()
    }
}

/// Truncate then left-align to exactly `width` characters
fn cell(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width), width = width)
}

/// One pre-formatted result line
#[derive(Debug, Serialize)]
struct ListRow {
    id: String,
    rank: String,
    name: String,
    country: String,
    programs: String,
}

impl ListRow {
    fn new(uni: &University) -> Self {
        ListRow {
            id: format!("{:>6}", uni.id),
            rank: cell(&uni.rank_label(), RANK_WIDTH),
            name: cell(&uni.name, NAME_WIDTH),
            country: cell(&uni.country, COUNTRY_WIDTH),
            programs: truncate(&uni.programs, PROGRAMS_WIDTH),
        }
    }
}

/// Context for `list.jinja`
#[derive(Debug, Serialize)]
pub struct ListContext {
    summary: String,
    filters: Vec<FilterTag>,
    header: String,
    separator: String,
    rows: Vec<ListRow>,
    hidden: usize,
}

impl ListContext {
    /// `visible` is the revealed prefix of `qs.items`.
    pub fn new(qs: &QuerySet<'_>, visible: &[&University]) -> Self {
        let header = format!(
            "{:>6}  {}{}{}{}",
            "ID",
            cell("Rank", RANK_WIDTH),
            cell("Name", NAME_WIDTH),
            cell("Country", COUNTRY_WIDTH),
            "Programs"
        );
        let separator = "-".repeat(8 + RANK_WIDTH + NAME_WIDTH + COUNTRY_WIDTH + PROGRAMS_WIDTH);

        ListContext {
            summary: qs.summary(visible.len()),
            filters: qs.active_filters(),
            header,
            separator,
            rows: visible.iter().map(|u| ListRow::new(u)).collect(),
            hidden: qs.len() - visible.len(),
        }
    }
}

/// A labelled field of the detail view
#[derive(Debug, Serialize)]
struct Field {
    label: String,
    value: String,
}

/// Context for `show.jinja`
#[derive(Debug, Serialize)]
pub struct DetailContext {
    title: String,
    subtitle: String,
    fields: Vec<Field>,
    link: String,
}

impl DetailContext {
    pub fn new(uni: &University, regions: &RegionMapping) -> Self {
        let region = regions.region_of(&uni.country).unwrap_or("-").to_string();
        let fields = [
            ("Global Rank", uni.rank_label()),
            ("Region", region),
            ("About", uni.about.clone()),
            ("Programs", uni.program_list().join("\n")),
            ("Qualification", uni.qualification.clone()),
            ("Fee Structure", uni.fee_structure.clone()),
            ("Academic Session", uni.academic_session.clone()),
        ]
        .into_iter()
        .map(|(label, value)| Field {
            label: cell(label, LABEL_WIDTH),
            value: value.replace('\n', &format!("\n{}", " ".repeat(LABEL_WIDTH))),
        })
        .collect();

        DetailContext {
            title: uni.name.clone(),
            subtitle: format!("{}, {}", uni.location, uni.country),
            fields,
            link: uni.link.clone(),
        }
    }
}

/// Context for `compare.jinja`
#[derive(Debug, Serialize)]
pub struct CompareContext {
    empty: bool,
    header: String,
    separator: String,
    rows: Vec<String>,
}

impl CompareContext {
    pub fn new(table: &CompareTable) -> Self {
        let line = |label: &str, values: &[String]| {
            let mut out = cell(label, LABEL_WIDTH);
            for value in values {
                out.push_str(&cell(value, COMPARE_CELL_WIDTH));
            }
            out.trim_end().to_string()
        };

        CompareContext {
            empty: table.is_empty(),
            header: line("Criteria", &table.headers),
            separator: "-".repeat(LABEL_WIDTH + COMPARE_CELL_WIDTH * table.headers.len()),
            rows: table
                .rows
                .iter()
                .map(|TableRow { label, values }| line(label, values))
                .collect(),
        }
    }
}

/// Bar line for a count breakdown
fn bar_line(count: &Count, max: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (count.count * BAR_WIDTH).div_ceil(max)
    };
    format!(
        "{}{:>5}  {}",
        cell(&count.label, LABEL_WIDTH),
        count.count,
        "#".repeat(filled)
    )
}

fn bar_lines(counts: &[Count]) -> Vec<String> {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    counts.iter().map(|c| bar_line(c, max)).collect()
}

/// Context for `stats.jinja`
#[derive(Debug, Serialize)]
pub struct StatsContext {
    universities: usize,
    countries: usize,
    top_ranked: usize,
    regions: Vec<String>,
    countries_chart: Vec<String>,
    featured: Vec<String>,
}

impl StatsContext {
    pub fn new(stats: &DatasetStats, featured: &[&University]) -> Self {
        StatsContext {
            universities: stats.universities,
            countries: stats.countries,
            top_ranked: stats.top_ranked,
            regions: bar_lines(&stats.by_region),
            countries_chart: bar_lines(&stats.top_countries),
            featured: featured
                .iter()
                .map(|u| {
                    format!(
                        "{}{} ({})",
                        cell(&u.rank_label(), RANK_WIDTH),
                        u.name,
                        u.country
                    )
                })
                .collect(),
        }
    }
}

/// One region with its dataset countries
#[derive(Debug, Serialize)]
pub struct RegionLine {
    pub key: String,
    pub count: usize,
    pub countries: String,
}

/// Context for `regions.jinja`
#[derive(Debug, Serialize)]
pub struct RegionsContext {
    pub regions: Vec<RegionLine>,
}
