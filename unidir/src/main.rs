//! # unidir
//!
//! A CLI for browsing a static directory of universities.
//!
//! ## Overview
//!
//! unidir is built on top of unidirlib. It loads a dataset file once, turns
//! command-line flags into a filter/sort spec, and renders the results as a
//! table or JSON. It can also compare universities side by side and export a
//! filtered selection as a spreadsheet.
//!
//! ## Usage
//!
//! ```bash
//! # List everything in dataset order
//! unidir --data universities.json
//!
//! # Search, filter and sort
//! unidir list --search oxford
//! unidir list --region europe --stream engineering --sort ranking
//!
//! # Every unranked university (ignores other filters)
//! unidir list --sort unranked
//!
//! # Details and comparison
//! unidir show 12
//! unidir compare 1 2 3
//!
//! # Statistics and lookups
//! unidir stats
//! unidir regions
//! unidir countries --region asia
//!
//! # Export to a spreadsheet
//! unidir export --region europe --dir ./out
//!
//! # Output as JSON
//! unidir list --country UK --output json
//! ```

mod render;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use outstanding::Theme;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use unidirlib::{
    featured, CompareTable, Dataset, DatasetStats, DisplayWindow, ExportDocument, FilterSortSpec,
    FilterTag, QuerySet, SortKey, University,
};

use render::{CompareContext, DetailContext, ListContext, RegionLine, RegionsContext, StatsContext};

const LIST_TEMPLATE: &str = include_str!("../templates/list.jinja");
const SHOW_TEMPLATE: &str = include_str!("../templates/show.jinja");
const COMPARE_TEMPLATE: &str = include_str!("../templates/compare.jinja");
const STATS_TEMPLATE: &str = include_str!("../templates/stats.jinja");
const REGIONS_TEMPLATE: &str = include_str!("../templates/regions.jinja");
const COUNTRIES_TEMPLATE: &str = include_str!("../templates/countries.jinja");
const EXPORT_TEMPLATE: &str = include_str!("../templates/export.jinja");

/// Default dataset location
const DEFAULT_DATA_PATH: &str = "universities.json";

/// Sort keys accepted on the command line
const SORT_KEYS: [&str; 5] = ["none", "name", "ranking", "country", "unranked"];

/// Add the region/country/stream filter flags
fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("region")
            .short('r')
            .long("region")
            .help("Filter by region key (e.g. europe, middle-east)"),
    )
    .arg(
        Arg::new("country")
            .short('c')
            .long("country")
            .help("Filter by exact country name"),
    )
    .arg(
        Arg::new("stream")
            .long("stream")
            .help("Filter by program/stream (case-insensitive substring)"),
    )
}

/// Add the search, sort and display window flags used by listings
fn list_args(cmd: Command) -> Command {
    filter_args(cmd)
        .arg(
            Arg::new("search")
                .short('s')
                .long("search")
                .help("Search name, location, country and programs"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_parser(SORT_KEYS)
                .help("Sort order; 'unranked' lists every unranked university and ignores filters"),
        )
        .arg(
            Arg::new("limit")
                .short('n')
                .long("limit")
                .value_parser(value_parser!(usize))
                .help("Number of results revealed initially"),
        )
        .arg(
            Arg::new("more")
                .long("more")
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Reveal this many additional pages of results"),
        )
}

/// Build the clap Command structure
fn build_command() -> Command {
    let root = Command::new("unidir")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Browse, filter, compare and export a directory of universities")
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .default_value(DEFAULT_DATA_PATH)
                .help("Path to the dataset JSON file"),
        );

    list_args(root)
        .subcommand(list_args(
            Command::new("list").about("List universities (default command)"),
        ))
        .subcommand(
            Command::new("show")
                .about("Show details of one university")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("University id"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare up to three universities side by side")
                .arg(
                    Arg::new("ids")
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("University ids"),
                ),
        )
        .subcommand(Command::new("stats").about("Show dataset statistics"))
        .subcommand(Command::new("regions").about("List regions and their countries"))
        .subcommand(
            Command::new("countries")
                .about("List countries present in the dataset")
                .arg(
                    Arg::new("region")
                        .short('r')
                        .long("region")
                        .help("Only countries of this region"),
                ),
        )
        .subcommand(filter_args(
            Command::new("export")
                .about("Export universities to a spreadsheet (.xls)")
                .arg(
                    Arg::new("dir")
                        .short('d')
                        .long("dir")
                        .default_value(".")
                        .help("Directory to write the spreadsheet to"),
                ),
        ))
}

/// Load the dataset named by `--data`
fn load_dataset(matches: &ArgMatches) -> Result<Dataset, anyhow::Error> {
    let path = matches
        .get_one::<String>("data")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_DATA_PATH);
    Ok(Dataset::from_path(path)?)
}

fn get_str<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches.get_one::<String>(id).map(|s| s.as_str())
}

/// Build the region/country/stream part of a spec
fn build_filter(matches: &ArgMatches) -> FilterSortSpec {
    let mut spec = FilterSortSpec::new();
    if let Some(region) = get_str(matches, "region") {
        spec = spec.region(region);
    }
    if let Some(country) = get_str(matches, "country") {
        spec = spec.country(country);
    }
    if let Some(stream) = get_str(matches, "stream") {
        spec = spec.stream(stream);
    }
    spec
}

/// Build the full spec for listings
fn build_spec(matches: &ArgMatches) -> Result<FilterSortSpec, anyhow::Error> {
    let mut spec = build_filter(matches);
    if let Some(search) = get_str(matches, "search") {
        spec = spec.search(search);
    }
    if let Some(sort) = get_str(matches, "sort") {
        spec = spec.sort(sort.parse::<SortKey>()?);
    }
    Ok(spec)
}

/// Build the display window from `--limit` and `--more`
fn build_window(matches: &ArgMatches) -> DisplayWindow {
    let mut window = matches
        .get_one::<usize>("limit")
        .map(|limit| DisplayWindow::new(*limit))
        .unwrap_or_default();
    let pages = matches.get_one::<usize>("more").copied().unwrap_or(0);
    for _ in 0..pages {
        window.load_more();
    }
    window
}

/// Raw listing data for structured output
#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    summary: String,
    filters: Vec<FilterTag>,
    sort: SortKey,
    total: usize,
    matched: usize,
    has_more: bool,
    universities: &'a [&'a University],
}

/// Handler for list command
fn list_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let spec = build_spec(matches)?;
    let window = build_window(matches);

    let qs = QuerySet::new(&dataset, spec);
    let visible = window.visible(&qs.items);
    tracing::info!(
        matched = qs.len(),
        shown = visible.len(),
        total = qs.total,
        "listing universities"
    );

    // For JSON mode, return raw data
    if ctx.output_mode.is_structured() {
        let output = ListOutput {
            summary: qs.summary(visible.len()),
            filters: qs.active_filters(),
            sort: qs.spec.sort,
            total: qs.total,
            matched: qs.len(),
            has_more: window.has_more(qs.len()),
            universities: visible,
        };
        return Ok(Output::Render(serde_json::to_value(&output)?));
    }

    let context = ListContext::new(&qs, visible);
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for show command
fn show_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let id = *matches
        .get_one::<u32>("id")
        .context("missing university id")?;
    let uni = dataset.require(id)?;

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(uni)?));
    }
    let context = DetailContext::new(uni, &dataset.regions);
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for compare command
fn compare_handler(
    matches: &ArgMatches,
    ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let ids: Vec<u32> = matches
        .get_many::<u32>("ids")
        .map(|v| v.copied().collect())
        .unwrap_or_default();
    let table = CompareTable::from_ids(&dataset, &ids)?;

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&table)?));
    }
    let context = CompareContext::new(&table);
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for stats command
fn stats_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let stats = DatasetStats::from_dataset(&dataset);
    let featured = featured(&dataset);

    if ctx.output_mode.is_structured() {
        let mut value = serde_json::to_value(&stats)?;
        value["featured"] = serde_json::to_value(&featured)?;
        return Ok(Output::Render(value));
    }
    let context = StatsContext::new(&stats, &featured);
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for regions command
fn regions_handler(
    matches: &ArgMatches,
    _ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let stats = DatasetStats::from_dataset(&dataset);

    let regions = stats
        .by_region
        .iter()
        .map(|count| RegionLine {
            key: count.label.clone(),
            count: count.count,
            countries: dataset.countries_in_region(&count.label).join(", "),
        })
        .collect();

    let context = RegionsContext { regions };
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for countries command
fn countries_handler(
    matches: &ArgMatches,
    _ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let countries = match get_str(matches, "region") {
        Some(region) => dataset.countries_in_region(region),
        None => dataset.countries(),
    };
    Ok(Output::Render(serde_json::json!({ "countries": countries })))
}

/// Handler for export command
fn export_handler(
    matches: &ArgMatches,
    _ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    let dataset = load_dataset(matches)?;
    let spec = build_filter(matches);
    let qs = QuerySet::new(&dataset, spec);

    if qs.is_empty() {
        return Err(anyhow::anyhow!(
            "No universities match your filters. Please adjust your criteria."
        ));
    }

    let doc = ExportDocument::standard(&qs.items, dataset.len());
    let dir = get_str(matches, "dir").unwrap_or(".");
    let path = Path::new(dir).join(&doc.file_name);
    std::fs::write(&path, &doc.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(rows = doc.row_count, path = %path.display(), "exported spreadsheet");

    Ok(Output::Render(serde_json::json!({
        "path": path.display().to_string(),
        "file_name": doc.file_name,
        "rows": doc.row_count,
        "full": doc.is_full(),
    })))
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Log to stderr, filtered by RUST_LOG (warnings by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cmd = build_command();
    let theme = create_theme();

    let result = App::builder()
        .theme(theme)
        .command("list", list_handler, LIST_TEMPLATE)
        .command("show", show_handler, SHOW_TEMPLATE)
        .command("compare", compare_handler, COMPARE_TEMPLATE)
        .command("stats", stats_handler, STATS_TEMPLATE)
        .command("regions", regions_handler, REGIONS_TEMPLATE)
        .command("countries", countries_handler, COUNTRIES_TEMPLATE)
        .command("export", export_handler, EXPORT_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                print!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(matches) => {
            // No subcommand: treat as list. outstanding stores the mode in _output_mode.
            let output_mode = matches
                .get_one::<String>("_output_mode")
                .map(|s| match s.as_str() {
                    "json" => outstanding::OutputMode::Json,
                    "text" => outstanding::OutputMode::Text,
                    "term-debug" => outstanding::OutputMode::TermDebug,
                    "term" => outstanding::OutputMode::Term,
                    _ => outstanding::OutputMode::Auto,
                })
                .unwrap_or(outstanding::OutputMode::Auto);

            let ctx = CommandContext {
                output_mode,
                command_path: vec![],
            };

            match list_handler(&matches, &ctx) {
                Ok(Output::Render(value)) => {
                    if output_mode.is_structured() {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&value).unwrap_or_default()
                        );
                    } else {
                        let theme = create_theme();
                        match outstanding::render(LIST_TEMPLATE, &value, &theme) {
                            Ok(output) => print!("{}", output),
                            Err(e) => {
                                eprintln!("Error: {e}");
                                return ExitCode::FAILURE;
                            }
                        }
                    }
                    ExitCode::SUCCESS
                }
                Ok(Output::Silent) => ExitCode::SUCCESS,
                Ok(Output::Binary { .. }) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
