use log::{debug, info, warn};

use karma_ranking::builder::Builder;
use karma_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use plotters::drawing::DrawingAreaErrorKind;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::stats::chart::BarChart;
use crate::stats::config_reader::*;

mod chart;
pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
mod report;

pub const DEFAULT_INPUT: &str = "Karma_RHQBonkCup.xlsx";
pub const COUNT_CHART_FILE: &str = "mapCount.svg";
pub const RATING_CHART_FILE: &str = "mapperRating.svg";

#[derive(Debug, Snafu)]
pub enum StatsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet or no header row in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Cannot find the column {column} in the header of {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error drawing the chart {path}"))]
    Chart {
        source: DrawingAreaErrorKind<std::io::Error>,
        path: String,
    },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Analysis error: {source}"))]
    Analysis { source: AnalysisErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type StatsResult<T> = Result<T, StatsError>;
pub type BStatsResult<T> = Result<T, Box<StatsError>>;

/// The supported input formats.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Xlsx,
    Csv,
}

impl InputType {
    pub fn parse(s: &str) -> StatsResult<InputType> {
        match s {
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            "csv" => Ok(InputType::Csv),
            x => {
                whatever!("Input type {:?} is not supported (use xlsx or csv)", x);
            }
        }
    }
}

/// The input, rules and outputs of one run, after merging the command line and the settings file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub input_type: InputType,
    pub excel_worksheet_name: Option<String>,
    pub output_directory: PathBuf,
    pub rules: AnalysisRules,
}

fn resolve_settings(args: &Args) -> BStatsResult<RunSettings> {
    let (settings, root_p): (AnalysisSettings, Option<PathBuf>) = match &args.config {
        Some(config_path) => {
            let settings = read_settings(config_path)?;
            info!("settings: {:?}", settings);
            let root = Path::new(config_path).parent().map(|p| p.to_path_buf());
            (settings, root)
        }
        None => (AnalysisSettings::default(), None),
    };

    // Paths of the settings file are relative to the settings file.
    let relative_to_config = |p: &String| -> String {
        match &root_p {
            Some(root) if Path::new(p).is_relative() => root.join(p).display().to_string(),
            _ => p.clone(),
        }
    };

    let input_path = match (&args.input, &settings.input_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => relative_to_config(p),
        (None, None) => DEFAULT_INPUT.to_string(),
    };
    let input_type = match args
        .input_type
        .as_ref()
        .or(settings.input_type.as_ref())
    {
        Some(s) => InputType::parse(s)?,
        None if input_path.to_lowercase().ends_with(".csv") => InputType::Csv,
        None => InputType::Xlsx,
    };
    let output_directory: PathBuf = match (&args.output_dir, &settings.output_directory) {
        (Some(d), _) => PathBuf::from(d),
        (None, Some(d)) => PathBuf::from(relative_to_config(d)),
        (None, None) => PathBuf::from("."),
    };

    Ok(RunSettings {
        input_path,
        input_type,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| settings.excel_worksheet_name.clone()),
        output_directory,
        rules: settings.analysis_rules()?,
    })
}

pub fn read_records(
    path: &str,
    input_type: InputType,
    worksheet_name: &Option<String>,
) -> BStatsResult<Vec<Record>> {
    info!("Attempting to read karma file {:?} ({:?})", path, input_type);
    let records = match input_type {
        InputType::Xlsx => io_xlsx::read_excel_file(path, worksheet_name)?,
        InputType::Csv => io_csv::read_csv_file(path)?,
    };
    info!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Fails on the first gap of the analysis: a top mapper without rating, or no map to
/// pick the best or worst from.
fn check_complete(analysis: &Analysis) -> Result<(), AnalysisErrors> {
    for entry in analysis.rating_of_top_mappers.iter() {
        entry.rating.clone()?;
    }
    analysis.worst_maps.clone()?;
    analysis.best_maps.clone()?;
    Ok(())
}

fn render_charts(analysis: &Analysis, settings: &RunSettings) -> BStatsResult<()> {
    let out_dir = &settings.output_directory;
    fs::create_dir_all(out_dir).context(WritingOutputSnafu {
        path: out_dir.display().to_string(),
    })?;
    let rules = &settings.rules;

    let count_chart = BarChart {
        title: format!("Top {} mappers by map count", rules.top_n),
        x_label: "Mapper".to_string(),
        y_label: "Map count".to_string(),
        bars: analysis
            .count_ranking
            .iter()
            .take(rules.top_n)
            .map(|ac| (ac.author.clone(), ac.count as f64))
            .collect(),
        y_max: None,
        caption: None,
    };
    chart::render_bar_chart(&count_chart, &out_dir.join(COUNT_CHART_FILE))?;

    let rating_chart = BarChart {
        title: format!("Top {} mappers by average rating", rules.top_n),
        x_label: "Mapper".to_string(),
        y_label: "Rating".to_string(),
        bars: analysis
            .rating_ranking
            .iter()
            .take(rules.top_n)
            .map(|ar| (ar.author.clone(), ar.rating))
            .collect(),
        y_max: Some(10.0),
        caption: Some(format!(
            "Counting mappers with {}+ maps and maps with {}+ votes",
            rules.min_maps_per_author, rules.min_votes_per_map
        )),
    };
    chart::render_bar_chart(&rating_chart, &out_dir.join(RATING_CHART_FILE))?;
    Ok(())
}

fn extreme_maps_to_json(em: &Result<ExtremeMaps, AnalysisErrors>) -> JSValue {
    match em {
        Ok(em) => json!({
            "averageKarma": format!("{:.3}", em.average_karma),
            "maps": em.maps.iter().map(|m| json!({
                "name": m.name,
                "author": m.author,
                "votes": m.number_of_votes.to_string(),
            })).collect::<Vec<JSValue>>(),
        }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

pub fn build_summary_js(settings: &RunSettings, analysis: &Analysis) -> JSValue {
    let rules = &settings.rules;
    let filter_stats = &analysis.filter_stats;
    let removed: serde_json::Map<String, JSValue> = filter_stats
        .removed
        .iter()
        .map(|(kind, count)| (kind.label().to_string(), json!(count.to_string())))
        .collect();

    json!({
        "config": {
            "input": io_common::simplify_file_name(&settings.input_path),
            "minMapsPerAuthor": rules.min_maps_per_author.to_string(),
            "minVotesPerMap": rules.min_votes_per_map.to_string(),
            "topN": rules.top_n.to_string(),
        },
        "filter": {
            "inputRows": filter_stats.input_rows.to_string(),
            "keptRows": filter_stats.kept_rows.to_string(),
            "incompleteRows": filter_stats.incomplete_rows.to_string(),
            "removed": removed,
        },
        "mapCount": analysis.count_ranking.iter().map(|ac| json!({
            "mapper": ac.author,
            "count": ac.count.to_string(),
        })).collect::<Vec<JSValue>>(),
        "mapperRating": analysis.rating_ranking.iter().map(|ar| json!({
            "mapper": ar.author,
            "rating": format!("{:.3}", ar.rating),
            "ratedMaps": ar.rated_maps.to_string(),
        })).collect::<Vec<JSValue>>(),
        "worstMaps": extreme_maps_to_json(&analysis.worst_maps),
        "bestMaps": extreme_maps_to_json(&analysis.best_maps),
    })
}

fn write_summary(out: &str, pretty_js: &str) -> BStatsResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })?;
    }
    Ok(())
}

pub fn run_stats(args: &Args) -> BStatsResult<()> {
    let settings = resolve_settings(args)?;
    info!("run settings: {:?}", settings);

    let records = read_records(
        &settings.input_path,
        settings.input_type,
        &settings.excel_worksheet_name,
    )?;

    let mut builder = Builder::new(&settings.rules).context(AnalysisSnafu {})?;
    for r in records {
        builder.add_record(r).context(AnalysisSnafu {})?;
    }
    let analysis = builder.analyze().context(AnalysisSnafu {})?;
    debug!("analysis: {:?}", analysis);

    if args.strict {
        check_complete(&analysis).context(AnalysisSnafu {})?;
    }

    render_charts(&analysis, &settings)?;
    report::print_report(&report::build_report(&analysis, &settings.rules));

    let summary_js = build_summary_js(&settings, &analysis);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    if let Some(out) = &args.out {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return Err(Box::new(StatsError::Whatever {
                message: "Difference detected between computed summary and reference summary"
                    .to_string(),
                source: None,
            }));
        }
    }

    Ok(())
}
