use log::{debug, info, warn};

use ranking_export::builder::Builder;
use ranking_export::preview::parse_preview;
use ranking_export::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::export::config_reader::*;
use crate::export::io_common::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
pub enum ExportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Survey {survey_id} not found"))]
    SurveyNotFound { survey_id: String },
    #[snafu(display("No responses found for survey {survey_id}"))]
    NoResponses { survey_id: String },
    #[snafu(display("The columns of the responses do not match: {source}"))]
    Schema { source: ExportErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;

/// The documents produced for one survey.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExportOutcome {
    pub survey_year: i32,
    pub documents: ExportDocuments,
}

fn read_rows(
    path: &Path,
    input_type: InputType,
    worksheet_name: Option<&str>,
) -> ExportResult<Vec<Vec<String>>> {
    info!("Attempting to read file {:?} as {:?}", path, input_type);
    match input_type {
        InputType::Csv => io_csv::read_csv_rows(path),
        InputType::Excel => io_excel::read_excel_rows(path, worksheet_name),
    }
}

fn resolve_survey_year(settings: &ExportSettings) -> ExportResult<i32> {
    if let Some(year) = settings.survey_year {
        return Ok(year);
    }
    let surveys_path = match &settings.surveys_path {
        Some(p) => p,
        None => whatever!(
            "The year of survey {} is unknown: provide --year or --surveys",
            settings.survey_id
        ),
    };
    let rows = read_rows(surveys_path, InputType::from_path(surveys_path), None)?;
    find_survey_year(&rows, &settings.survey_id)
}

fn log_preview(documents: &ExportDocuments) {
    let mut rows = parse_preview(&documents.in_state, false);
    if let Some(oos) = &documents.out_of_state {
        rows.extend(parse_preview(oos, true));
    }
    info!(
        "{:<40} {:>10} {:>10} {:<15} {:>4} {:>5}",
        "Firm", "Revenue", "Employees", "Top market", "DND", "Away"
    );
    for row in rows.iter() {
        info!(
            "{:<40} {:>10} {:>10} {:<15} {:>4} {:>5}",
            row.firm_name,
            row.revenue,
            row.employees,
            row.top_market,
            if row.is_dnd { "x" } else { "" },
            if row.is_out_of_state { "x" } else { "" }
        );
    }
}

/// Reads the responses of a survey and builds its documents.
pub fn run_export(settings: &ExportSettings) -> ExportResult<ExportOutcome> {
    info!("run_export: settings: {:?}", settings);
    let survey_year = resolve_survey_year(settings)?;
    info!(
        "run_export: survey {} is for year {}",
        settings.survey_id, survey_year
    );

    let rows = read_rows(
        &settings.responses_path,
        settings.input_type,
        settings.excel_worksheet_name.as_deref(),
    )?;
    let (headers, records) = rows_to_records(&rows);

    let mut builder = Builder::new(&ExportRules::DEFAULT_RULES)
        .context(SchemaSnafu {})?
        .strict(settings.strict);
    if let Some(headers) = &headers {
        builder.check_columns(headers).context(SchemaSnafu {})?;
    } else {
        debug!("run_export: no header row, reading the columns by position");
    }

    let selected = filter_survey(records, &settings.survey_id);
    ensure!(
        !selected.is_empty(),
        NoResponsesSnafu {
            survey_id: settings.survey_id.clone()
        }
    );
    for record in selected.iter() {
        debug!("run_export: adding record from line {}", record.lineno);
        builder.add_record(&record.fields).context(SchemaSnafu {})?;
    }

    let documents = builder.build(survey_year);
    log_preview(&documents);
    Ok(ExportOutcome {
        survey_year,
        documents,
    })
}

pub fn build_preview_js(documents: &ExportDocuments) -> JSValue {
    json!({
        "utah": documents.in_state,
        "outOfState": documents.out_of_state,
    })
}

pub fn in_state_file_name(survey_year: i32) -> String {
    format!("{}_RankingsExport.txt", survey_year)
}

pub fn out_of_state_file_name(survey_year: i32) -> String {
    format!("{}_RankingsExport_OutOfState.txt", survey_year)
}

fn write_document(output_directory: Option<&Path>, name: &str, content: &str) -> ExportResult<()> {
    match output_directory {
        None => {
            print!("{}", content);
            Ok(())
        }
        Some(dir) => {
            fs::create_dir_all(dir).context(WritingOutputSnafu {
                path: dir.display().to_string(),
            })?;
            let p = dir.join(name);
            fs::write(&p, content).context(WritingOutputSnafu {
                path: p.display().to_string(),
            })?;
            info!("Wrote {:?}", p);
            Ok(())
        }
    }
}

pub fn write_outputs(settings: &ExportSettings, outcome: &ExportOutcome) -> ExportResult<()> {
    let dir = settings.output_directory.as_deref();
    let year = outcome.survey_year;
    match settings.output_format {
        OutputFormat::Text => {
            write_document(dir, &in_state_file_name(year), &outcome.documents.in_state)?;
            match &outcome.documents.out_of_state {
                Some(oos) => write_document(dir, &out_of_state_file_name(year), oos)?,
                None => info!("No firm from outside of the state, skipping the second document"),
            }
        }
        OutputFormat::Json => {
            let js = build_preview_js(&outcome.documents);
            let pretty_js = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
            write_document(dir, &format!("{}_RankingsExport.json", year), &pretty_js)?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &Path, produced: &str) -> ExportResult<()> {
    let reference = fs::read_to_string(reference_path).context(ReadingFileSnafu {
        path: reference_path.display().to_string(),
    })?;
    if reference != produced {
        warn!("Found differences with the reference {:?}", reference_path);
        print_diff(reference.as_str(), produced, "\n");
        whatever!(
            "Difference detected between the rankings and the reference {}",
            reference_path.display()
        )
    }
    info!("The rankings match the reference {:?}", reference_path);
    Ok(())
}

pub fn check_references(settings: &ExportSettings, documents: &ExportDocuments) -> ExportResult<()> {
    if let Some(p) = &settings.reference_path {
        check_reference(p, &documents.in_state)?;
    }
    if let Some(p) = &settings.out_of_state_reference_path {
        match &documents.out_of_state {
            Some(oos) => check_reference(p, oos)?,
            None => whatever!(
                "No firm from outside of the state, but a reference was given: {}",
                p.display()
            ),
        }
    }
    Ok(())
}

pub fn run_export_cli(args: &Args) -> ExportResult<()> {
    let settings = resolve_settings(args)?;
    let outcome = run_export(&settings)?;
    write_outputs(&settings, &outcome)?;
    check_references(&settings, &outcome.documents)
}
