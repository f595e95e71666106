use crate::args::Args;
use crate::export::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The content of a configuration file. All the fields are optional, and can
/// be overridden on the command line.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(rename = "surveyId")]
    pub survey_id: Option<String>,
    #[serde(rename = "responsesPath")]
    pub responses_path: Option<String>,
    #[serde(rename = "surveysPath")]
    pub surveys_path: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "surveyYear")]
    pub survey_year: Option<i32>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "outputFormat")]
    pub output_format: Option<String>,
    #[serde(rename = "referencePath")]
    pub reference_path: Option<String>,
    #[serde(rename = "outOfStateReferencePath")]
    pub out_of_state_reference_path: Option<String>,
    pub strict: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Excel,
}

impl InputType {
    pub fn parse(s: &str) -> ExportResult<InputType> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "xlsx" | "excel" => Ok(InputType::Excel),
            _ => whatever!("unknown input type: {}", s),
        }
    }

    /// Workbooks are recognized by their extension, everything else is read as CSV.
    pub fn from_path(path: &Path) -> InputType {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm") => {
                InputType::Excel
            }
            _ => InputType::Csv,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> ExportResult<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => whatever!("unknown output format: {}", s),
        }
    }
}

/// The settings of a run, once the configuration file and the command line are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExportSettings {
    pub survey_id: String,
    pub responses_path: PathBuf,
    pub input_type: InputType,
    pub excel_worksheet_name: Option<String>,
    pub surveys_path: Option<PathBuf>,
    pub survey_year: Option<i32>,
    /// None when printing to the standard output.
    pub output_directory: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub reference_path: Option<PathBuf>,
    pub out_of_state_reference_path: Option<PathBuf>,
    pub strict: bool,
}

pub fn read_config(path: &Path) -> ExportResult<ExportConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.display().to_string(),
    })?;
    let config: ExportConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn resolve_settings(args: &Args) -> ExportResult<ExportSettings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let p = Path::new(config_path);
            let config = read_config(p)?;
            let root = p.parent().map(|r| r.to_path_buf()).unwrap_or_default();
            (config, root)
        }
        None => (ExportConfig::default(), PathBuf::new()),
    };
    // Paths in the configuration file are relative to the file.
    let config_path = |p: &Option<String>| p.as_ref().map(|s| root.join(s));

    let survey_id = match args.survey_id.clone().or(config.survey_id.clone()) {
        Some(id) => id.trim().to_string(),
        None => whatever!("No survey selected: provide --survey-id or surveyId in the configuration"),
    };

    let responses_path = match args
        .input
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| config_path(&config.responses_path))
    {
        Some(p) => p,
        None => whatever!("No input: provide --input or responsesPath in the configuration"),
    };

    let input_type = match args.input_type.as_ref().or(config.input_type.as_ref()) {
        Some(s) => InputType::parse(s)?,
        None => InputType::from_path(&responses_path),
    };

    let output_directory = match args.out.as_deref() {
        Some("stdout") | Some("") => None,
        Some(dir) => Some(PathBuf::from(dir)),
        None => config_path(&config.output_directory),
    };

    let output_format = match args.format.as_ref().or(config.output_format.as_ref()) {
        Some(s) => OutputFormat::parse(s)?,
        None => OutputFormat::Text,
    };

    let settings = ExportSettings {
        survey_id,
        responses_path,
        input_type,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or(config.excel_worksheet_name.clone()),
        surveys_path: args
            .surveys
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config_path(&config.surveys_path)),
        survey_year: args.year.or(config.survey_year),
        output_directory,
        output_format,
        reference_path: args
            .reference
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config_path(&config.reference_path)),
        out_of_state_reference_path: config_path(&config.out_of_state_reference_path),
        strict: args.strict || config.strict.unwrap_or(false),
    };
    debug!("resolve_settings: {:?}", settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn arch_2026_config() -> PathBuf {
        [
            env!("CARGO_MANIFEST_DIR"),
            "tests",
            "data",
            "arch_2026",
            "config.json",
        ]
        .iter()
        .collect()
    }

    #[test]
    fn paths_relative_to_config() {
        let config = arch_2026_config();
        let root = config.parent().unwrap().to_path_buf();
        let args = Args::parse_from(["rankex", "--config", config.to_str().unwrap()]);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.survey_id, "ARCH-2026");
        assert_eq!(settings.responses_path, root.join("responses.csv"));
        assert_eq!(settings.surveys_path, Some(root.join("surveys.csv")));
        assert_eq!(settings.input_type, InputType::Csv);
        assert_eq!(settings.output_format, OutputFormat::Text);
        assert_eq!(settings.output_directory, None);
        assert_eq!(settings.survey_year, None);
        assert!(settings.strict);
        assert_eq!(
            settings.reference_path,
            Some(root.join("2026_RankingsExport.txt"))
        );
    }

    #[test]
    fn command_line_overrides() {
        let config = arch_2026_config();
        let args = Args::parse_from([
            "rankex",
            "--config",
            config.to_str().unwrap(),
            "--survey-id",
            "ARCH-2025",
            "--input",
            "other.xlsx",
            "--year",
            "2025",
            "--format",
            "json",
            "--out",
            "out",
        ]);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.survey_id, "ARCH-2025");
        assert_eq!(settings.responses_path, PathBuf::from("other.xlsx"));
        // The type from the configuration file still applies.
        assert_eq!(settings.input_type, InputType::Csv);
        assert_eq!(settings.survey_year, Some(2025));
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.output_directory, Some(PathBuf::from("out")));
    }

    #[test]
    fn input_type_from_extension() {
        let args = Args::parse_from(["rankex", "-i", "responses.XLSX", "-s", "S-1"]);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.input_type, InputType::Excel);
        assert!(!settings.strict);

        let args = Args::parse_from(["rankex", "-i", "responses.tsv", "-s", "S-1"]);
        assert_eq!(resolve_settings(&args).unwrap().input_type, InputType::Csv);
    }

    #[test]
    fn missing_settings() {
        let args = Args::parse_from(["rankex", "-i", "responses.csv"]);
        assert!(resolve_settings(&args).is_err());
        let args = Args::parse_from(["rankex", "-s", "S-1"]);
        assert!(resolve_settings(&args).is_err());
        let args = Args::parse_from(["rankex", "-s", "S-1", "-i", "r.csv", "--input-type", "ods"]);
        assert!(resolve_settings(&args).is_err());
    }

    #[test]
    fn config_without_fields() {
        let config: ExportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ExportConfig::default());
        let config: ExportConfig =
            serde_json::from_str(r#"{"surveyId": "ARCH-2026", "surveyYear": 2026}"#).unwrap();
        assert_eq!(config.survey_year, Some(2026));
    }
}
