use clap::Parser;

/// This program builds the yearly rankings publication from the survey responses.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the export. All the options below can also be
    /// set in this file. For more information about the file format, read the manual of the
    /// ranking_export crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The export of the "Survey Responses" sheet. Setting this option overrides
    /// the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx, default from the file extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path) The export of the "Surveys" sheet, used to find the year of the survey.
    #[clap(long, value_parser)]
    pub surveys: Option<String>,

    /// The identifier of the survey to export, for example ARCH-2026.
    #[clap(short, long, value_parser)]
    pub survey_id: Option<String>,

    /// The year of the survey. If provided, the "Surveys" sheet is not read.
    #[clap(short, long, value_parser)]
    pub year: Option<i32>,

    /// (directory, 'stdout' or empty) Where to write the documents. By default, they are
    /// printed to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (text or json, default text) The format of the output.
    #[clap(short, long, value_parser)]
    pub format: Option<String>,

    /// (file path) A previous export of the rankings. If provided, rankex checks that the
    /// produced document matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. By default,
    /// the first worksheet is used.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, the columns of the input must match the expected columns.
    #[clap(long, takes_value = false)]
    pub strict: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
