use crate::export::*;

/// A row of the responses sheet, as (column name, value) pairs.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedRecord {
    /// The row number in the sheet, starting at 1.
    pub lineno: usize,
    pub fields: Vec<(String, String)>,
}

impl ParsedRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn is_header_cell(cell: Option<&String>, name: &str) -> bool {
    match cell {
        Some(c) => c.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name),
        None => false,
    }
}

/// Turns the rows of a sheet into records.
///
/// If the first row starts with `response_id`, it holds the names of the columns and
/// is returned as well. Otherwise the columns are read in their canonical order.
pub fn rows_to_records(rows: &[Vec<String>]) -> (Option<Vec<String>>, Vec<ParsedRecord>) {
    let has_header = is_header_cell(rows.first().and_then(|r| r.first()), "response_id");
    let headers: Vec<String> = if has_header {
        rows[0]
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect()
    } else {
        RESPONSE_COLUMNS.iter().map(|c| c.to_string()).collect()
    };
    let start = if has_header { 1 } else { 0 };

    let mut records: Vec<ParsedRecord> = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(start) {
        let lineno = idx + 1;
        if row.iter().all(|c| c.trim().is_empty()) {
            debug!("rows_to_records: skipping empty line {}", lineno);
            continue;
        }
        if row.len() > headers.len() {
            debug!(
                "rows_to_records: line {} has {} cells, ignoring the cells after {}",
                lineno,
                row.len(),
                headers.len()
            );
        }
        let fields: Vec<(String, String)> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect();
        records.push(ParsedRecord { lineno, fields });
    }
    debug!("rows_to_records: {} records", records.len());
    (if has_header { Some(headers) } else { None }, records)
}

/// Keeps the records of a survey, in the order of the sheet.
pub fn filter_survey(records: Vec<ParsedRecord>, survey_id: &str) -> Vec<ParsedRecord> {
    let total = records.len();
    let selected: Vec<ParsedRecord> = records
        .into_iter()
        .filter(|r| r.get("survey_id").map(|s| s.trim()) == Some(survey_id))
        .collect();
    info!(
        "filter_survey: {} of {} records belong to survey {}",
        selected.len(),
        total,
        survey_id
    );
    selected
}

/// Finds the year of a survey in the rows of the "Surveys" sheet.
///
/// The sheet has the columns `survey_id` and `year`. Without a header row, they are
/// the columns A and D.
pub fn find_survey_year(rows: &[Vec<String>], survey_id: &str) -> ExportResult<i32> {
    let (id_idx, year_idx, start) = match rows.first() {
        Some(first) if first.iter().any(|c| is_header_cell(Some(c), "survey_id")) => {
            let position = |name: &str| first.iter().position(|c| is_header_cell(Some(c), name));
            let year_idx = match position("year") {
                Some(idx) => idx,
                None => whatever!("The surveys sheet has no year column"),
            };
            (position("survey_id").unwrap_or(0), year_idx, 1)
        }
        _ => (0, 3, 0),
    };

    for row in rows.iter().skip(start) {
        if row.get(id_idx).map(|c| c.trim()) != Some(survey_id) {
            continue;
        }
        let cell = row.get(year_idx).map(|c| c.trim()).unwrap_or("");
        return match cell.parse::<i32>() {
            Ok(year) => Ok(year),
            Err(_) => whatever!("Invalid year {:?} for survey {}", cell, survey_id),
        };
    }
    SurveyNotFoundSnafu {
        survey_id: survey_id.to_string(),
    }
    .fail()
}
