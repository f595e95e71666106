// Primitives for reading CSV files.

use crate::export::*;

/// Reads all the rows of a CSV file. The rows do not need to have the same length.
pub fn read_csv_rows(path: &Path) -> ExportResult<Vec<Vec<String>>> {
    let path_s = path.display().to_string();
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path_s.clone(),
        })?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {
            path: path_s.clone(),
            lineno,
        })?;
        debug!("read_csv_rows: lineno: {:?} row: {:?}", lineno, &line);
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}
