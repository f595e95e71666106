use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::export::*;

/// Reads the rows of a worksheet as strings.
///
/// The first worksheet is used when no name is given. Cells are converted the way
/// a CSV export of the sheet would show them.
pub fn read_excel_rows(path: &Path, worksheet_name: Option<&str>) -> ExportResult<Vec<Vec<String>>> {
    let path_s = path.display().to_string();
    debug!(
        "read_excel_rows: path: {:?} worksheet: {:?}",
        &path_s, &worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path_s.clone(),
    })?;

    let wrange: Range<DataType> = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                name,
                path: path_s.clone(),
            })?
            .context(OpeningExcelSnafu {
                path: path_s.clone(),
            })?,
        None => workbook
            .worksheet_range_at(0)
            .context(MissingWorksheetSnafu {
                name: "(first worksheet)",
                path: path_s.clone(),
            })?
            .context(OpeningExcelSnafu {
                path: path_s.clone(),
            })?,
    };

    // The range starts at the first non-empty cell.
    let first_col = wrange.start().map(|(_, col)| col as usize).unwrap_or(0);
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let mut cells: Vec<String> = vec![String::new(); first_col];
        cells.extend(row.iter().map(|cell| cell_to_string(cell, idx)));
        rows.push(cells);
    }
    debug!("read_excel_rows: {} rows", rows.len());
    Ok(rows)
}

fn cell_to_string(cell: &DataType, idx: usize) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        // Whole numbers are stored as floats.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(true) => "TRUE".to_string(),
        DataType::Bool(false) => "FALSE".to_string(),
        DataType::DateTime(f) => f.to_string(),
        DataType::Empty => String::new(),
        x => {
            warn!("read_excel_rows: row {}: unreadable cell {:?}", idx + 1, x);
            String::new()
        }
    }
}
