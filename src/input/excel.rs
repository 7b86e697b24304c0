// Excel source import (xlsx, xls, xlsb, ods). Only the first worksheet is read.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{RankError, Result};
use crate::records::{RawRecord, SourceTable};

pub fn read_excel(path: &Path, label: &str, weight: f64) -> Result<SourceTable> {
    let read_error = |message: String| RankError::Read {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(format!("failed to open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| read_error("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| read_error(format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => Vec::new(),
    };

    let mut table = SourceTable::new(label, weight, headers);
    let headers = table.headers.clone();
    for row in rows {
        table.push_row(RawRecord::from_pairs(
            headers
                .iter()
                .zip(row.iter())
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, cell)| (h.as_str(), cell_text(cell))),
        ));
    }
    Ok(table)
}

/// Render a cell as the text a user would see.
///
/// Integral floats print without a fractional part so that a numeric review
/// count of `1234.0` stays `1234` under digits-only extraction.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        // error cells carry no usable value
        Data::Error(_) => String::new(),
    }
}
