// CSV/TSV source import

use std::path::Path;

use crate::error::{RankError, Result};
use crate::records::{RawRecord, SourceTable};

pub fn read_delimited(path: &Path, label: &str, weight: f64) -> Result<SourceTable> {
    let bytes = std::fs::read(path).map_err(|e| RankError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let content = decode_text(bytes);
    let delimiter = sniff_delimiter(&content);
    table_from_str(&content, delimiter, label, weight).map_err(|message| RankError::Read {
        path: path.to_path_buf(),
        message,
    })
}

/// Decode as UTF-8, falling back to Windows-1252 (common for Excel-exported CSVs).
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) if s.starts_with('\u{feff}') => s['\u{feff}'.len_utf8()..].to_string(),
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub(crate) fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // lines agreeing with the header's field count, scaled by that count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

pub(crate) fn table_from_str(content: &str, delimiter: u8, label: &str, weight: f64) -> std::result::Result<SourceTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = SourceTable::new(label, weight, headers);
    let headers = table.headers.clone();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        let row = RawRecord::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.as_str(), v)),
        );
        table.push_row(row);
    }
    Ok(table)
}
