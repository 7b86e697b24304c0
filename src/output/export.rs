// Ranking export (csv, tsv, json, xlsx)

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use atomic_write_file::AtomicWriteFile;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use tracing::info;

use super::plot::PlotSeries;
use crate::error::{RankError, Result};
use crate::merge::ConsolidatedRecord;
use crate::ranking::Ranking;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// Guess the format from a file extension. Unknown extensions give `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" | "tab" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown export format '{}' (expected csv, tsv, json or xlsx)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        };
        f.write_str(name)
    }
}

/// Fixed columns before and after the per-source indicator columns.
const LEADING_COLUMNS: [&str; 9] = [
    "domain",
    "website",
    "phone",
    "address",
    "organizations",
    "name_conflict",
    "record_count",
    "total_reviews",
    "weighted_rating",
];
const TRAILING_COLUMNS: [&str; 3] = ["frequency_score", "reputation_score", "final_score"];

/// Header row: fixed columns with one indicator column per source label.
pub fn export_headers(ranking: &Ranking) -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(ranking.sources.iter().map(|s| s.label.clone()))
        .chain(TRAILING_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

/// One exported organization, shared by every output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub domain: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub organizations: Vec<String>,
    pub name_conflict: bool,
    pub record_count: usize,
    pub total_reviews: f64,
    pub weighted_rating: Option<f64>,
    pub sources: BTreeMap<String, u8>,
    pub frequency_score: f64,
    pub reputation_score: f64,
    pub final_score: f64,
}

impl ExportRow {
    fn new(ranking: &Ranking, entry: &ConsolidatedRecord) -> Self {
        let sources = ranking
            .sources
            .iter()
            .map(|s| s.label.clone())
            .zip(ranking.indicators(entry))
            .collect();
        Self {
            domain: entry.canonical_key.clone(),
            website: entry.website.clone(),
            phone: entry.phone.clone(),
            address: entry.address.clone(),
            organizations: entry.organization_names.clone(),
            name_conflict: entry.name_conflict,
            record_count: entry.record_count,
            total_reviews: entry.total_reviews,
            weighted_rating: entry.weighted_rating,
            sources,
            frequency_score: entry.frequency_score,
            reputation_score: entry.reputation_score,
            final_score: entry.final_score,
        }
    }

    /// Cell texts in header order. `labels` fixes the indicator column order.
    fn cells(&self, labels: &[&str]) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut cells = vec![
            self.domain.clone(),
            opt(&self.website),
            opt(&self.phone),
            opt(&self.address),
            self.organizations.join(", "),
            self.name_conflict.to_string(),
            self.record_count.to_string(),
            self.total_reviews.to_string(),
            self.weighted_rating.map(|r| r.to_string()).unwrap_or_default(),
        ];
        cells.extend(
            labels
                .iter()
                .map(|l| self.sources.get(*l).copied().unwrap_or(0).to_string()),
        );
        cells.extend([
            self.frequency_score.to_string(),
            self.reputation_score.to_string(),
            self.final_score.to_string(),
        ]);
        cells
    }
}

pub fn export_rows(ranking: &Ranking) -> Vec<ExportRow> {
    ranking
        .entries
        .iter()
        .map(|entry| ExportRow::new(ranking, entry))
        .collect()
}

/// Write the ranking to `path` in the given format.
pub fn export_ranking(ranking: &Ranking, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => render_delimited(ranking, b',').and_then(|bytes| write_atomic(path, &bytes)),
        ExportFormat::Tsv => render_delimited(ranking, b'\t').and_then(|bytes| write_atomic(path, &bytes)),
        ExportFormat::Json => render_json(&export_rows(ranking)).and_then(|bytes| write_atomic(path, &bytes)),
        ExportFormat::Xlsx => write_xlsx(ranking, path).map_err(|e| e.to_string()),
    }
    .map_err(|message| RankError::Export {
        path: path.to_path_buf(),
        message,
    })?;
    info!(path = %path.display(), %format, organizations = ranking.len(), "exported ranking");
    Ok(())
}

/// Write plot series as pretty JSON.
pub fn export_plot_data(series: &PlotSeries, path: &Path) -> Result<()> {
    render_json(series)
        .and_then(|bytes| write_atomic(path, &bytes))
        .map_err(|message| RankError::Export {
            path: path.to_path_buf(),
            message,
        })
}

fn render_error(err: impl fmt::Display) -> String {
    err.to_string()
}

pub fn render_delimited(ranking: &Ranking, delimiter: u8) -> std::result::Result<Vec<u8>, String> {
    let labels = ranking.source_labels();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(export_headers(ranking)).map_err(render_error)?;
    for row in export_rows(ranking) {
        writer.write_record(row.cells(&labels)).map_err(render_error)?;
    }
    writer.into_inner().map_err(render_error)
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> std::result::Result<Vec<u8>, String> {
    serde_json::to_vec_pretty(value).map_err(render_error)
}

/// Uses atomic-write-file so a failed run never leaves a half-written file.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::result::Result<(), String> {
    let mut file = AtomicWriteFile::open(path).map_err(render_error)?;
    file.write_all(bytes).map_err(render_error)?;
    file.commit().map_err(render_error)
}

fn write_xlsx(ranking: &Ranking, path: &Path) -> std::result::Result<(), XlsxError> {
    let labels = ranking.source_labels();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Ranking")?;

    let bold = Format::new().set_bold();
    for (col, header) in export_headers(ranking).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &bold)?;
    }

    let numeric_from = LEADING_COLUMNS.len() - 3;
    for (row_idx, row) in export_rows(ranking).iter().enumerate() {
        let r = row_idx as u32 + 1;
        for (col, cell) in row.cells(&labels).iter().enumerate() {
            let c = col as u16;
            if cell.is_empty() {
                continue;
            }
            // counts, ratings, indicators and scores go in as numbers
            match cell.parse::<f64>() {
                Ok(n) if col >= numeric_from => worksheet.write_number(r, c, n)?,
                _ => worksheet.write_string(r, c, cell.as_str())?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}
