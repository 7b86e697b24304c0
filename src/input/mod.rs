pub mod delimited;
pub mod excel;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RankError, Result, MAX_SOURCES, MIN_SOURCES};
use crate::records::SourceTable;

pub use delimited::read_delimited;
pub use excel::read_excel;

/// A file to read, with the label and weight it will carry.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub label: String,
    pub weight: f64,
}

/// Default label of the source at `index` (0-based): "Datei 1", "Datei 2", ...
pub fn default_label(index: usize) -> String {
    format!("Datei {}", index + 1)
}

/// Read one source file, picking the reader from the file extension.
/// Anything that is not a known spreadsheet extension is read as delimited text.
pub fn read_source(path: &Path, label: &str, weight: f64) -> Result<SourceTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_excel(path, label, weight)?,
        _ => read_delimited(path, label, weight)?,
    };
    debug!(
        source = %label,
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "read source"
    );
    Ok(table)
}

/// Read every source. The count is checked first so nothing is read when it
/// is out of range.
pub fn read_sources(specs: &[SourceSpec]) -> Result<Vec<SourceTable>> {
    if !(MIN_SOURCES..=MAX_SOURCES).contains(&specs.len()) {
        return Err(RankError::InputCount(specs.len()));
    }
    specs
        .iter()
        .map(|spec| read_source(&spec.path, &spec.label, spec.weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        assert_eq!(default_label(0), "Datei 1");
        assert_eq!(default_label(3), "Datei 4");
    }

    #[test]
    fn test_read_sources_count_checked_before_reading() {
        let specs = vec![SourceSpec {
            path: PathBuf::from("/definitely/not/here.csv"),
            label: default_label(0),
            weight: 1.0,
        }];
        assert!(matches!(read_sources(&specs), Err(RankError::InputCount(1))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = read_source(Path::new("/definitely/not/here.csv"), "Datei 1", 1.0);
        assert!(matches!(result, Err(RankError::Read { .. })));
    }
}
