use std::collections::{HashMap, HashSet};

/// One row of one input table, keyed by (trimmed) header name.
///
/// Blank cells are never stored, so a missing key and an empty cell mean the
/// same thing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(header, cell)` pairs, dropping blank cells.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.set(key, value);
        }
        record
    }

    /// Store a cell. Blank cells are dropped; an existing value for the same
    /// column is kept.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields
                .entry(column.into().trim().to_string())
                .or_insert(value);
        }
    }

    /// Cell text for `column`, if the cell is present and not blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// One input source: a labelled, weighted table of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    pub label: String,
    pub weight: f64,
    /// Header names in file order, trimmed. Repeats are renamed `X.1`, `X.2`, ...
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl SourceTable {
    pub fn new(label: impl Into<String>, weight: f64, headers: Vec<String>) -> Self {
        Self {
            label: label.into(),
            weight,
            headers: unique_headers(headers),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<RawRecord>) -> Self {
        self.rows = rows;
        self
    }

    pub fn push_row(&mut self, row: RawRecord) {
        self.rows.push(row);
    }
}

/// Trim headers and rename repeats to `X.1`, `X.2`, ... so every column stays
/// addressable and the first `X` keeps its name. Blank headers stay blank.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .into_iter()
        .map(|header| {
            let header = header.trim().to_string();
            if header.is_empty() {
                return header;
            }
            let mut name = header.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{}.{}", header, suffix);
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Label and weight of a source, kept alongside the ranking so indicator
/// columns and frequency scores can be traced back.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    pub label: String,
    pub weight: f64,
}

impl From<&SourceTable> for SourceInfo {
    fn from(table: &SourceTable) -> Self {
        Self {
            label: table.label.clone(),
            weight: table.weight,
        }
    }
}

/// A row after field extraction and identity resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Position of the owning table in the input order.
    pub source_index: usize,
    pub name: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<f64>,
    /// Empty when no usable website was found.
    pub canonical_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells_are_missing() {
        let record = RawRecord::from_pairs([("Webseite", "acme.com"), ("Adresse", "   ")]);
        assert_eq!(record.get("Webseite"), Some("acme.com"));
        assert_eq!(record.get("Adresse"), None);
        assert_eq!(record.get("Telefonnummer"), None);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let table = SourceTable::new("Datei 1", 1.0, vec![" Rating ".to_string()]);
        assert_eq!(table.headers, vec!["Rating".to_string()]);

        let record = RawRecord::from_pairs([(" Rating ", "4.5")]);
        assert_eq!(record.get("Rating"), Some("4.5"));
    }

    #[test]
    fn test_repeated_headers_are_renamed() {
        let headers = ["Rating", "Webseite", " Rating", "", "Rating", "Rating.1", " "]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let table = SourceTable::new("Datei 1", 1.0, headers);
        assert_eq!(
            table.headers,
            vec!["Rating", "Webseite", "Rating.1", "", "Rating.2", "Rating.1.1", ""]
        );
    }

    #[test]
    fn test_first_value_for_a_column_wins() {
        let record = RawRecord::from_pairs([("Rating", "4,5"), ("Rating", "2,0")]);
        assert_eq!(record.get("Rating"), Some("4,5"));
    }
}
