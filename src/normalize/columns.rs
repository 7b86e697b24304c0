use serde::{Deserialize, Serialize};

/// Return the first candidate (in priority order) present in `available`.
pub fn resolve_column<'a, S: AsRef<str>>(candidates: &'a [String], available: &[S]) -> Option<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .find(|candidate| available.iter().any(|col| col.as_ref() == *candidate))
}

/// Header aliases for each logical field, in priority order.
///
/// Example YAML:
/// ```yaml
/// columns:
///   rating: ["Google Bewertung", "Rating"]
///   review_count: ["Anzahl Bewertungen", "Reviews"]
/// ```
/// Fields left out keep their defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnAliases {
    pub rating: Vec<String>,
    pub review_count: Vec<String>,
    pub website: Vec<String>,
    pub name: Vec<String>,
    pub phone: Vec<String>,
    pub address: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            rating: owned(&["Google Bewertung", "Bewertung", "Trustpilot Rating", "Rating"]),
            review_count: owned(&["Anzahl Bewertungen", "Review Count", "Bewertungen", "Reviews"]),
            website: owned(&["Webseite", "Website"]),
            name: owned(&["Unternehmen", "Company"]),
            phone: owned(&["Telefonnummer", "Phone"]),
            address: owned(&["Adresse", "Address"]),
        }
    }
}

/// Columns matched for one table. `None` means the logical field is missing
/// for every row of that table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedColumns {
    pub rating: Option<String>,
    pub review_count: Option<String>,
    pub website: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ColumnAliases {
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> ResolvedColumns {
        let pick = |aliases: &[String]| resolve_column(aliases, headers).map(str::to_string);
        ResolvedColumns {
            rating: pick(&self.rating),
            review_count: pick(&self.review_count),
            website: pick(&self.website),
            name: pick(&self.name),
            phone: pick(&self.phone),
            address: pick(&self.address),
        }
    }
}
