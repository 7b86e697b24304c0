pub mod columns;
pub mod fields;

pub use columns::{resolve_column, ColumnAliases, ResolvedColumns};
pub use fields::{parse_rating, parse_review_count};

use tracing::{debug, warn};

use crate::identity::canonical_key;
use crate::records::{NormalizedRecord, RawRecord, SourceTable};

/// Normalize every row of one source table.
///
/// Columns are resolved once per table. A logical field with no matching
/// header is missing for every row, which is logged but never fatal.
pub fn normalize_table(
    table: &SourceTable,
    source_index: usize,
    aliases: &ColumnAliases,
) -> Vec<NormalizedRecord> {
    let columns = aliases.resolve(&table.headers);
    log_resolution(&table.label, &columns);

    let records: Vec<_> = table
        .rows
        .iter()
        .map(|row| normalize_row(row, source_index, &columns))
        .collect();

    let unidentified = records.iter().filter(|r| r.canonical_key.is_empty()).count();
    if unidentified > 0 {
        warn!(
            source = %table.label,
            rows = unidentified,
            "rows without a usable website are grouped under the empty key"
        );
    }
    records
}

fn normalize_row(row: &RawRecord, source_index: usize, columns: &ResolvedColumns) -> NormalizedRecord {
    let cell = |column: &Option<String>| column.as_deref().and_then(|c| row.get(c));
    let text = |column: &Option<String>| cell(column).map(|v| v.trim().to_string());

    let website = text(&columns.website);
    NormalizedRecord {
        source_index,
        name: text(&columns.name),
        canonical_key: canonical_key(website.as_deref()),
        website,
        phone: text(&columns.phone),
        address: text(&columns.address),
        rating: parse_rating(cell(&columns.rating)),
        review_count: parse_review_count(cell(&columns.review_count)),
    }
}

fn log_resolution(label: &str, columns: &ResolvedColumns) {
    let fields = [
        ("rating", &columns.rating),
        ("review_count", &columns.review_count),
        ("website", &columns.website),
        ("name", &columns.name),
        ("phone", &columns.phone),
        ("address", &columns.address),
    ];
    for (field, column) in fields {
        match column {
            Some(column) => debug!(source = %label, field, column = %column, "resolved column"),
            None if field == "website" => {
                warn!(source = %label, "no website column found; every row gets the empty key")
            }
            None => debug!(source = %label, field, "no matching column; field is missing"),
        }
    }
}
