use std::cmp::Ordering;

use tracing::info;

use crate::error::{RankError, Result, MAX_SOURCES, MIN_SOURCES};
use crate::merge::{merge_records, ConsolidatedRecord};
use crate::normalize::{normalize_table, ColumnAliases};
use crate::records::{SourceInfo, SourceTable};
use crate::scoring::{score_records, validate_sources, ScoringParams};

/// Ranked organizations plus the sources they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub sources: Vec<SourceInfo>,
    /// Sorted by final score, highest first.
    pub entries: Vec<ConsolidatedRecord>,
}

impl Ranking {
    /// Per-source 0/1 presence indicators for one entry, in source order.
    pub fn indicators(&self, entry: &ConsolidatedRecord) -> Vec<u8> {
        (0..self.sources.len())
            .map(|idx| u8::from(entry.present_in.contains(&idx)))
            .collect()
    }

    pub fn source_labels(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable sort by final score, descending. Ties keep their current order;
/// `-0.0` and `0.0` tie.
pub fn rank(mut records: Vec<ConsolidatedRecord>) -> Vec<ConsolidatedRecord> {
    records.sort_by(|a, b| b.final_score.partial_cmp(&a.final_score).unwrap_or(Ordering::Equal));
    records
}

/// Run the full pipeline over 2–4 source tables.
///
/// Source count and weights are checked before any row is touched; after
/// that, malformed cells only ever degrade to missing values.
pub fn rank_sources(tables: &[SourceTable], params: &ScoringParams, aliases: &ColumnAliases) -> Result<Ranking> {
    if !(MIN_SOURCES..=MAX_SOURCES).contains(&tables.len()) {
        return Err(RankError::InputCount(tables.len()));
    }

    let sources: Vec<SourceInfo> = tables.iter().map(SourceInfo::from).collect();
    validate_sources(&sources).map_err(RankError::Configuration)?;

    let normalized: Vec<_> = tables
        .iter()
        .enumerate()
        .flat_map(|(idx, table)| normalize_table(table, idx, aliases))
        .collect();

    let merged = merge_records(&normalized);
    let entries = rank(score_records(merged, &sources, params));

    info!(
        sources = sources.len(),
        rows = normalized.len(),
        organizations = entries.len(),
        "ranking complete"
    );

    Ok(Ranking { sources, entries })
}
