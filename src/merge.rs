use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::records::NormalizedRecord;

/// One organization: every normalized row sharing a canonical key.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedRecord {
    pub canonical_key: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Distinct trimmed names in first-seen order.
    pub organization_names: Vec<String>,
    pub name_conflict: bool,
    /// Indices of the sources that contributed at least one row.
    pub present_in: BTreeSet<usize>,
    pub record_count: usize,
    pub total_reviews: f64,
    /// `None` when `total_reviews` is zero.
    pub weighted_rating: Option<f64>,
    pub frequency_score: f64,
    pub reputation_score: f64,
    pub final_score: f64,
}

impl ConsolidatedRecord {
    /// Names joined for display, e.g. `"Acme GmbH, ACME"`.
    pub fn display_name(&self) -> String {
        self.organization_names.join(", ")
    }

    pub fn is_unidentified(&self) -> bool {
        self.canonical_key.is_empty()
    }
}

#[derive(Default)]
struct GroupAccumulator {
    website: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    names: Vec<String>,
    present_in: BTreeSet<usize>,
    record_count: usize,
    total_reviews: f64,
    rating_times_reviews: f64,
}

impl GroupAccumulator {
    fn add(&mut self, record: &NormalizedRecord) {
        fill_first(&mut self.website, &record.website);
        fill_first(&mut self.phone, &record.phone);
        fill_first(&mut self.address, &record.address);

        if let Some(name) = record.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            if !self.names.iter().any(|n| n == name) {
                self.names.push(name.to_string());
            }
        }

        self.present_in.insert(record.source_index);
        self.record_count += 1;
        self.total_reviews += record.review_count.unwrap_or(0.0);
        // rows missing either side are left out of the numerator, not counted as 0
        if let (Some(rating), Some(count)) = (record.rating, record.review_count) {
            self.rating_times_reviews += rating * count;
        }
    }

    fn finish(self, canonical_key: String) -> ConsolidatedRecord {
        let weighted_rating = if self.total_reviews > 0.0 {
            Some(self.rating_times_reviews / self.total_reviews)
        } else {
            None
        };
        ConsolidatedRecord {
            canonical_key,
            website: self.website,
            phone: self.phone,
            address: self.address,
            name_conflict: self.names.len() > 1,
            organization_names: self.names,
            present_in: self.present_in,
            record_count: self.record_count,
            total_reviews: self.total_reviews,
            weighted_rating,
            frequency_score: 0.0,
            reputation_score: 0.0,
            final_score: 0.0,
        }
    }
}

fn fill_first(slot: &mut Option<String>, value: &Option<String>) {
    if slot.is_none() {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            *slot = Some(v.to_string());
        }
    }
}

/// Group records by canonical key and consolidate each group.
///
/// Records must arrive in input order (file order, then row order). Groups
/// come back in the order their key was first seen. Every record lands in
/// exactly one group; all records with an empty key share one group.
pub fn merge_records(records: &[NormalizedRecord]) -> Vec<ConsolidatedRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, GroupAccumulator)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.canonical_key.as_str()).or_insert_with(|| {
            groups.push((record.canonical_key.clone(), GroupAccumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.add(record);
    }

    debug!(records = records.len(), groups = groups.len(), "merged records by canonical key");

    groups
        .into_iter()
        .map(|(key, acc)| acc.finish(key))
        .collect()
}
