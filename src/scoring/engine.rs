use std::collections::BTreeSet;

use super::config::ScoringParams;
use crate::merge::ConsolidatedRecord;
use crate::records::SourceInfo;

/// Sum of the weights of every source the organization appears in.
///
/// Sources it is absent from contribute nothing, so the score rewards
/// breadth of presence rather than the number of rows.
pub fn frequency_score(present_in: &BTreeSet<usize>, sources: &[SourceInfo]) -> f64 {
    sources
        .iter()
        .enumerate()
        .filter(|(idx, _)| present_in.contains(idx))
        .map(|(_, source)| source.weight)
        .sum()
}

/// Log-dampened reputation: `rating * (1 + log_base(1 + total_reviews))`.
///
/// Falls back to the configured fallback score when there is no weighted
/// rating or fewer reviews than the configured minimum.
pub fn reputation_score(weighted_rating: Option<f64>, total_reviews: f64, params: &ScoringParams) -> f64 {
    match weighted_rating {
        Some(rating) if total_reviews >= params.min_review_count() => {
            let log_part = total_reviews.ln_1p() / params.log_base().ln();
            rating * (1.0 + log_part)
        }
        _ => params.fallback_score(),
    }
}

pub fn final_score(frequency: f64, reputation: f64, params: &ScoringParams) -> f64 {
    params.alpha() * frequency + params.beta() * reputation
}

/// Fill in the three scores of every consolidated record.
pub fn score_records(
    records: Vec<ConsolidatedRecord>,
    sources: &[SourceInfo],
    params: &ScoringParams,
) -> Vec<ConsolidatedRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.frequency_score = frequency_score(&record.present_in, sources);
            record.reputation_score = reputation_score(record.weighted_rating, record.total_reviews, params);
            record.final_score = final_score(record.frequency_score, record.reputation_score, params);
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(weights: &[f64]) -> Vec<SourceInfo> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| SourceInfo {
                label: format!("Datei {}", i + 1),
                weight: *w,
            })
            .collect()
    }

    fn params_with_min(min_review_count: f64, fallback: f64) -> ScoringParams {
        ScoringParams::new(10.0, 0.5, 10.0, fallback, min_review_count).unwrap()
    }

    #[test]
    fn test_frequency_sums_present_weights() {
        let sources = sources(&[1.0, 2.0, 4.0]);
        assert_eq!(frequency_score(&BTreeSet::from([0, 1]), &sources), 3.0);
        assert_eq!(frequency_score(&BTreeSet::from([2]), &sources), 4.0);
        assert_eq!(frequency_score(&BTreeSet::new(), &sources), 0.0);
    }

    #[test]
    fn test_frequency_zero_weight_source() {
        let sources = sources(&[0.0, 1.0]);
        assert_eq!(frequency_score(&BTreeSet::from([0]), &sources), 0.0);
    }

    #[test]
    fn test_reputation_formula() {
        let params = ScoringParams::default();
        let score = reputation_score(Some(4.75), 40.0, &params);
        let expected = 4.75 * (1.0 + 41f64.log10());
        assert!((score - expected).abs() < 1e-9);
        assert!((score - 12.41).abs() < 0.01);
    }

    #[test]
    fn test_reputation_natural_base() {
        let params = ScoringParams::new(10.0, 0.5, std::f64::consts::E, 0.0, 0.0).unwrap();
        let score = reputation_score(Some(2.0), 9.0, &params);
        assert!((score - 2.0 * (1.0 + 10f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_reputation_fallback_without_rating() {
        let params = params_with_min(0.0, 7.0);
        assert_eq!(reputation_score(None, 100.0, &params), 7.0);
    }

    #[test]
    fn test_reputation_fallback_below_min_reviews() {
        let params = params_with_min(50.0, 1.5);
        assert_eq!(reputation_score(Some(5.0), 49.0, &params), 1.5);
        assert!(reputation_score(Some(5.0), 50.0, &params) > 5.0);
    }

    #[test]
    fn test_reputation_monotone_in_reviews() {
        let params = ScoringParams::default();
        let mut previous = f64::MIN;
        for reviews in [1.0, 2.0, 10.0, 50.0, 1_000.0, 10_000.0] {
            let score = reputation_score(Some(3.5), reviews, &params);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_final_score_linear_combination() {
        let params = ScoringParams::default();
        assert!((final_score(3.0, 12.41, &params) - 36.205).abs() < 1e-9);
    }

    #[test]
    fn test_score_records_fills_scores() {
        let record = ConsolidatedRecord {
            canonical_key: "x.com".to_string(),
            website: None,
            phone: None,
            address: None,
            organization_names: vec![],
            name_conflict: false,
            present_in: BTreeSet::from([0, 1]),
            record_count: 2,
            total_reviews: 40.0,
            weighted_rating: Some(4.75),
            frequency_score: 0.0,
            reputation_score: 0.0,
            final_score: 0.0,
        };
        let scored = score_records(vec![record], &sources(&[1.0, 2.0]), &ScoringParams::default());
        assert_eq!(scored[0].frequency_score, 3.0);
        assert!((scored[0].reputation_score - 12.41).abs() < 0.01);
        assert!((scored[0].final_score - 36.21).abs() < 0.01);
    }
}
