use std::collections::HashSet;

use super::config::ScoringConfig;
use crate::records::SourceInfo;

/// Validate scoring parameters.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let fields = [
        ("alpha", config.alpha),
        ("beta", config.beta),
        ("log_base", config.log_base),
        ("fallback_score", config.fallback_score),
        ("min_review_count", config.min_review_count),
    ];
    for (name, value) in fields {
        if let Some(v) = value {
            if !v.is_finite() {
                errors.push(format!("scoring.{}: must be a finite number", name));
            }
        }
    }

    if let Some(base) = config.log_base {
        if base.is_finite() && base <= 0.0 {
            errors.push(format!("scoring.log_base: must be positive, got {}", base));
        } else if base == 1.0 {
            errors.push("scoring.log_base: must not be 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate per-source weights and labels.
/// Weights must be finite and non-negative; labels must be distinct.
pub fn validate_sources(sources: &[SourceInfo]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for source in sources {
        if !source.weight.is_finite() || source.weight < 0.0 {
            errors.push(format!(
                "weights[{}]: must be a non-negative number, got {}",
                source.label, source.weight
            ));
        }
        if !seen.insert(source.label.as_str()) {
            errors.push(format!("sources: duplicate label '{}'", source.label));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(label: &str, weight: f64) -> SourceInfo {
        SourceInfo {
            label: label.to_string(),
            weight,
        }
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_valid_config() {
        let config = ScoringConfig {
            alpha: Some(10.0),
            beta: Some(0.5),
            log_base: Some(2.0),
            fallback_score: Some(1.0),
            min_review_count: Some(5.0),
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_log_base_below_one_is_allowed() {
        let config = ScoringConfig {
            log_base: Some(0.5),
            ..Default::default()
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_log_base_one() {
        let config = ScoringConfig {
            log_base: Some(1.0),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.log_base"));
    }

    #[test]
    fn test_log_base_zero_and_negative() {
        for base in [0.0, -10.0] {
            let config = ScoringConfig {
                log_base: Some(base),
                ..Default::default()
            };
            let errors = validate_scoring(&config).unwrap_err();
            assert!(errors[0].contains("must be positive"));
        }
    }

    #[test]
    fn test_non_finite_parameter() {
        let config = ScoringConfig {
            alpha: Some(f64::NAN),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.alpha"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            alpha: Some(f64::INFINITY), // Error 1
            log_base: Some(1.0),        // Error 2
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_valid_sources() {
        let sources = vec![source("Datei 1", 1.0), source("Datei 2", 0.0)];
        assert!(validate_sources(&sources).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let sources = vec![source("Datei 1", 1.0), source("Datei 2", -1.0)];
        let errors = validate_sources(&sources).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("weights[Datei 2]"));
    }

    #[test]
    fn test_duplicate_label() {
        let sources = vec![source("Google", 1.0), source("Google", 2.0), source("Yelp", f64::NAN)];
        let errors = validate_sources(&sources).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("duplicate label 'Google'")));
    }
}
