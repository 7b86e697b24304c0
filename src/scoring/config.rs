use serde::{Deserialize, Serialize};

use super::validation::validate_scoring;
use crate::error::{RankError, Result};

pub const DEFAULT_ALPHA: f64 = 10.0;
pub const DEFAULT_BETA: f64 = 0.5;
pub const DEFAULT_LOG_BASE: f64 = 10.0;
pub const DEFAULT_FALLBACK_SCORE: f64 = 0.0;
pub const DEFAULT_MIN_REVIEW_COUNT: f64 = 0.0;

/// Scoring section of the config file.
///
/// Every field is optional; anything left out takes its default.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   alpha: 10          # weight of the frequency score
///   beta: 0.5          # weight of the reputation score
///   log_base: 10       # base of the review-volume logarithm
///   fallback_score: 0  # reputation when rating data is insufficient
///   min_review_count: 0
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub alpha: Option<f64>,

    #[serde(default)]
    pub beta: Option<f64>,

    /// Must be positive and not 1
    #[serde(default)]
    pub log_base: Option<f64>,

    #[serde(default)]
    pub fallback_score: Option<f64>,

    /// Groups with fewer total reviews get the fallback score
    #[serde(default)]
    pub min_review_count: Option<f64>,
}

/// Validated, immutable scoring parameters.
///
/// Only obtainable through [`ScoringParams::from_config`] or
/// [`ScoringParams::new`], so a value of this type always has a usable
/// logarithm base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    alpha: f64,
    beta: f64,
    log_base: f64,
    fallback_score: f64,
    min_review_count: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            log_base: DEFAULT_LOG_BASE,
            fallback_score: DEFAULT_FALLBACK_SCORE,
            min_review_count: DEFAULT_MIN_REVIEW_COUNT,
        }
    }
}

impl ScoringParams {
    pub fn new(alpha: f64, beta: f64, log_base: f64, fallback_score: f64, min_review_count: f64) -> Result<Self> {
        Self::from_config(&ScoringConfig {
            alpha: Some(alpha),
            beta: Some(beta),
            log_base: Some(log_base),
            fallback_score: Some(fallback_score),
            min_review_count: Some(min_review_count),
        })
    }

    /// Fill in defaults and validate. All problems are reported together.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        validate_scoring(config).map_err(RankError::Configuration)?;
        Ok(Self {
            alpha: config.alpha.unwrap_or(DEFAULT_ALPHA),
            beta: config.beta.unwrap_or(DEFAULT_BETA),
            log_base: config.log_base.unwrap_or(DEFAULT_LOG_BASE),
            fallback_score: config.fallback_score.unwrap_or(DEFAULT_FALLBACK_SCORE),
            min_review_count: config.min_review_count.unwrap_or(DEFAULT_MIN_REVIEW_COUNT),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn log_base(&self) -> f64 {
        self.log_base
    }

    pub fn fallback_score(&self) -> f64 {
        self.fallback_score
    }

    pub fn min_review_count(&self) -> f64 {
        self.min_review_count
    }
}
