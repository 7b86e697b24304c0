use serde::{Deserialize, Serialize};

use crate::normalize::ColumnAliases;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub columns: Option<ColumnAliases>,

    /// Per-position source settings; entry N applies to the Nth input file
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub weight: Option<f64>,
}

impl Config {
    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn columns(&self) -> ColumnAliases {
        self.columns.clone().unwrap_or_default()
    }

    pub fn source(&self, index: usize) -> Option<&SourceConfig> {
        self.sources.get(index)
    }
}
