mod schema;

pub use schema::{Config, SourceConfig};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::scoring::ScoringConfig;

/// Get the config directory path (~/.config/org-rank/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("org-rank"))
}

/// Get the default config file path (~/.config/org-rank/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration.
///
/// # Arguments
///
/// * `path` - Optional path to a config file. If None, uses the default path
///   (~/.config/org-rank/config.yaml) and falls back to built-in defaults when
///   that file does not exist.
///
/// A path ending in `.csv` is read as a `key,value` parameter table
/// (`ALPHA`, `BETA`, `LOG_BASE`, `FALLBACK_SCORE`, `MIN_REVIEW_COUNT`).
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML or CSV cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => {
                warn!("no config file found, using default parameters");
                return Ok(Config::default());
            }
        },
    };

    debug!(path = %config_path.display(), "loading config");
    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    if is_csv(&config_path) {
        let scoring = parse_parameter_table(&config_content)
            .with_context(|| format!("Failed to parse config: invalid parameter table in {}", config_path.display()))?;
        return Ok(Config {
            scoring: Some(scoring),
            ..Default::default()
        });
    }

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

#[derive(Debug, Deserialize)]
struct ParameterRow {
    key: String,
    value: String,
}

/// Parse a `key,value` parameter table into scoring settings.
pub fn parse_parameter_table(content: &str) -> Result<ScoringConfig> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut scoring = ScoringConfig::default();
    for row in reader.deserialize::<ParameterRow>() {
        let row = row.context("Failed to read parameter row")?;
        let value: f64 = row
            .value
            .parse()
            .with_context(|| format!("Parameter {} has non-numeric value '{}'", row.key, row.value))?;
        let slot = match row.key.as_str() {
            "ALPHA" => &mut scoring.alpha,
            "BETA" => &mut scoring.beta,
            "LOG_BASE" => &mut scoring.log_base,
            "FALLBACK_SCORE" => &mut scoring.fallback_score,
            "MIN_REVIEW_COUNT" => &mut scoring.min_review_count,
            other => {
                debug!(key = other, "ignoring unknown parameter");
                continue;
            }
        };
        *slot = Some(value);
    }
    Ok(scoring)
}
