use std::path::PathBuf;
use thiserror::Error;

/// Smallest and largest number of source tables a run accepts.
pub const MIN_SOURCES: usize = 2;
pub const MAX_SOURCES: usize = 4;

/// Errors that abort a ranking run before any output is produced.
#[derive(Error, Debug)]
pub enum RankError {
    /// Invalid scoring parameters, weights or source labels. Every problem
    /// found is listed, not just the first.
    #[error("configuration error: {}", .0.join("; "))]
    Configuration(Vec<String>),

    /// Source count outside `MIN_SOURCES..=MAX_SOURCES`.
    #[error("expected between 2 and 4 source tables, got {0}")]
    InputCount(usize),

    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("failed to write {}: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, RankError>;
