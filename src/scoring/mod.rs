pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{final_score, frequency_score, reputation_score, score_records};
pub use validation::{validate_scoring, validate_sources};
