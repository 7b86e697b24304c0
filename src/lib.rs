//! Rank organizations found across several spreadsheet exports.
//!
//! Rows from 2–4 source tables are normalized ([`normalize`]), linked by
//! their canonical website domain ([`identity`]), consolidated per
//! organization ([`merge`]), scored on source presence and online
//! reputation ([`scoring`]) and sorted ([`ranking`]).

pub mod config;
pub mod error;
pub mod identity;
pub mod input;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod prompt;
pub mod ranking;
pub mod records;
pub mod scoring;

pub use error::{RankError, Result};
pub use merge::ConsolidatedRecord;
pub use normalize::ColumnAliases;
pub use ranking::{rank_sources, Ranking};
pub use records::{NormalizedRecord, RawRecord, SourceInfo, SourceTable};
pub use scoring::{ScoringConfig, ScoringParams};
