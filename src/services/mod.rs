//! Service layer for the season cache.
//!
//! This module contains:
//! - Record normalization (`normalizer`)
//! - The scraper collaborator contract and a capture replayer (`scraper`)

pub mod normalizer;
mod scraper;

pub use normalizer::{
    Batch, FieldIssue, Normalized, RowError, TableReport, normalize_game, normalize_games,
    normalize_player, normalize_roster, normalize_stat_line, normalize_stats,
};
pub use scraper::{PairwiseRows, ReplayScraper, Scraper};
