// src/models/mod.rs

//! Domain models for the season cache.
//!
//! Raw scraped rows come in as [`RawRow`]; everything else here is the typed
//! form produced by the normalizer and persisted by the store.

mod config;
mod field;
mod game;
mod player;
mod raw;
mod stats;
mod team_year;

// Re-export all public types
pub use config::{CacheConfig, Config, LoggingConfig, PathsConfig, TeamEntry};
pub use field::Field;
pub use game::{Game, GameResult};
pub use player::{Player, PlayerName};
pub use raw::{Cell, RawRow};
pub use stats::{BoxScoreLine, PairwiseGameStats, StatLine, StatValue};
pub use team_year::{Matchup, RosterStats, TeamYear};
