//! Cache entry points.
//!
//! - `SeasonCache`: load and refresh a team-year
//! - `PairwiseGameMerge`: both box scores of one game
//! - `staleness`: when a cached team-year is re-fetched

pub mod merge;
pub mod season;
pub mod staleness;

#[cfg(test)]
mod fake;

pub use merge::{MergedGame, PairwiseGameMerge};
pub use season::{SeasonCache, SeasonRefresh};
pub use staleness::{StalenessCheck, needs_refresh};
