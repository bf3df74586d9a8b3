//! Staleness policy for cached team-years.
//!
//! Cached data is refreshed only while the season is in progress: when the
//! reference date falls inside the cached games' `[min, max]` date range,
//! both ends inclusive. A season that has not started yet or is already over
//! is left alone.
//!
//! The rule looks at the cached date range only. A game appended after the
//! cached `max` date is not noticed once the reference date has also passed
//! it.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::TeamYear;

/// Where a reference date sits relative to the cached season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessCheck {
    /// Before the first cached game
    NotStarted { first: NaiveDate },
    /// Within the cached range; results may have changed
    InProgress { first: NaiveDate, last: NaiveDate },
    /// After the last cached game
    Finished { last: NaiveDate },
}

impl StalenessCheck {
    /// Whether this position calls for a re-fetch.
    pub fn needs_refresh(&self) -> bool {
        matches!(self, Self::InProgress { .. })
    }
}

/// Place `as_of` relative to the cached games of `team_year`.
///
/// Fails with [`AppError::StaleCacheDecision`] when there are no cached
/// games to compare against.
pub fn check(team_year: &TeamYear, as_of: NaiveDate) -> Result<StalenessCheck> {
    let (first, last) = team_year.date_range().ok_or_else(|| {
        AppError::StaleCacheDecision(format!(
            "no cached games for {} {}",
            team_year.team, team_year.year
        ))
    })?;

    Ok(if as_of < first {
        StalenessCheck::NotStarted { first }
    } else if as_of > last {
        StalenessCheck::Finished { last }
    } else {
        StalenessCheck::InProgress { first, last }
    })
}

/// Whether `team_year` must be re-fetched as of `as_of`.
///
/// An undecidable comparison counts as stale.
pub fn needs_refresh(team_year: &TeamYear, as_of: NaiveDate) -> bool {
    match check(team_year, as_of) {
        Ok(position) => {
            log::debug!(
                "{} {} as of {}: {:?}",
                team_year.team,
                team_year.year,
                as_of,
                position
            );
            position.needs_refresh()
        }
        Err(e) => {
            log::info!("{}; treating cache as stale", e);
            true
        }
    }
}
