//! Per team-year cache of schedule, roster and season stats.
//!
//! ## Refresh Flow
//!
//! ```text
//! refresh(team, year, force, as_of)
//!   ├── cached and not forced → staleness check → maybe return cache
//!   ├── fetch schedule, stats (and roster when needed)
//!   ├── normalize rows, collect per-row and per-cell problems
//!   └── write all tables together
//! ```
//!
//! Every fetch completes before anything is written, so a failed fetch
//! leaves the previous cache untouched.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{CacheConfig, TeamYear};
use crate::parsers::season_label;
use crate::services::{Scraper, TableReport, normalize_games, normalize_roster, normalize_stats};
use crate::storage::{Store, Table, TableKey};

use super::staleness;

/// Outcome of [`SeasonCache::refresh`].
#[derive(Debug, Clone)]
pub struct SeasonRefresh {
    pub team_year: TeamYear,
    /// Whether the scraper was called
    pub fetched: bool,
    /// Per-table normalization outcome; empty when served from cache
    pub reports: Vec<TableReport>,
}

impl SeasonRefresh {
    /// Rows rejected across all fetched tables.
    pub fn rejected_rows(&self) -> usize {
        self.reports.iter().map(|r| r.rejected.len()).sum()
    }

    /// Cells that could not be read across all fetched tables.
    pub fn field_issues(&self) -> usize {
        self.reports.iter().map(|r| r.issues.len()).sum()
    }
}

/// Team-year cache over a [`Store`], filled from a [`Scraper`].
pub struct SeasonCache<'a> {
    store: &'a dyn Store,
    scraper: &'a dyn Scraper,
    config: CacheConfig,
}

impl<'a> SeasonCache<'a> {
    pub fn new(store: &'a dyn Store, scraper: &'a dyn Scraper) -> Self {
        Self::with_config(store, scraper, CacheConfig::default())
    }

    pub fn with_config(
        store: &'a dyn Store,
        scraper: &'a dyn Scraper,
        config: CacheConfig,
    ) -> Self {
        Self {
            store,
            scraper,
            config,
        }
    }

    /// Read the cached team-year; tables never written come back empty.
    pub async fn load(&self, team: &str, year: i32) -> Result<TeamYear> {
        let mut team_year = TeamYear::empty(team, year);
        team_year.games = self.read_records(&TableKey::games(team, year)).await?;
        team_year.roster = self.read_records(&TableKey::roster(team, year)).await?;
        team_year.stats = self.read_records(&TableKey::stats(team, year)).await?;
        team_year.sort_games();
        Ok(team_year)
    }

    /// Staleness policy; see [`staleness::needs_refresh`].
    pub fn needs_refresh(&self, team_year: &TeamYear, as_of: NaiveDate) -> bool {
        staleness::needs_refresh(team_year, as_of)
    }

    /// Bring the cached team-year up to date.
    ///
    /// Re-fetches when `force` is set, when nothing is cached yet, or when
    /// the cached season is in progress as of `as_of`. The tables are
    /// replaced wholesale.
    pub async fn refresh(
        &self,
        team: &str,
        year: i32,
        force: bool,
        as_of: NaiveDate,
    ) -> Result<SeasonRefresh> {
        let label = season_label(year);

        if !force && self.store.exists(&TableKey::games(team, year)).await? {
            let cached = self.load(team, year).await?;
            if !self.needs_refresh(&cached, as_of) {
                log::info!("{} {} cache is current as of {}", team, label, as_of);
                return Ok(SeasonRefresh {
                    team_year: cached,
                    fetched: false,
                    reports: Vec::new(),
                });
            }
        }

        log::info!("Fetching {} {}{}", team, label, if force { " (forced)" } else { "" });
        self.fetch_and_store(team, year, force).await
    }

    async fn fetch_and_store(&self, team: &str, year: i32, force: bool) -> Result<SeasonRefresh> {
        let roster_key = TableKey::roster(team, year);
        let fetch_roster =
            force || self.config.refetch_roster || !self.store.exists(&roster_key).await?;

        let schedule_rows = self.scraper.fetch_schedule(team, year).await?;
        let stats_rows = self.scraper.fetch_stats(team, year).await?;
        let roster_rows = if fetch_roster {
            Some(self.scraper.fetch_roster(team, year).await?)
        } else {
            log::debug!("Keeping cached roster for {} {}", team, year);
            None
        };

        let (games, games_report) = normalize_games(&schedule_rows).split("games");
        let (stats, stats_report) = normalize_stats(&stats_rows).split("stats");
        let mut reports = vec![games_report, stats_report];

        let mut team_year = TeamYear::empty(team, year);
        team_year.games = games;
        team_year.stats = stats;
        team_year.sort_games();

        let mut tables = vec![
            (
                TableKey::games(team, year),
                Table::from_records(&team_year.games)?,
            ),
            (
                TableKey::stats(team, year),
                Table::from_records(&team_year.stats)?,
            ),
        ];

        match roster_rows {
            Some(rows) => {
                let (roster, roster_report) = normalize_roster(&rows).split("roster");
                tables.push((roster_key, Table::from_records(&roster)?));
                reports.push(roster_report);
                team_year.roster = roster;
            }
            None => team_year.roster = self.read_records(&roster_key).await?,
        }

        self.store.write_all(&tables).await?;

        log::info!(
            "Stored {} {}: {} games, {} players, {} stat lines",
            team,
            season_label(year),
            team_year.games.len(),
            team_year.roster.len(),
            team_year.stats.len()
        );

        Ok(SeasonRefresh {
            team_year,
            fetched: true,
            reports,
        })
    }

    async fn read_records<T: DeserializeOwned>(&self, key: &TableKey) -> Result<Vec<T>> {
        match self.store.read(key).await? {
            Some(table) => table.to_records(),
            None => Ok(Vec::new()),
        }
    }
}
