// src/services/scraper.rs

//! Scraper collaborator.
//!
//! The site-facing side (page navigation, element lookup) lives outside this
//! crate; anything that can hand over raw rows implements [`Scraper`].
//! Implementations are driven one call at a time and never concurrently.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::RawRow;
use crate::utils::fs::path_segment;

/// Both teams' raw box score rows for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairwiseRows {
    /// Players of the first team passed to the fetch
    pub team_x: Vec<RawRow>,
    /// Players of the second team passed to the fetch
    pub team_y: Vec<RawRow>,
}

/// Source of raw scraped tables for a team-year.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Schedule/results rows.
    async fn fetch_schedule(&self, team: &str, year: i32) -> Result<Vec<RawRow>>;

    /// Roster rows.
    async fn fetch_roster(&self, team: &str, year: i32) -> Result<Vec<RawRow>>;

    /// Season stats rows.
    async fn fetch_stats(&self, team: &str, year: i32) -> Result<Vec<RawRow>>;

    /// Both box scores of the game between two teams, in one round trip.
    async fn fetch_pairwise_game(
        &self,
        team_x: &str,
        team_y: &str,
        year: i32,
    ) -> Result<PairwiseRows>;
}

/// Scraper that replays previously captured rows from JSON files.
///
/// ## Capture Layout
///
/// ```text
/// {root}/
/// └── {year}/
///     └── {team}/
///         ├── schedule.json
///         ├── roster.json
///         ├── stats.json
///         └── box/
///             └── {opponent}.json   # {team}'s players in that game
/// ```
#[derive(Debug, Clone)]
pub struct ReplayScraper {
    root: PathBuf,
}

impl ReplayScraper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn team_dir(&self, team: &str, year: i32) -> PathBuf {
        self.root.join(year.to_string()).join(path_segment(team))
    }

    async fn read_capture(&self, path: PathBuf, context: String) -> Result<Vec<RawRow>> {
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::fetch(
                    context,
                    format!("no capture at {}", path.display()),
                ));
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let rows: Vec<RawRow> = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::fetch(context.clone(), e))?;
        log::debug!("Replayed {} rows for {}", rows.len(), context);
        Ok(rows)
    }

    async fn read_table(&self, team: &str, year: i32, table: &str) -> Result<Vec<RawRow>> {
        let path = self.team_dir(team, year).join(format!("{table}.json"));
        self.read_capture(path, format!("{team} {year} {table}")).await
    }

    async fn read_box(&self, team: &str, opponent: &str, year: i32) -> Result<Vec<RawRow>> {
        let path = self
            .team_dir(team, year)
            .join("box")
            .join(format!("{}.json", path_segment(opponent)));
        self.read_capture(path, format!("{team} vs {opponent} {year} box score"))
            .await
    }
}

#[async_trait]
impl Scraper for ReplayScraper {
    async fn fetch_schedule(&self, team: &str, year: i32) -> Result<Vec<RawRow>> {
        self.read_table(team, year, "schedule").await
    }

    async fn fetch_roster(&self, team: &str, year: i32) -> Result<Vec<RawRow>> {
        self.read_table(team, year, "roster").await
    }

    async fn fetch_stats(&self, team: &str, year: i32) -> Result<Vec<RawRow>> {
        self.read_table(team, year, "stats").await
    }

    async fn fetch_pairwise_game(
        &self,
        team_x: &str,
        team_y: &str,
        year: i32,
    ) -> Result<PairwiseRows> {
        Ok(PairwiseRows {
            team_x: self.read_box(team_x, team_y, year).await?,
            team_y: self.read_box(team_y, team_x, year).await?,
        })
    }
}
