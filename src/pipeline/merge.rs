//! Two-sided box scores for a single game.
//!
//! Each team's half is stored under the other team's directory, keyed by
//! the team it belongs to:
//!
//! ```text
//! {year}/{team_y}/games/{team_x}.json   # team_x's players
//! {year}/{team_x}/games/{team_y}.json   # team_y's players
//! ```
//!
//! Both halves are fetched in one scraper call and written together.

use crate::error::Result;
use crate::models::{BoxScoreLine, PairwiseGameStats, RawRow};
use crate::services::{Scraper, TableReport, normalize_stats};
use crate::storage::{Store, Table, TableKey};

/// Outcome of [`PairwiseGameMerge::merge`].
#[derive(Debug, Clone)]
pub struct MergedGame {
    pub stats: PairwiseGameStats,
    /// Whether the scraper was called
    pub fetched: bool,
    /// One report per fetched half; empty when served from cache
    pub reports: Vec<TableReport>,
}

/// Merges and caches both box scores of a game.
pub struct PairwiseGameMerge<'a> {
    store: &'a dyn Store,
    scraper: &'a dyn Scraper,
}

impl<'a> PairwiseGameMerge<'a> {
    pub fn new(store: &'a dyn Store, scraper: &'a dyn Scraper) -> Self {
        Self { store, scraper }
    }

    /// Both teams' player rows for the game, `team_x` first.
    ///
    /// Fetches and stores the pair when either half is missing from the
    /// cache; otherwise reads both halves without calling the scraper.
    pub async fn merge(&self, team_x: &str, team_y: &str, year: i32) -> Result<MergedGame> {
        let x_key = TableKey::game_stats(team_y, team_x, year);
        let y_key = TableKey::game_stats(team_x, team_y, year);

        let cached = (self.store.read(&x_key).await?, self.store.read(&y_key).await?);
        let (x_lines, y_lines, reports) = match cached {
            (Some(x_table), Some(y_table)) => {
                log::debug!("Box scores for {} vs {} {} from cache", team_x, team_y, year);
                (x_table.to_records()?, y_table.to_records()?, Vec::new())
            }
            _ => self.fetch_pair(team_x, team_y, year, x_key, y_key).await?,
        };

        let fetched = !reports.is_empty();
        let mut lines: Vec<BoxScoreLine> = x_lines;
        lines.extend(y_lines);

        Ok(MergedGame {
            stats: PairwiseGameStats {
                year,
                team_x: team_x.to_string(),
                team_y: team_y.to_string(),
                lines,
            },
            fetched,
            reports,
        })
    }

    async fn fetch_pair(
        &self,
        team_x: &str,
        team_y: &str,
        year: i32,
        x_key: TableKey,
        y_key: TableKey,
    ) -> Result<(Vec<BoxScoreLine>, Vec<BoxScoreLine>, Vec<TableReport>)> {
        log::info!("Fetching box scores for {} vs {} {}", team_x, team_y, year);
        let rows = self.scraper.fetch_pairwise_game(team_x, team_y, year).await?;

        let (x_lines, x_report) = normalize_half(team_x, &rows.team_x);
        let (y_lines, y_report) = normalize_half(team_y, &rows.team_y);

        self.store
            .write_all(&[
                (x_key, Table::from_records(&x_lines)?),
                (y_key, Table::from_records(&y_lines)?),
            ])
            .await?;

        Ok((x_lines, y_lines, vec![x_report, y_report]))
    }
}

/// Normalize one team's box score rows and tag them with the team.
fn normalize_half(team: &str, rows: &[RawRow]) -> (Vec<BoxScoreLine>, TableReport) {
    let (lines, report) = normalize_stats(rows).split(format!("{team} box score"));
    let tagged = lines
        .into_iter()
        .map(|line| BoxScoreLine {
            team: team.to_string(),
            line,
        })
        .collect();
    (tagged, report)
}
