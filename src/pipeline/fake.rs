//! Scripted scraper for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::RawRow;
use crate::services::{PairwiseRows, Scraper};

/// Hands out fixed rows and records every call.
#[derive(Default)]
pub struct FakeScraper {
    pub schedule: Vec<RawRow>,
    pub roster: Vec<RawRow>,
    pub stats: Vec<RawRow>,
    /// `(team, opponent)` to that team's players in the game
    pub boxes: HashMap<(String, String), Vec<RawRow>>,
    failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeScraper {
    pub fn season(schedule: Vec<RawRow>, roster: Vec<RawRow>, stats: Vec<RawRow>) -> Self {
        Self {
            schedule,
            roster,
            stats,
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// How many times `method` was called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|m| *m == method)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &str) -> Result<()> {
        self.calls.lock().unwrap().push(method.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::fetch(method, "scripted failure"));
        }
        Ok(())
    }

    fn box_rows(&self, team: &str, opponent: &str) -> Vec<RawRow> {
        self.boxes
            .get(&(team.to_string(), opponent.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Scraper for FakeScraper {
    async fn fetch_schedule(&self, _team: &str, _year: i32) -> Result<Vec<RawRow>> {
        self.record("schedule")?;
        Ok(self.schedule.clone())
    }

    async fn fetch_roster(&self, _team: &str, _year: i32) -> Result<Vec<RawRow>> {
        self.record("roster")?;
        Ok(self.roster.clone())
    }

    async fn fetch_stats(&self, _team: &str, _year: i32) -> Result<Vec<RawRow>> {
        self.record("stats")?;
        Ok(self.stats.clone())
    }

    async fn fetch_pairwise_game(
        &self,
        team_x: &str,
        team_y: &str,
        _year: i32,
    ) -> Result<PairwiseRows> {
        self.record("pairwise")?;
        Ok(PairwiseRows {
            team_x: self.box_rows(team_x, team_y),
            team_y: self.box_rows(team_y, team_x),
        })
    }
}
