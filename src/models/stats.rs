//! Per-player statistics: season aggregates and single-game box scores.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::PlayerName;
use crate::parsers::split_player_name;

/// A typed stats cell. The site decides which columns exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
    /// Absent or blank cell; never read as zero
    Missing,
}

/// One player's row in a stats table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    /// Player name as printed by the site
    pub player: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, StatValue>,
}

impl StatLine {
    pub fn name(&self) -> PlayerName {
        split_player_name(&self.player)
    }

    pub fn get(&self, column: &str) -> Option<&StatValue> {
        self.values.get(column)
    }
}

/// A box score row tagged with the team the player played for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScoreLine {
    pub team: String,
    #[serde(flatten)]
    pub line: StatLine,
}

/// Both sides of one game's box score.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseGameStats {
    pub year: i32,
    pub team_x: String,
    pub team_y: String,
    /// `team_x` rows followed by `team_y` rows
    pub lines: Vec<BoxScoreLine>,
}

impl PairwiseGameStats {
    /// Rows for one side of the game.
    pub fn for_team<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a BoxScoreLine> {
        self.lines.iter().filter(move |l| l.team == team)
    }

    /// `(team, player key)` for everyone who appears in the box score.
    pub fn participants(&self) -> BTreeSet<(String, String)> {
        self.lines
            .iter()
            .map(|l| (l.team.clone(), l.line.name().key()))
            .collect()
    }
}
