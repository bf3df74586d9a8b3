//! Schedule entries from one team's perspective.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Field;

/// Final outcome of a played game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub win: bool,
    pub team_score: u32,
    pub opp_score: u32,
}

impl GameResult {
    /// Site label for the outcome.
    pub fn label(&self) -> &'static str {
        if self.win { "W" } else { "L" }
    }
}

/// A scheduled or played game.
///
/// `result` is `Known(None)` for a game that has not been played yet and
/// `Unknown` when the result cell could not be read at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameRow", try_from = "GameRow")]
pub struct Game {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub opponent: Field<String>,
    pub is_home: Field<bool>,
    pub result: Field<Option<GameResult>>,
    pub attendance: Field<u32>,
}

impl Game {
    /// Date and clock time; games without a time sort at midnight.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    pub fn is_played(&self) -> bool {
        matches!(self.result, Field::Known(Some(_)))
    }

    /// Opponent name, or `"unknown"` when the cell was missing.
    pub fn opponent_name(&self) -> &str {
        match &self.opponent {
            Field::Known(name) => name,
            Field::Unknown => "unknown",
        }
    }
}

/// Flat persisted form of a [`Game`]; column order is the `games` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameRow {
    date: NaiveDate,
    #[serde(default)]
    time: Option<NaiveTime>,
    opponent: Option<String>,
    is_home: Option<bool>,
    result_label: Option<String>,
    win: Option<bool>,
    team_score: Option<u32>,
    opp_score: Option<u32>,
    #[serde(default)]
    attendance: Option<u32>,
}

impl From<Game> for GameRow {
    fn from(game: Game) -> Self {
        let (result_label, win, team_score, opp_score) = match game.result {
            Field::Unknown => (None, None, None, None),
            Field::Known(None) => (Some(String::new()), None, None, None),
            Field::Known(Some(r)) => (
                Some(r.label().to_string()),
                Some(r.win),
                Some(r.team_score),
                Some(r.opp_score),
            ),
        };

        Self {
            date: game.date,
            time: game.time,
            opponent: game.opponent.into(),
            is_home: game.is_home.into(),
            result_label,
            win,
            team_score,
            opp_score,
            attendance: game.attendance.into(),
        }
    }
}

impl TryFrom<GameRow> for Game {
    type Error = String;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let result = match (row.result_label, row.win, row.team_score, row.opp_score) {
            (None, _, _, _) => Field::Unknown,
            (Some(_), Some(win), Some(team_score), Some(opp_score)) => {
                Field::Known(Some(GameResult {
                    win,
                    team_score,
                    opp_score,
                }))
            }
            (Some(_), None, None, None) => Field::Known(None),
            (Some(label), ..) => {
                return Err(format!(
                    "game on {} has result '{}' without both scores",
                    row.date, label
                ));
            }
        };

        Ok(Self {
            date: row.date,
            time: row.time,
            opponent: row.opponent.into(),
            is_home: row.is_home.into(),
            result,
            attendance: row.attendance.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played() -> Game {
        Game {
            date: NaiveDate::from_ymd_opt(2023, 11, 6).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0),
            opponent: Field::Known("Duke".into()),
            is_home: Field::Known(false),
            result: Field::Known(Some(GameResult {
                win: true,
                team_score: 78,
                opp_score: 65,
            })),
            attendance: Field::Known(9314),
        }
    }

    #[test]
    fn test_persisted_columns() {
        let value = serde_json::to_value(played()).unwrap();
        assert_eq!(value["date"], "2023-11-06");
        assert_eq!(value["opponent"], "Duke");
        assert_eq!(value["is_home"], false);
        assert_eq!(value["result_label"], "W");
        assert_eq!(value["win"], true);
        assert_eq!(value["team_score"], 78);
        assert_eq!(value["opp_score"], 65);
    }

    #[test]
    fn test_unplayed_and_unknown_results_stay_distinct() {
        let mut unplayed = played();
        unplayed.result = Field::Known(None);
        let mut unknown = played();
        unknown.result = Field::Unknown;

        let a: Game = serde_json::from_value(serde_json::to_value(&unplayed).unwrap()).unwrap();
        let b: Game = serde_json::from_value(serde_json::to_value(&unknown).unwrap()).unwrap();

        assert_eq!(a.result, Field::Known(None));
        assert_eq!(b.result, Field::Unknown);
        assert!(!a.is_played());
    }

    #[test]
    fn test_rejects_half_scored_row() {
        let json = serde_json::json!({
            "date": "2023-11-06",
            "opponent": "Duke",
            "is_home": true,
            "result_label": "W",
            "win": true,
            "team_score": 78,
            "opp_score": null,
        });
        assert!(serde_json::from_value::<Game>(json).is_err());
    }

    #[test]
    fn test_starts_at_defaults_to_midnight() {
        let mut game = played();
        game.time = None;
        assert_eq!(game.starts_at().time(), NaiveTime::MIN);
    }
}
