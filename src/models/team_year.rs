//! In-memory view over one team's season.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use super::{Field, Game, Player, StatLine};

/// One team's games, roster and stats for one season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamYear {
    pub team: String,
    pub year: i32,
    /// Ordered by start time
    pub games: Vec<Game>,
    pub roster: Vec<Player>,
    pub stats: Vec<StatLine>,
}

/// A roster entry joined with its stats row.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    pub player: Player,
    pub stats: StatLine,
}

impl TeamYear {
    /// An empty team-year with nothing cached yet.
    pub fn empty(team: impl Into<String>, year: i32) -> Self {
        Self {
            team: team.into(),
            year,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.roster.is_empty() && self.stats.is_empty()
    }

    /// Sort games by start time, keeping scrape order for equal times.
    pub fn sort_games(&mut self) {
        self.games.sort_by_key(Game::starts_at);
    }

    /// Earliest and latest cached game dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.games.iter().map(|g| g.date).min()?;
        let max = self.games.iter().map(|g| g.date).max()?;
        Some((min, max))
    }

    /// The closest game dated strictly after `from`, or the last game of
    /// the season when none remain. Ties go to the earlier game in order.
    pub fn next_opponent_or_last(&self, from: NaiveDate) -> Option<&Game> {
        let mut next: Option<(i64, &Game)> = None;
        for game in &self.games {
            let days = (game.date - from).num_days();
            if days <= 0 {
                continue;
            }
            if next.is_none_or(|(best, _)| days < best) {
                next = Some((days, game));
            }
        }

        match next {
            Some((_, game)) => Some(game),
            None => self.games.iter().max_by_key(|g| g.starts_at()),
        }
    }

    /// [`next_opponent_or_last`](Self::next_opponent_or_last) as a matchup.
    pub fn next_game(&self, from: NaiveDate) -> Option<Matchup> {
        self.next_opponent_or_last(from).map(|game| Matchup {
            team: self.team.clone(),
            opponent: game.opponent_name().to_string(),
            year: self.year,
            is_home: game.is_home,
            date: game.date,
        })
    }

    /// Inner join of roster and stats on the player name key.
    ///
    /// Players missing from either side are dropped.
    pub fn roster_with_stats(&self) -> Vec<RosterStats> {
        let mut by_key: HashMap<String, Vec<&StatLine>> = HashMap::new();
        for line in &self.stats {
            by_key.entry(line.name().key()).or_default().push(line);
        }

        self.roster
            .iter()
            .flat_map(|player| {
                by_key
                    .get(&player.name.key())
                    .into_iter()
                    .flatten()
                    .map(move |line| RosterStats {
                        player: player.clone(),
                        stats: (*line).clone(),
                    })
            })
            .collect()
    }
}

/// An upcoming (or final) game between two teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub team: String,
    pub opponent: String,
    pub year: i32,
    pub is_home: Field<bool>,
    pub date: NaiveDate,
}

impl fmt::Display for Matchup {
    /// Home team first; an unknown venue reads from `team`'s side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_home {
            Field::Known(false) => write!(f, "{} faces {}", self.opponent, self.team),
            _ => write!(f, "{} faces {}", self.team, self.opponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerName, StatValue};
    use std::collections::BTreeMap;

    fn date(m: u32, d: u32) -> NaiveDate {
        let y = if m >= 8 { 2023 } else { 2024 };
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn game(on: NaiveDate, opponent: &str) -> Game {
        Game {
            date: on,
            time: None,
            opponent: Field::Known(opponent.into()),
            is_home: Field::Known(true),
            result: Field::Known(None),
            attendance: Field::Unknown,
        }
    }

    fn season() -> TeamYear {
        TeamYear {
            team: "Duke".into(),
            year: 2023,
            games: vec![
                game(date(11, 6), "Dartmouth"),
                game(date(11, 10), "Arizona"),
                game(date(11, 14), "Michigan St."),
                game(date(11, 14), "Josh Hopkins"),
                game(date(3, 9), "North Carolina"),
            ],
            ..TeamYear::default()
        }
    }

    fn player(last: &str, first: &str) -> Player {
        Player {
            jersey: Field::Unknown,
            name: PlayerName {
                first_name: first.into(),
                last_name: last.into(),
            },
            position: Field::Unknown,
            height_in: Field::Unknown,
            class_year: Field::Unknown,
            games_played: Field::Unknown,
            games_scored: Field::Unknown,
        }
    }

    fn stat(name: &str, pts: f64) -> StatLine {
        StatLine {
            player: name.into(),
            values: BTreeMap::from([("pts".to_string(), StatValue::Number(pts))]),
        }
    }

    #[test]
    fn test_next_opponent_is_strictly_after() {
        let team = season();
        let next = team.next_opponent_or_last(date(11, 6)).unwrap();
        assert_eq!(next.opponent_name(), "Arizona");
    }

    #[test]
    fn test_next_opponent_tie_keeps_first_in_order() {
        let team = season();
        let next = team.next_opponent_or_last(date(11, 11)).unwrap();
        assert_eq!(next.opponent_name(), "Michigan St.");
    }

    #[test]
    fn test_season_over_returns_last_game() {
        let team = season();
        let last = team.next_opponent_or_last(date(4, 1)).unwrap();
        assert_eq!(last.opponent_name(), "North Carolina");
    }

    #[test]
    fn test_no_games_no_opponent() {
        assert!(TeamYear::empty("Duke", 2023)
            .next_opponent_or_last(date(11, 1))
            .is_none());
    }

    #[test]
    fn test_matchup_display_puts_home_team_first() {
        let mut team = season();
        let home = team.next_game(date(11, 1)).unwrap();
        assert_eq!(home.to_string(), "Duke faces Dartmouth");

        team.games[0].is_home = Field::Known(false);
        let away = team.next_game(date(11, 1)).unwrap();
        assert_eq!(away.to_string(), "Dartmouth faces Duke");
    }

    #[test]
    fn test_roster_with_stats_is_inner_join() {
        let team = TeamYear {
            roster: vec![
                player("Filipowski", "Kyle"),
                player("Proctor", "Tyrese"),
                player("Walk-On", "Only"),
            ],
            stats: vec![
                stat("FILIPOWSKI, Kyle", 17.0),
                stat("Proctor, Tyrese", 10.0),
                stat("Transfer, Stats Only", 3.0),
            ],
            ..TeamYear::empty("Duke", 2023)
        };

        let joined = team.roster_with_stats();
        let names: Vec<_> = joined
            .iter()
            .map(|r| r.player.name.last_name.as_str())
            .collect();

        // Roster-only and stats-only players are both dropped.
        assert_eq!(names, vec!["Filipowski", "Proctor"]);
        assert_eq!(joined[0].stats.get("pts"), Some(&StatValue::Number(17.0)));
    }

    #[test]
    fn test_date_range() {
        let team = season();
        assert_eq!(team.date_range(), Some((date(11, 6), date(3, 9))));
        assert_eq!(TeamYear::empty("Duke", 2023).date_range(), None);
    }
}
