//! Roster entries.

use serde::{Deserialize, Serialize};

use super::Field;

/// A player's name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName {
    pub first_name: String,
    pub last_name: String,
}

impl PlayerName {
    /// Join key shared by roster and stats rows: lowercased `"last, first"`.
    pub fn key(&self) -> String {
        format!(
            "{}, {}",
            self.last_name.to_lowercase(),
            self.first_name.to_lowercase()
        )
    }
}

/// One player on a team's season roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Jersey number as printed; not always numeric (e.g. "00", "--")
    pub jersey: Field<String>,
    #[serde(flatten)]
    pub name: PlayerName,
    pub position: Field<String>,
    /// Height in total inches; `Known(0)` is the site's "no data" value
    pub height_in: Field<u32>,
    /// 1 (freshman) through 4 (senior), 5 for anything else
    pub class_year: Field<u8>,
    pub games_played: Field<u32>,
    pub games_scored: Field<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_case() {
        let a = PlayerName {
            first_name: "Kyle".into(),
            last_name: "Filipowski".into(),
        };
        let b = PlayerName {
            first_name: "KYLE".into(),
            last_name: "filipowski".into(),
        };
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_roster_columns() {
        let player = Player {
            jersey: Field::Known("30".into()),
            name: PlayerName {
                first_name: "Kyle".into(),
                last_name: "Filipowski".into(),
            },
            position: Field::Known("F".into()),
            height_in: Field::Known(84),
            class_year: Field::Known(2),
            games_played: Field::Known(33),
            games_scored: Field::Unknown,
        };

        let value = serde_json::to_value(&player).unwrap();
        for column in [
            "jersey",
            "first_name",
            "last_name",
            "position",
            "height_in",
            "class_year",
            "games_played",
            "games_scored",
        ] {
            assert!(value.get(column).is_some(), "missing column {column}");
        }
        assert!(value["games_scored"].is_null());

        let back: Player = serde_json::from_value(value).unwrap();
        assert_eq!(back, player);
    }
}
