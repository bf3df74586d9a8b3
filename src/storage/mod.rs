//! Storage abstractions for cached team-year tables.
//!
//! Tables are keyed by `(team, year, table name)` and always replaced
//! wholesale.
//!
//! ## Directory Structure
//!
//! ```text
//! seasons/
//! └── 2023/
//!     └── Duke/
//!         ├── games.json          # schedule and results
//!         ├── roster.json
//!         ├── stats.json
//!         └── games/
//!             └── North Carolina.json   # UNC's box score vs Duke
//! ```
//!
//! A single process is assumed to own the directory; two processes
//! refreshing the same team-year race and the last writer wins.

pub mod local;
pub mod memory;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::utils::fs::path_segment;

// Re-export for convenience
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Which table of a team-year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableName {
    Games,
    Roster,
    Stats,
    /// The opponent's box score in the game against this team
    GameStats { opponent: String },
}

/// Address of one persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub team: String,
    pub year: i32,
    pub table: TableName,
}

impl TableKey {
    pub fn new(team: impl Into<String>, year: i32, table: TableName) -> Self {
        Self {
            team: team.into(),
            year,
            table,
        }
    }

    pub fn games(team: &str, year: i32) -> Self {
        Self::new(team, year, TableName::Games)
    }

    pub fn roster(team: &str, year: i32) -> Self {
        Self::new(team, year, TableName::Roster)
    }

    pub fn stats(team: &str, year: i32) -> Self {
        Self::new(team, year, TableName::Stats)
    }

    /// `opponent`'s box score, filed under `team`.
    pub fn game_stats(team: &str, opponent: &str, year: i32) -> Self {
        Self::new(
            team,
            year,
            TableName::GameStats {
                opponent: opponent.to_string(),
            },
        )
    }

    /// Location relative to the store root.
    pub fn relative_path(&self) -> PathBuf {
        let dir = PathBuf::from(self.year.to_string()).join(path_segment(&self.team));
        match &self.table {
            TableName::Games => dir.join("games.json"),
            TableName::Roster => dir.join("roster.json"),
            TableName::Stats => dir.join("stats.json"),
            TableName::GameStats { opponent } => dir
                .join("games")
                .join(format!("{}.json", path_segment(opponent))),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            TableName::Games => write!(f, "{}/{}/games", self.year, self.team),
            TableName::Roster => write!(f, "{}/{}/roster", self.year, self.team),
            TableName::Stats => write!(f, "{}/{}/stats", self.year, self.team),
            TableName::GameStats { opponent } => {
                write!(f, "{}/{}/games/{}", self.year, self.team, opponent)
            }
        }
    }
}

/// Rows of one table, each a column-name to value object.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Map<String, Value>>,
}

impl Table {
    /// Serialize typed records into rows.
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self> {
        let rows = records
            .iter()
            .map(|record| -> Result<Map<String, Value>> {
                match serde_json::to_value(record)? {
                    Value::Object(row) => Ok(row),
                    other => Err(AppError::validation(format!(
                        "record is not a table row: {other}"
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Deserialize rows back into typed records.
    pub fn to_records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows
            .iter()
            .map(|row| -> Result<T> { Ok(serde_json::from_value(Value::Object(row.clone()))?) })
            .collect()
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for table storage backends.
#[async_trait]
pub trait Store: Send + Sync {
    /// Whether the table has been written before.
    async fn exists(&self, key: &TableKey) -> Result<bool>;

    /// Read a table, `None` if it was never written.
    async fn read(&self, key: &TableKey) -> Result<Option<Table>>;

    /// Replace one table.
    async fn write(&self, key: &TableKey, table: &Table) -> Result<()>;

    /// Replace several tables together: either all of them change or none.
    async fn write_all(&self, tables: &[(TableKey, Table)]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, Player, PlayerName};
    use std::path::Path;

    #[test]
    fn test_relative_paths() {
        assert_eq!(
            TableKey::games("Duke", 2023).relative_path(),
            Path::new("2023/Duke/games.json")
        );
        assert_eq!(
            TableKey::game_stats("Duke", "North Carolina", 2023).relative_path(),
            Path::new("2023/Duke/games/North Carolina.json")
        );
        assert_eq!(
            TableKey::roster("../Duke", 2023).relative_path(),
            Path::new("2023/_Duke/roster.json")
        );
    }

    #[test]
    fn test_table_records() {
        let players = vec![Player {
            jersey: Field::Known("0".into()),
            name: PlayerName {
                first_name: "Jared".into(),
                last_name: "McCain".into(),
            },
            position: Field::Known("G".into()),
            height_in: Field::Known(75),
            class_year: Field::Known(1),
            games_played: Field::Unknown,
            games_scored: Field::Unknown,
        }];

        let table = Table::from_records(&players).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0]["last_name"], "McCain");

        let back: Vec<Player> = table.to_records().unwrap();
        assert_eq!(back, players);
    }

    #[test]
    fn test_non_object_records_rejected() {
        assert!(Table::from_records(&[1, 2, 3]).is_err());
    }
}
