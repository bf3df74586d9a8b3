// src/services/normalizer.rs

//! Record normalizer.
//!
//! Turns one scraped row into one typed record. Non-key cells that are absent
//! or malformed become [`Field::Unknown`] and are reported as [`FieldIssue`]s;
//! a missing or malformed key cell rejects only that row.

use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::models::{Cell, Field, Game, Player, RawRow, StatLine, StatValue};
use crate::parsers::{
    parse_attendance, parse_class_year, parse_count, parse_game_date, parse_game_time, parse_height,
    parse_opponent_and_home, parse_result, parse_stat_value, split_player_name,
};

/// Column names used by the scraper.
pub mod columns {
    pub const DATE: &str = "date";
    pub const OPPONENT: &str = "opponent";
    pub const RESULT: &str = "result";
    pub const ATTENDANCE: &str = "attendance";

    pub const JERSEY: &str = "jersey";
    pub const PLAYER: &str = "player";
    pub const POSITION: &str = "position";
    pub const HEIGHT: &str = "height";
    pub const CLASS_YEAR: &str = "year";
    pub const GAMES_PLAYED: &str = "games_played";
    pub const GAMES_SCORED: &str = "games_scored";

    /// Stats-table spellings of height and class year
    pub const STATS_HEIGHT: &str = "ht";
    pub const STATS_CLASS_YEAR: &str = "yr";
    /// Derived ordinal class year added next to `yr`
    pub const STATS_CLASS_ORDINAL: &str = "class_year";
}

/// A non-fatal problem with one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub column: String,
    pub error: ParseError,
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Position of the row in the scraped table
    pub index: usize,
    pub error: ParseError,
}

/// One normalized record and the cells that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub record: T,
    pub issues: Vec<FieldIssue>,
}

/// A whole table's worth of normalized rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub records: Vec<T>,
    /// `(row index, issue)` for every unreadable non-key cell
    pub issues: Vec<(usize, FieldIssue)>,
    pub rejected: Vec<RowError>,
}

impl<T> Batch<T> {
    /// Normalize every row, keeping going past bad ones.
    pub fn from_rows(
        rows: &[RawRow],
        normalize: impl Fn(&RawRow) -> Result<Normalized<T>, ParseError>,
    ) -> Self {
        let mut batch = Batch {
            records: Vec::with_capacity(rows.len()),
            issues: Vec::new(),
            rejected: Vec::new(),
        };

        for (index, row) in rows.iter().enumerate() {
            match normalize(row) {
                Ok(Normalized { record, issues }) => {
                    for issue in issues {
                        log::debug!("Row {}: {}: {}", index, issue.column, issue.error);
                        batch.issues.push((index, issue));
                    }
                    batch.records.push(record);
                }
                Err(error) => {
                    log::warn!("Row {} rejected: {}", index, error);
                    batch.rejected.push(RowError { index, error });
                }
            }
        }

        batch
    }

    /// Separate the records from what went wrong producing them.
    pub fn split(self, table: impl Into<String>) -> (Vec<T>, TableReport) {
        let report = TableReport {
            table: table.into(),
            records: self.records.len(),
            issues: self.issues,
            rejected: self.rejected,
        };
        (self.records, report)
    }
}

/// Per-table outcome of an ingestion, kept after the records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub records: usize,
    pub issues: Vec<(usize, FieldIssue)>,
    pub rejected: Vec<RowError>,
}

/// Reads cells from one row and collects the issues along the way.
struct CellReader<'a> {
    row: &'a RawRow,
    issues: Vec<FieldIssue>,
}

impl<'a> CellReader<'a> {
    fn new(row: &'a RawRow) -> Self {
        Self {
            row,
            issues: Vec::new(),
        }
    }

    /// A key cell; absence or a parse failure rejects the row.
    fn required<T>(
        &self,
        column: &str,
        parse: impl FnOnce(&str) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        match self.row.get(column) {
            Cell::Present(text) => parse(text),
            Cell::Absent => Err(ParseError::missing(column)),
        }
    }

    /// A cell whose text, blank included, is handed to `parse`.
    fn field<T>(
        &mut self,
        column: &str,
        parse: impl FnOnce(&str) -> Result<T, ParseError>,
    ) -> Field<T> {
        match self.row.get(column) {
            Cell::Present(text) => self.record(column, parse(text)),
            Cell::Absent => {
                self.issue(column, ParseError::missing(column));
                Field::Unknown
            }
        }
    }

    /// Like [`field`](Self::field), but a blank cell is simply unknown.
    fn optional<T>(
        &mut self,
        column: &str,
        parse: impl FnOnce(&str) -> Result<T, ParseError>,
    ) -> Field<T> {
        match self.row.get(column) {
            Cell::Present(text) if text.trim().is_empty() => Field::Unknown,
            _ => self.field(column, parse),
        }
    }

    fn record<T>(&mut self, column: &str, parsed: Result<T, ParseError>) -> Field<T> {
        match parsed {
            Ok(value) => Field::Known(value),
            Err(error) => {
                self.issue(column, error);
                Field::Unknown
            }
        }
    }

    fn issue(&mut self, column: &str, error: ParseError) {
        self.issues.push(FieldIssue {
            column: column.to_string(),
            error,
        });
    }

    fn finish<T>(self, record: T) -> Normalized<T> {
        Normalized {
            record,
            issues: self.issues,
        }
    }
}

fn text(raw: &str) -> Result<String, ParseError> {
    Ok(raw.trim().to_string())
}

fn player_key(raw: &str) -> Result<String, ParseError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ParseError::format("player", raw));
    }
    Ok(name.to_string())
}

/// Normalize one schedule/results row.
pub fn normalize_game(row: &RawRow) -> Result<Normalized<Game>, ParseError> {
    let mut cells = CellReader::new(row);
    let date = cells.required(columns::DATE, parse_game_date)?;
    // An unreadable clock time leaves the game date-only.
    let time = match cells.required(columns::DATE, parse_game_time) {
        Ok(time) => time,
        Err(error) => {
            cells.issue(columns::DATE, error);
            None
        }
    };

    let opponent = cells.optional(columns::OPPONENT, |raw| Ok(parse_opponent_and_home(raw)));
    let (opponent, is_home) = match opponent {
        Field::Known((name, home)) => (Field::Known(name), Field::Known(home)),
        Field::Unknown => (Field::Unknown, Field::Unknown),
    };

    let result = cells.field(columns::RESULT, |raw| {
        parse_result(raw).map(|parsed| parsed.game_result())
    });
    let attendance = cells.optional(columns::ATTENDANCE, parse_attendance);

    Ok(cells.finish(Game {
        date,
        time,
        opponent,
        is_home,
        result,
        attendance,
    }))
}

/// Normalize one roster row.
pub fn normalize_player(row: &RawRow) -> Result<Normalized<Player>, ParseError> {
    let mut cells = CellReader::new(row);
    let name = split_player_name(&cells.required(columns::PLAYER, player_key)?);

    let jersey = cells.optional(columns::JERSEY, text);
    let position = cells.optional(columns::POSITION, text);
    let height_in = cells.field(columns::HEIGHT, parse_height);
    let class_year = cells.field(columns::CLASS_YEAR, |raw| Ok(parse_class_year(raw)));
    let games_played = cells.optional(columns::GAMES_PLAYED, |raw| {
        parse_count(columns::GAMES_PLAYED, raw)
    });
    let games_scored = cells.optional(columns::GAMES_SCORED, |raw| {
        parse_count(columns::GAMES_SCORED, raw)
    });

    Ok(cells.finish(Player {
        jersey,
        name,
        position,
        height_in,
        class_year,
        games_played,
        games_scored,
    }))
}

/// Normalize one stats row (season totals or a single game's box score).
///
/// Every column except `player` is kept; `ht` becomes inches and `yr` gains
/// an ordinal `class_year` companion.
pub fn normalize_stat_line(row: &RawRow) -> Result<Normalized<StatLine>, ParseError> {
    let mut cells = CellReader::new(row);
    let player = cells.required(columns::PLAYER, player_key)?;

    let mut values = BTreeMap::new();
    for column in row.columns().filter(|c| *c != columns::PLAYER) {
        let cell = row.get(column);
        let value = match column {
            columns::STATS_HEIGHT => match cell.non_blank() {
                Some(raw) => match parse_height(raw) {
                    Ok(inches) => StatValue::Number(f64::from(inches)),
                    Err(error) => {
                        cells.issue(column, error);
                        StatValue::Missing
                    }
                },
                None => StatValue::Missing,
            },
            columns::STATS_CLASS_YEAR => {
                let ordinal = match cell.non_blank() {
                    Some(raw) => StatValue::Number(f64::from(parse_class_year(raw))),
                    None => StatValue::Missing,
                };
                values.insert(columns::STATS_CLASS_ORDINAL.to_string(), ordinal);
                parse_stat_value(cell.text())
            }
            _ => parse_stat_value(cell.text()),
        };
        values.insert(column.to_string(), value);
    }

    Ok(cells.finish(StatLine { player, values }))
}

/// Normalize a scraped schedule.
pub fn normalize_games(rows: &[RawRow]) -> Batch<Game> {
    Batch::from_rows(rows, normalize_game)
}

/// Normalize a scraped roster.
pub fn normalize_roster(rows: &[RawRow]) -> Batch<Player> {
    Batch::from_rows(rows, normalize_player)
}

/// Normalize a scraped stats or box score table.
pub fn normalize_stats(rows: &[RawRow]) -> Batch<StatLine> {
    Batch::from_rows(rows, normalize_stat_line)
}
