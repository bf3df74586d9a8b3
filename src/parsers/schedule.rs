//! Parsers for schedule/results cells.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::error::ParseError;
use crate::models::GameResult;

/// Poll rank in front of a team name, e.g. `"#3 "`.
static RANK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\d+\s+").expect("rank marker pattern is valid"));

/// Parse `"MM/DD/YYYY"` with an optional `"H:MM AM|PM"` or `"TBA"` after it.
pub fn parse_game_datetime(raw: &str) -> Result<(NaiveDate, Option<NaiveTime>), ParseError> {
    Ok((parse_game_date(raw)?, parse_game_time(raw)?))
}

/// The `"MM/DD/YYYY"` part of a date cell.
pub fn parse_game_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let date_part = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::format("date", raw))?;
    NaiveDate::parse_from_str(date_part, "%m/%d/%Y")
        .map_err(|_| ParseError::format("date", raw))
}

/// The clock time after the date; `None` when absent or `"TBA"`.
pub fn parse_game_time(raw: &str) -> Result<Option<NaiveTime>, ParseError> {
    let rest = raw.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    if rest.is_empty() || rest.eq_ignore_ascii_case("TBA") {
        return Ok(None);
    }

    NaiveTime::parse_from_str(&rest, "%I:%M %p")
        .map(Some)
        .map_err(|_| ParseError::format("time", raw))
}

/// Split an opponent cell into the cleaned name and whether the game is at home.
///
/// `"@Duke"` and `"Duke @Durham"` are both away games against Duke.
pub fn parse_opponent_and_home(raw: &str) -> (String, bool) {
    let text = strip_rank(raw.trim());

    match text.split_once('@') {
        Some((before, after)) => {
            let before = before.trim();
            let name = if before.is_empty() { after.trim() } else { before };
            (strip_rank(name).trim().to_string(), false)
        }
        None => (text.trim().to_string(), true),
    }
}

fn strip_rank(text: &str) -> &str {
    match RANK_MARKER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Parsed form of a result cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResult {
    /// `"W"`, `"L"`, or empty for a game without a result
    pub label: String,
    pub win: Option<bool>,
    pub team_score: Option<u32>,
    pub opp_score: Option<u32>,
}

impl ParsedResult {
    /// The typed result, `None` for a game not played yet.
    pub fn game_result(&self) -> Option<GameResult> {
        Some(GameResult {
            win: self.win?,
            team_score: self.team_score?,
            opp_score: self.opp_score?,
        })
    }
}

/// Parse `"W 78-65"` / `"L 65-78"`. Anything without a W/L token is an
/// unplayed game and yields an empty result.
pub fn parse_result(raw: &str) -> Result<ParsedResult, ParseError> {
    let mut tokens = raw.split_whitespace();
    let win = match tokens.next() {
        Some(t) if t.eq_ignore_ascii_case("W") => true,
        Some(t) if t.eq_ignore_ascii_case("L") => false,
        _ => return Ok(ParsedResult::default()),
    };

    let score = tokens.next().ok_or_else(|| ParseError::format("result", raw))?;
    let (team, opp) = score
        .split_once('-')
        .ok_or_else(|| ParseError::format("result", raw))?;
    let team_score = team
        .parse::<u32>()
        .map_err(|_| ParseError::format("result", raw))?;
    let opp_score = opp
        .parse::<u32>()
        .map_err(|_| ParseError::format("result", raw))?;

    Ok(ParsedResult {
        label: (if win { "W" } else { "L" }).to_string(),
        win: Some(win),
        team_score: Some(team_score),
        opp_score: Some(opp_score),
    })
}

/// Parse an attendance figure such as `"9,314"`.
pub fn parse_attendance(raw: &str) -> Result<u32, ParseError> {
    raw.trim()
        .replace(',', "")
        .parse()
        .map_err(|_| ParseError::format("attendance", raw))
}

/// Site naming for a season starting in `year`: 2023 is `"2023-24"`.
pub fn season_label(year: i32) -> String {
    format!("{}-{:02}", year, (year + 1).rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_datetime_with_time() {
        let (date, time) = parse_game_datetime("11/06/2023 7:00 PM").unwrap();
        assert_eq!(date, ymd(2023, 11, 6));
        assert_eq!(time, NaiveTime::from_hms_opt(19, 0, 0));

        let (_, time) = parse_game_datetime("01/13/2024 12:30 AM").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(0, 30, 0));
    }

    #[test]
    fn test_datetime_date_only_and_tba() {
        assert_eq!(
            parse_game_datetime("03/09/2024").unwrap(),
            (ymd(2024, 3, 9), None)
        );
        assert_eq!(
            parse_game_datetime("03/09/2024 TBA").unwrap(),
            (ymd(2024, 3, 9), None)
        );
    }

    #[test]
    fn test_datetime_round_trips_date() {
        for date in [ymd(2023, 11, 6), ymd(2024, 2, 29), ymd(2024, 12, 31)] {
            let raw = date.format("%m/%d/%Y").to_string();
            assert_eq!(parse_game_datetime(&raw).unwrap().0, date);
            let raw_timed = format!("{raw} 9:15 AM");
            assert_eq!(parse_game_datetime(&raw_timed).unwrap().0, date);
        }
    }

    #[test]
    fn test_datetime_rejects_bad_input() {
        assert!(matches!(
            parse_game_datetime("13/45/2023"),
            Err(ParseError::Format { field: "date", .. })
        ));
        assert!(parse_game_datetime("").is_err());
        assert!(matches!(
            parse_game_datetime("11/06/2023 noonish"),
            Err(ParseError::Format { field: "time", .. })
        ));
    }

    #[test]
    fn test_time_parsed_apart_from_date() {
        assert_eq!(
            parse_game_date("11/06/2023 7:00 PM ET"),
            Ok(NaiveDate::from_ymd_opt(2023, 11, 6).unwrap())
        );
        assert!(matches!(
            parse_game_time("11/06/2023 7:00 PM ET"),
            Err(ParseError::Format { field: "time", .. })
        ));
        assert_eq!(parse_game_time("11/06/2023 TBA"), Ok(None));
    }

    #[test]
    fn test_opponent_and_home() {
        assert_eq!(parse_opponent_and_home("@Duke"), ("Duke".into(), false));
        assert_eq!(
            parse_opponent_and_home("Duke @Durham"),
            ("Duke".into(), false)
        );
        assert_eq!(parse_opponent_and_home("#3 Duke"), ("Duke".into(), true));
        assert_eq!(
            parse_opponent_and_home("  North Carolina  "),
            ("North Carolina".into(), true)
        );
        assert_eq!(
            parse_opponent_and_home("#12 Michigan St. @Indianapolis, IN"),
            ("Michigan St.".into(), false)
        );
        assert_eq!(
            parse_opponent_and_home("@ #5 Kansas"),
            ("Kansas".into(), false)
        );
    }

    #[test]
    fn test_result_win_and_loss() {
        let win = parse_result("W 78-65").unwrap();
        assert_eq!(win.label, "W");
        assert_eq!(win.win, Some(true));
        assert_eq!((win.team_score, win.opp_score), (Some(78), Some(65)));

        let loss = parse_result("L 65-78 (OT)").unwrap();
        assert_eq!(loss.win, Some(false));
        assert_eq!((loss.team_score, loss.opp_score), (Some(65), Some(78)));
        assert_eq!(
            loss.game_result(),
            Some(GameResult {
                win: false,
                team_score: 65,
                opp_score: 78
            })
        );
    }

    #[test]
    fn test_result_unplayed_is_empty() {
        assert_eq!(parse_result("").unwrap(), ParsedResult::default());
        assert_eq!(parse_result("Canceled").unwrap(), ParsedResult::default());
        assert_eq!(parse_result("").unwrap().game_result(), None);
    }

    #[test]
    fn test_result_rejects_malformed_score() {
        assert!(parse_result("W").is_err());
        assert!(parse_result("W 78").is_err());
        assert!(parse_result("L 65--78").is_err());
    }

    #[test]
    fn test_attendance() {
        assert_eq!(parse_attendance("9,314"), Ok(9314));
        assert_eq!(parse_attendance(" 512 "), Ok(512));
        assert!(parse_attendance("sold out").is_err());
    }

    #[test]
    fn test_season_label() {
        assert_eq!(season_label(2023), "2023-24");
        assert_eq!(season_label(2009), "2009-10");
        assert_eq!(season_label(1999), "1999-00");
    }
}
