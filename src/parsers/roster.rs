//! Parsers for roster and stats cells.

use crate::error::ParseError;
use crate::models::{PlayerName, StatValue};

/// Parse `"<feet>-<inches>"` into total inches; `"0"` is the site's
/// "no height on file" value and maps to 0.
pub fn parse_height(raw: &str) -> Result<u32, ParseError> {
    let text = raw.trim();
    if text == "0" {
        return Ok(0);
    }

    let (feet, inches) = text
        .split_once('-')
        .ok_or_else(|| ParseError::format("height", raw))?;
    let feet: u32 = feet
        .trim()
        .parse()
        .map_err(|_| ParseError::format("height", raw))?;
    let inches: u32 = inches
        .trim()
        .parse()
        .map_err(|_| ParseError::format("height", raw))?;

    feet.checked_mul(12)
        .and_then(|f| f.checked_add(inches))
        .ok_or_else(|| ParseError::format("height", raw))
}

/// Map a class-year token to 1-4; every other token, including graduate
/// students and blanks, is 5.
pub fn parse_class_year(raw: &str) -> u8 {
    match raw.trim().to_ascii_lowercase().as_str() {
        "fr" => 1,
        "so" => 2,
        "jr" => 3,
        "sr" => 4,
        _ => 5,
    }
}

/// Split `"Last, First"` (or `"First Last"` when there is no comma).
pub fn split_player_name(raw: &str) -> PlayerName {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let (first, last) = match text.split_once(',') {
        Some((last, first)) => (first.trim(), last.trim()),
        None => match text.rsplit_once(' ') {
            Some((first, last)) => (first, last),
            None => ("", text.as_str()),
        },
    };

    PlayerName {
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

/// Parse a non-negative count such as games played.
pub fn parse_count(field: &'static str, raw: &str) -> Result<u32, ParseError> {
    raw.trim()
        .replace(',', "")
        .parse()
        .map_err(|_| ParseError::format(field, raw))
}

/// Type a free-form stats cell: number when it reads as one, text otherwise.
pub fn parse_stat_value(raw: Option<&str>) -> StatValue {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return StatValue::Missing;
    };

    match text.replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() => StatValue::Number(n),
        _ => StatValue::Text(text.to_string()),
    }
}
