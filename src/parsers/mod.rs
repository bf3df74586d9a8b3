//! Field parsers: one raw cell in, one typed value out.
//!
//! These are pure functions. Record assembly and fallback policy live in
//! [`crate::services::normalizer`].

mod roster;
mod schedule;

pub use roster::{
    parse_class_year, parse_count, parse_height, parse_stat_value, split_player_name,
};
pub use schedule::{
    ParsedResult, parse_attendance, parse_game_date, parse_game_datetime, parse_game_time,
    parse_opponent_and_home, parse_result, season_label,
};
