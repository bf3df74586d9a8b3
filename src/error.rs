// src/error.rs

//! Unified error handling for the season cache.

use std::fmt;

use thiserror::Error;

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure to turn a single raw cell into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The cell text matches none of the known patterns for the field
    #[error("unrecognized {field} '{raw}'")]
    Format { field: &'static str, raw: String },

    /// The scraper reported the cell as not present
    #[error("cell '{column}' not present")]
    MissingCell { column: String },
}

impl ParseError {
    /// Create a format error for a field.
    pub fn format(field: &'static str, raw: impl Into<String>) -> Self {
        Self::Format {
            field,
            raw: raw.into(),
        }
    }

    /// Create a missing-cell error for a column.
    pub fn missing(column: impl Into<String>) -> Self {
        Self::MissingCell {
            column: column.into(),
        }
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Cached games cannot be compared against a date
    #[error("Cannot decide staleness for {0}: no cached game dates")]
    StaleCacheDecision(String),

    /// The scraper failed to produce a table
    #[error("Fetch error for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let e = ParseError::format("height", "six-ten");
        assert_eq!(e.to_string(), "unrecognized height 'six-ten'");

        let e = ParseError::missing("opponent");
        assert_eq!(e.to_string(), "cell 'opponent' not present");
    }
}
