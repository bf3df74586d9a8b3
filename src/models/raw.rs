//! Raw scraped rows as handed over by the scraper.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One cell lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    /// The cell exists; its text may still be empty
    Present(&'a str),
    /// The scraper could not find the cell
    Absent,
}

impl<'a> Cell<'a> {
    /// Text of a present cell, `None` when absent.
    pub fn text(self) -> Option<&'a str> {
        match self {
            Cell::Present(s) => Some(s),
            Cell::Absent => None,
        }
    }

    /// Present and non-blank text.
    pub fn non_blank(self) -> Option<&'a str> {
        self.text().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// A scraped table row: column name to cell text.
///
/// A `None` value and a missing key both mean "not present".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: BTreeMap<String, Option<String>>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present cell.
    pub fn with(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.cells.insert(column.into(), Some(text.into()));
        self
    }

    /// Record a cell the scraper could not find.
    pub fn with_absent(mut self, column: impl Into<String>) -> Self {
        self.cells.insert(column.into(), None);
        self
    }

    /// Look a cell up by column name.
    pub fn get(&self, column: &str) -> Cell<'_> {
        match self.cells.get(column) {
            Some(Some(text)) => Cell::Present(text),
            _ => Cell::Absent,
        }
    }

    /// Column names in this row, including absent ones.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_vs_empty() {
        let row = RawRow::new().with("result", "").with_absent("attendance");

        assert_eq!(row.get("result"), Cell::Present(""));
        assert_eq!(row.get("result").non_blank(), None);
        assert_eq!(row.get("attendance"), Cell::Absent);
        assert_eq!(row.get("nope"), Cell::Absent);
    }

    #[test]
    fn test_deserialize_capture() {
        let json = r#"{"date": "11/06/2023", "opponent": "@Duke", "result": null}"#;
        let row: RawRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.get("date").text(), Some("11/06/2023"));
        assert_eq!(row.get("result"), Cell::Absent);
        assert_eq!(row.len(), 3);
    }
}
