//! Raw column table handed over by the surrounding application.
//!
//! The file/UI layer parses Excel/CSV into a column-oriented table with
//! best-effort captions; this type is that data contract. Column order is
//! preserved so downstream tie-breaking stays deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single raw cell as delivered by the upstream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Number(f64),
    Text(String),
    Empty,
}

impl RawCell {
    /// Trimmed text content, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            Self::Number(_) | Self::Empty => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for RawCell {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// Column-oriented raw table with stable column order.
///
/// Every column holds exactly `rows` cells; short columns are padded with
/// [`RawCell::Empty`] on insertion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    columns: IndexMap<String, Vec<RawCell>>,
    rows: usize,
}

impl RawTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    /// Insert a column, padding it (and all existing columns) to the
    /// common row count. A repeated caption replaces the earlier column.
    pub fn insert_column(&mut self, caption: impl Into<String>, cells: Vec<RawCell>) {
        self.rows = self.rows.max(cells.len());
        self.columns.insert(caption.into(), cells);
        for column in self.columns.values_mut() {
            column.resize(self.rows, RawCell::Empty);
        }
    }

    /// Look up a column by its raw caption.
    #[must_use]
    pub fn column(&self, caption: &str) -> Option<&[RawCell]> {
        self.columns.get(caption).map(Vec::as_slice)
    }

    /// Raw captions in input order.
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate `(caption, cells)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawCell])> {
        self.columns
            .iter()
            .map(|(caption, cells)| (caption.as_str(), cells.as_slice()))
    }
}
