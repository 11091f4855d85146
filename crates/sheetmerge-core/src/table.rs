//! Core table types for the in-memory spreadsheet model

use serde::{Deserialize, Serialize};

/// Whether a row was present when the current baseline was established
/// or appended by explicit user insertion afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrigin {
    /// Present at the last baseline-establishing event
    Original,
    /// Appended by the user after the baseline
    Added,
}

/// A row of cell text, aligned 1:1 with the table header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cell values; length always equals the header length
    pub cells: Vec<String>,
    /// Category attached at row-creation time
    pub origin: RowOrigin,
}

impl Row {
    /// Create a row marked as original
    pub fn original(cells: Vec<String>) -> Self {
        Self {
            cells,
            origin: RowOrigin::Original,
        }
    }

    /// Create a row marked as added
    pub fn added(cells: Vec<String>) -> Self {
        Self {
            cells,
            origin: RowOrigin::Added,
        }
    }
}

/// A rectangular table: an ordered header plus data rows.
///
/// Rows are only ever appended or removed, never reordered. The header is
/// fixed once the table is built; it changes only by full table replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Ordered column names, unique within the header
    pub header: Vec<String>,
    /// Data rows
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from a header and rows
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// The empty table: no header, no rows. This is the placeholder state,
    /// distinct from a table with a header and zero rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a blank table with `cols` generated column names and `rows`
    /// all-empty original rows.
    pub fn blank(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let header = (1..=cols).map(|i| format!("Column {i}")).collect();
        let rows = (0..rows)
            .map(|_| Row::original(vec![String::new(); cols]))
            .collect();
        Self { header, rows }
    }

    /// True when the table has no header (and therefore no rows)
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append a blank row marked as added
    pub fn push_added_row(&mut self) {
        self.rows
            .push(Row::added(vec![String::new(); self.header.len()]));
    }

    /// Drop the header and all rows, returning to the placeholder state
    pub fn clear(&mut self) {
        self.header.clear();
        self.rows.clear();
    }
}
