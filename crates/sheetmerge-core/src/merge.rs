//! Table merger: concatenate normalized tables under one combined header

use crate::table::Table;
use serde_json::Value;

/// Result of merging a sequence of tables
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The combined table
    pub table: Table,
    /// Total number of data rows contributed by the inputs
    pub rows_merged: usize,
}

/// Merge pre-normalized tables in input order.
///
/// The header of the first non-empty input wins; later tables are assumed
/// pre-normalized to a comparable shape, and their rows are padded or
/// truncated to that header's width. Rows are concatenated strictly in input
/// order with no sorting, dedup, or conflict resolution. If every input is
/// empty, the outcome is the empty table.
pub fn merge_tables(tables: Vec<Table>) -> MergeOutcome {
    let header = tables
        .iter()
        .find(|t| !t.is_empty())
        .map(|t| t.header.clone())
        .unwrap_or_default();

    if header.is_empty() {
        return MergeOutcome {
            table: Table::empty(),
            rows_merged: 0,
        };
    }

    let width = header.len();
    let mut rows = Vec::new();
    for table in tables {
        for mut row in table.rows {
            row.cells.resize(width, String::new());
            rows.push(row);
        }
    }

    let rows_merged = rows.len();
    MergeOutcome {
        table: Table::new(header, rows),
        rows_merged,
    }
}

/// Merge at the record level: concatenate each input's record sequence in
/// input order. Normalizing the combined sequence afterwards is what gives
/// a multi-file load its union header.
pub fn merge_records(record_sets: Vec<Vec<Value>>) -> Vec<Value> {
    record_sets.into_iter().flatten().collect()
}
