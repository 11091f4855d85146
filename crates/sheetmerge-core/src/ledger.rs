//! Row ledger: reconciled original/added/deleted/remaining counts
//!
//! The ledger stores only the baseline row count. Every observation re-derives
//! the four user-facing counters from the current row-origin census, never
//! from incrementally maintained counters, so a missed update site cannot
//! make the numbers drift.

use crate::table::{RowOrigin, Table};
use serde::{Deserialize, Serialize};

/// The four counters surfaced after every table mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    /// Rows currently in the table
    pub remaining: usize,
    /// Rows present when the baseline was established
    pub original: usize,
    /// Rows appended by the user since the baseline
    pub added: usize,
    /// Original rows no longer present
    pub deleted: usize,
}

/// Change-tracking state for one table lifetime
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RowLedger {
    baseline: usize,
}

impl RowLedger {
    /// Create a ledger with a zero baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// The original-row count recorded at the last baseline event
    pub fn baseline(&self) -> usize {
        self.baseline
    }

    /// Record the current table as the baseline: every row is re-marked as
    /// original and the baseline becomes the row count. Called on load,
    /// merge, blank-table creation, and clear.
    pub fn establish_baseline(&mut self, table: &mut Table) {
        for row in &mut table.rows {
            row.origin = RowOrigin::Original;
        }
        self.baseline = table.row_count();
    }

    /// Derive the four counters from the current table contents.
    ///
    /// `deleted` is clamped at zero, and for every reachable state
    /// `remaining == added + (original - deleted)` holds.
    pub fn observe(&self, table: &Table) -> RowCounts {
        let remaining = table.row_count();
        let added = table
            .rows
            .iter()
            .filter(|r| r.origin == RowOrigin::Added)
            .count();
        let original_remaining = remaining - added;

        RowCounts {
            remaining,
            original: self.baseline,
            added,
            deleted: self.baseline.saturating_sub(original_remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowOrigin;

    fn assert_reconciled(counts: &RowCounts) {
        assert_eq!(
            counts.remaining,
            counts.added + (counts.original - counts.deleted)
        );
        assert!(counts.deleted <= counts.original);
    }

    #[test]
    fn test_baseline_marks_all_rows_original() {
        let mut table = Table::blank(2, 3);
        table.push_added_row();

        let mut ledger = RowLedger::new();
        ledger.establish_baseline(&mut table);

        assert_eq!(ledger.baseline(), 4);
        assert!(table.rows.iter().all(|r| r.origin == RowOrigin::Original));
    }

    #[test]
    fn test_add_then_delete_originals() {
        // Baseline of 5, add 2, remove 3 originals: {4, 5, 2, 3}
        let mut table = Table::blank(2, 5);
        let mut ledger = RowLedger::new();
        ledger.establish_baseline(&mut table);

        table.push_added_row();
        table.push_added_row();

        let mut removed = 0;
        table.rows.retain(|r| {
            if r.origin == RowOrigin::Original && removed < 3 {
                removed += 1;
                false
            } else {
                true
            }
        });

        let counts = ledger.observe(&table);
        assert_eq!(counts.remaining, 4);
        assert_eq!(counts.original, 5);
        assert_eq!(counts.added, 2);
        assert_eq!(counts.deleted, 3);
        assert_reconciled(&counts);
    }

    #[test]
    fn test_removing_added_rows_does_not_count_as_deleted() {
        let mut table = Table::blank(1, 2);
        let mut ledger = RowLedger::new();
        ledger.establish_baseline(&mut table);

        table.push_added_row();
        table.rows.retain(|r| r.origin == RowOrigin::Original);

        let counts = ledger.observe(&table);
        assert_eq!(counts.added, 0);
        assert_eq!(counts.deleted, 0);
        assert_eq!(counts.remaining, 2);
        assert_reconciled(&counts);
    }

    #[test]
    fn test_reconciliation_holds_across_edit_sequence() {
        let mut table = Table::blank(2, 4);
        let mut ledger = RowLedger::new();
        ledger.establish_baseline(&mut table);
        assert_reconciled(&ledger.observe(&table));

        table.push_added_row();
        assert_reconciled(&ledger.observe(&table));

        table.rows.remove(0);
        assert_reconciled(&ledger.observe(&table));

        table.push_added_row();
        table.rows.remove(0);
        table.rows.remove(0);
        assert_reconciled(&ledger.observe(&table));

        // Remove everything
        table.rows.clear();
        let counts = ledger.observe(&table);
        assert_eq!(counts.remaining, 0);
        assert_eq!(counts.deleted, 4);
        assert_reconciled(&counts);
    }

    #[test]
    fn test_rebaseline_resets_counts() {
        let mut table = Table::blank(1, 3);
        let mut ledger = RowLedger::new();
        ledger.establish_baseline(&mut table);

        table.push_added_row();
        table.rows.remove(0);

        ledger.establish_baseline(&mut table);
        let counts = ledger.observe(&table);
        assert_eq!(counts.original, 3);
        assert_eq!(counts.added, 0);
        assert_eq!(counts.deleted, 0);
        assert_reconciled(&counts);
    }

    #[test]
    fn test_empty_baseline() {
        let mut table = Table::empty();
        let mut ledger = RowLedger::new();
        ledger.establish_baseline(&mut table);

        let counts = ledger.observe(&table);
        assert_eq!(
            counts,
            RowCounts {
                remaining: 0,
                original: 0,
                added: 0,
                deleted: 0
            }
        );
    }
}
