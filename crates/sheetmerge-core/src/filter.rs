//! Keyword-based row filtering
//!
//! A row matches when the trimmed, case-folded keyword occurs anywhere in the
//! concatenation of its cell text. Cells are joined with no separator, so a
//! keyword can match across a cell boundary; this mirrors how the original
//! table text reads as one run and guarantees no cross-cell false negatives.

use crate::table::{Row, Table};

/// What to do with rows that match the keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Remove matching rows
    Delete,
    /// Remove non-matching rows, keeping only matches
    Keep,
}

/// Trim and case-fold a keyword; an empty result means "no-op".
fn fold_keyword(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn row_matches(row: &Row, needle: &str) -> bool {
    row.cells.concat().to_lowercase().contains(needle)
}

fn row_doomed(row: &Row, needle: &str, mode: FilterMode) -> bool {
    match mode {
        FilterMode::Delete => row_matches(row, needle),
        FilterMode::Keep => !row_matches(row, needle),
    }
}

/// Count the rows a delete/keep operation would remove, without mutating.
pub fn preview_filter(table: &Table, keyword: &str, mode: FilterMode) -> usize {
    match fold_keyword(keyword) {
        Some(needle) => table
            .rows
            .iter()
            .filter(|row| row_doomed(row, &needle, mode))
            .count(),
        None => 0,
    }
}

/// Remove rows according to the keyword and mode, returning how many were
/// removed. Original and added rows are equally eligible. An empty or
/// whitespace-only keyword removes nothing and leaves the table unchanged.
pub fn apply_filter(table: &mut Table, keyword: &str, mode: FilterMode) -> usize {
    let Some(needle) = fold_keyword(keyword) else {
        return 0;
    };

    let before = table.row_count();
    table.rows.retain(|row| !row_doomed(row, &needle, mode));
    before - table.row_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Row;

    fn sample() -> Table {
        Table::new(
            vec!["name".into(), "city".into()],
            vec![
                Row::original(vec!["Alice".into(), "Berlin".into()]),
                Row::original(vec!["Bob".into(), "Madrid".into()]),
                Row::added(vec!["Carol".into(), "berlin".into()]),
            ],
        )
    }

    #[test]
    fn test_delete_removes_matches() {
        let mut table = sample();
        let removed = apply_filter(&mut table, "berlin", FilterMode::Delete);

        assert_eq!(removed, 2);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0].cells[0], "Bob");
    }

    #[test]
    fn test_keep_removes_non_matches() {
        let mut table = sample();
        let removed = apply_filter(&mut table, "berlin", FilterMode::Keep);

        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let mut table = sample();
        let removed = apply_filter(&mut table, "  BERLIN ", FilterMode::Delete);
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_empty_keyword_is_noop() {
        let mut table = sample();
        assert_eq!(apply_filter(&mut table, "", FilterMode::Delete), 0);
        assert_eq!(apply_filter(&mut table, "   ", FilterMode::Keep), 0);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_delete_and_keep_partition_the_rows() {
        let keyword = "a";
        let mut deleted_from = sample();
        let mut kept_from = sample();

        apply_filter(&mut deleted_from, keyword, FilterMode::Delete);
        apply_filter(&mut kept_from, keyword, FilterMode::Keep);

        // Survivors of delete are exactly the rows keep removed, and together
        // they account for every starting row with no overlap.
        let total = sample().row_count();
        assert_eq!(deleted_from.row_count() + kept_from.row_count(), total);
        for row in &deleted_from.rows {
            assert!(!kept_from.rows.contains(row));
        }
    }

    #[test]
    fn test_keep_with_no_matches_removes_everything() {
        let mut table = sample();
        let removed = apply_filter(&mut table, "zzz", FilterMode::Keep);

        assert_eq!(removed, 3);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_delete_with_no_matches_is_informational() {
        let mut table = sample();
        let removed = apply_filter(&mut table, "zzz", FilterMode::Delete);

        assert_eq!(removed, 0);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_keyword_can_match_across_cell_boundary() {
        // Cells "12" and "3" concatenate to "123"; this is the documented
        // separator policy.
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![Row::original(vec!["12".into(), "3".into()])],
        );
        assert_eq!(preview_filter(&table, "123", FilterMode::Delete), 1);
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let table = sample();
        let would_remove = preview_filter(&table, "berlin", FilterMode::Delete);
        assert_eq!(would_remove, 2);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_added_rows_are_equally_eligible() {
        let mut table = sample();
        apply_filter(&mut table, "carol", FilterMode::Delete);
        assert_eq!(table.row_count(), 2);
    }
}
