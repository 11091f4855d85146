//! Editing session: the exclusive owner of the Table + Ledger pair
//!
//! All mutations run to completion and re-observe the ledger before
//! returning, so the reported counters are valid after every operation.
//! Loads are all-or-nothing: every selected file is parsed before anything
//! is committed, and a single parse failure leaves the session untouched.

use crate::error::{Error, Result};
use crate::filter::{apply_filter, preview_filter, FilterMode};
use crate::format::FileFormat;
use crate::ledger::{RowCounts, RowLedger};
use crate::merge::{merge_records, merge_tables};
use crate::normalize::normalize_records;
use crate::reader::read_records;
use crate::table::Table;
use crate::writer::write_table;
use std::path::{Path, PathBuf};

/// Outcome of a load or merge operation
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Files that were parsed into the table, in input order
    pub loaded: Vec<PathBuf>,
    /// Files rejected by the format check (user-facing notice)
    pub skipped: Vec<PathBuf>,
    /// Counters observed after the baseline was established
    pub counts: RowCounts,
}

/// Outcome of a delete/keep operation
#[derive(Debug, Clone, Copy)]
pub struct FilterReport {
    /// Rows removed; zero matches is informational, not an error
    pub removed: usize,
    /// Counters observed after the removal
    pub counts: RowCounts,
}

/// An in-memory editing session over one table
#[derive(Debug, Default)]
pub struct Session {
    table: Table,
    ledger: RowLedger,
}

impl Session {
    /// Start a session in the placeholder state (no table yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// The current table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Observe the ledger counters for the current table
    pub fn counts(&self) -> RowCounts {
        self.ledger.observe(&self.table)
    }

    /// Load one or more files, replacing the current table.
    ///
    /// Files with unsupported extensions are skipped; if any supported file
    /// remains the load proceeds, otherwise the whole operation is rejected.
    /// Records from all files are concatenated in input order and normalized
    /// together, so the header is the first-seen union across every file.
    pub fn load(&mut self, paths: &[PathBuf]) -> Result<LoadReport> {
        let (accepted, skipped) = partition_supported(paths);
        if accepted.is_empty() {
            return Err(Error::NoSupportedFiles);
        }

        let mut record_sets = Vec::with_capacity(accepted.len());
        for path in &accepted {
            record_sets.push(read_records(path)?);
        }

        let combined = merge_records(record_sets);
        self.install(normalize_records(&combined));
        Ok(self.load_report(accepted, skipped))
    }

    /// Concatenate pre-normalized tables: each file becomes its own table and
    /// the first file's header wins. Same rejection rules as `load`.
    pub fn stack(&mut self, paths: &[PathBuf]) -> Result<LoadReport> {
        let (accepted, skipped) = partition_supported(paths);
        if accepted.is_empty() {
            return Err(Error::NoSupportedFiles);
        }

        let mut tables = Vec::with_capacity(accepted.len());
        for path in &accepted {
            let records = read_records(path)?;
            tables.push(normalize_records(&records));
        }

        self.install(merge_tables(tables).table);
        Ok(self.load_report(accepted, skipped))
    }

    /// Replace the table with a blank one of the given shape
    pub fn new_blank(&mut self, cols: usize, rows: usize) -> RowCounts {
        self.install(Table::blank(cols, rows));
        self.counts()
    }

    /// Drop the table and reset the ledger
    pub fn clear(&mut self) -> RowCounts {
        self.install(Table::empty());
        self.counts()
    }

    /// Append a blank row marked as added. Requires a table to exist.
    pub fn add_row(&mut self) -> Result<RowCounts> {
        if self.table.is_empty() {
            return Err(Error::NoData);
        }
        self.table.push_added_row();
        Ok(self.counts())
    }

    /// Remove rows whose text contains the keyword
    pub fn delete_matching(&mut self, keyword: &str) -> Result<FilterReport> {
        self.filter(keyword, FilterMode::Delete)
    }

    /// Remove rows whose text does not contain the keyword
    pub fn keep_matching(&mut self, keyword: &str) -> Result<FilterReport> {
        self.filter(keyword, FilterMode::Keep)
    }

    /// Count the rows a delete/keep would remove, without mutating
    pub fn preview(&self, keyword: &str, mode: FilterMode) -> usize {
        preview_filter(&self.table, keyword, mode)
    }

    /// Export the current table. Rejected when no rows are present.
    pub fn export<P: AsRef<Path>>(&self, path: P, format: FileFormat) -> Result<()> {
        if self.table.row_count() == 0 {
            return Err(Error::NoData);
        }
        write_table(&self.table, path, format)
    }

    fn filter(&mut self, keyword: &str, mode: FilterMode) -> Result<FilterReport> {
        if self.table.row_count() == 0 {
            return Err(Error::NoData);
        }
        let removed = apply_filter(&mut self.table, keyword, mode);
        Ok(FilterReport {
            removed,
            counts: self.counts(),
        })
    }

    fn install(&mut self, mut table: Table) {
        self.ledger.establish_baseline(&mut table);
        self.table = table;
    }

    fn load_report(&self, loaded: Vec<PathBuf>, skipped: Vec<PathBuf>) -> LoadReport {
        for path in &skipped {
            log::warn!("skipping unsupported file '{}'", path.display());
        }
        LoadReport {
            loaded,
            skipped,
            counts: self.counts(),
        }
    }
}

fn partition_supported(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    paths
        .iter()
        .cloned()
        .partition(|p| FileFormat::from_path(p).is_some())
}
