//! sheetmerge-core: tabular data reconciliation and change tracking
//!
//! This library provides functionality to:
//! - Normalize heterogeneous field-keyed records into one rectangular table
//! - Merge multiple tables (or record sequences) in input order
//! - Track original/added/deleted/remaining row counts through arbitrary
//!   edit sequences, re-derived on every observation
//! - Filter rows by case-insensitive keyword (delete matching / keep only
//!   matching), with a non-mutating preview
//! - Read and write csv, tsv, json, and spreadsheet binary files

pub mod error;
pub mod filter;
pub mod format;
pub mod ledger;
pub mod merge;
pub mod normalize;
pub mod reader;
pub mod session;
pub mod table;
pub mod writer;

pub use error::{Error, Result};
pub use filter::{apply_filter, preview_filter, FilterMode};
pub use format::FileFormat;
pub use ledger::{RowCounts, RowLedger};
pub use merge::{merge_records, merge_tables, MergeOutcome};
pub use normalize::normalize_records;
pub use reader::read_records;
pub use session::{FilterReport, LoadReport, Session};
pub use table::{Row, RowOrigin, Table};
pub use writer::{table_to_json, write_table};
