//! Accepted file formats and extension detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The tabular file formats the application accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Comma-separated text
    Csv,
    /// Tab-separated text
    Tsv,
    /// Legacy Excel binary
    Xls,
    /// Office Open XML spreadsheet
    Xlsx,
    /// OpenDocument spreadsheet
    Ods,
    /// Array of per-row field/value mappings
    Json,
}

impl FileFormat {
    /// Detect a format from a file extension, case-insensitively.
    /// Returns None for anything outside the accepted set.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        Self::from_name(&ext)
    }

    /// Look up a format by name (e.g. a `--format` flag value)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "xls" => Some(Self::Xls),
            "xlsx" => Some(Self::Xlsx),
            "ods" => Some(Self::Ods),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// The canonical file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
            Self::Ods => "ods",
            Self::Json => "json",
        }
    }

    /// Whether files of this format are read as bytes rather than text
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Xls | Self::Xlsx | Self::Ods)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| format!("unknown format '{s}' (expected csv, tsv, xls, xlsx, ods, or json)"))
    }
}
