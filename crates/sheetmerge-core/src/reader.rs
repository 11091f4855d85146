//! File parser collaborator: raw file contents to record sequences
//!
//! Every format is reduced to the same shape the normalizer expects: a
//! sequence of JSON values, object-shaped when well-formed. Empty cells are
//! omitted from the record, so the normalizer fills them back in as empty
//! strings against the union header.

use crate::error::{Error, Result};
use crate::format::FileFormat;
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a file into records, dispatching on its extension.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    match format {
        FileFormat::Json => {
            let text = read_text(path)?;
            records_from_json_str(&text, path)
        }
        FileFormat::Csv => delimited_records(open_buffered(path)?, b',', path),
        FileFormat::Tsv => delimited_records(open_buffered(path)?, b'\t', path),
        FileFormat::Xls | FileFormat::Xlsx | FileFormat::Ods => spreadsheet_records(path),
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn open_buffered(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufReader::new(file))
}

/// Parse structured-record text: the top level must be an array, and its
/// elements are passed through untouched (the normalizer degrades non-object
/// entries to empty rows).
pub fn records_from_json_str(text: &str, source: &Path) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::ParseFailure {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(Error::ParseFailure {
            path: source.to_path_buf(),
            message: "top-level JSON value must be an array of records".to_string(),
        }),
    }
}

/// Parse delimited text from a string (useful for testing)
pub fn records_from_csv_str(content: &str, delimiter: u8, source_name: &str) -> Result<Vec<Value>> {
    delimited_records(content.as_bytes(), delimiter, Path::new(source_name))
}

fn delimited_records<R: Read>(reader: R, delimiter: u8, path: &Path) -> Result<Vec<Value>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        if record.len() > headers.len() {
            log::warn!(
                "row {} in '{}' has more cells than the header, ignoring extras",
                row_idx + 1,
                path.display()
            );
        }

        let mut map = Map::new();
        for (field, header) in record.iter().zip(&headers) {
            if !field.is_empty() {
                map.insert(header.clone(), Value::String(field.to_string()));
            }
        }
        records.push(Value::Object(map));
    }

    Ok(records)
}

/// Read the first worksheet of a spreadsheet binary, header row first.
fn spreadsheet_records(path: &Path) -> Result<Vec<Value>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| Error::Spreadsheet {
        path: path.to_path_buf(),
        source: e,
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(result) => result.map_err(|e| Error::Spreadsheet {
            path: path.to_path_buf(),
            source: e,
        })?,
        None => {
            return Err(Error::ParseFailure {
                path: path.to_path_buf(),
                message: "spreadsheet has no worksheets".to_string(),
            })
        }
    };

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => format!("Column {}", i + 1),
            other => other.to_string(),
        })
        .collect();

    let mut records = Vec::new();
    for row in rows {
        let mut map = Map::new();
        for (cell, header) in row.iter().zip(&headers) {
            if let Some(value) = cell_value(cell) {
                map.insert(header.clone(), value);
            }
        }
        records.push(Value::Object(map));
    }

    Ok(records)
}

/// Convert a spreadsheet cell to a record value; empty cells are omitted.
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => {
            // Integral floats read back as integers
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Some(Value::from(*f as i64))
            } else {
                Some(Value::from(*f))
            }
        }
        Data::Bool(b) => Some(Value::Bool(*b)),
        other => Some(Value::String(other.to_string())),
    }
}
