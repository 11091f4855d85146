//! Record normalizer: heterogeneous field-keyed records to a rectangular table

use crate::table::{Row, Table};
use serde_json::Value;
use std::collections::HashSet;

/// Normalize a sequence of loosely-typed records into one rectangular table.
///
/// The header is the union of all field names across well-formed (object)
/// records, ordered by first appearance when scanning in input order. Every
/// input record produces one row aligned to that header; missing or null
/// fields become empty cells, and a record that is not an object becomes an
/// all-empty row.
///
/// An empty input, or an input where no record contributes a field name,
/// yields the empty table rather than a table with one empty row.
pub fn normalize_records(records: &[Value]) -> Table {
    if records.is_empty() {
        return Table::empty();
    }

    let mut header: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if seen.insert(key) {
                    header.push(key.clone());
                }
            }
        }
    }

    if header.is_empty() {
        return Table::empty();
    }

    let rows = records
        .iter()
        .map(|record| match record {
            Value::Object(map) => Row::original(
                header
                    .iter()
                    .map(|field| map.get(field).map(cell_text).unwrap_or_default())
                    .collect(),
            ),
            _ => Row::original(vec![String::new(); header.len()]),
        })
        .collect();

    Table::new(header, rows)
}

/// Convert a record value to cell text. Null becomes the empty string;
/// nested structures degrade to their JSON text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_is_first_seen_union() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4})];
        let table = normalize_records(&records);

        assert_eq!(table.header, vec!["a", "b", "c"]);
        assert_eq!(table.rows[0].cells, vec!["1", "2", ""]);
        assert_eq!(table.rows[1].cells, vec!["", "3", "4"]);
    }

    #[test]
    fn test_every_row_matches_header_length() {
        let records = vec![
            json!({"x": 1}),
            json!({"y": 2, "z": 3}),
            json!("garbage"),
            json!({"x": 4, "w": 5}),
        ];
        let table = normalize_records(&records);

        assert_eq!(table.row_count(), 4);
        for row in &table.rows {
            assert_eq!(row.cells.len(), table.column_count());
        }
    }

    #[test]
    fn test_header_fields_are_unique() {
        let records = vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})];
        let table = normalize_records(&records);
        assert_eq!(table.header, vec!["a"]);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let table = normalize_records(&[]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_all_malformed_yields_empty_table() {
        let records = vec![json!(42), json!("text"), json!([1, 2])];
        let table = normalize_records(&records);
        assert!(table.is_empty());
    }

    #[test]
    fn test_malformed_record_becomes_empty_row() {
        let records = vec![json!({"a": 1, "b": 2}), json!(null)];
        let table = normalize_records(&records);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].cells, vec!["", ""]);
    }

    #[test]
    fn test_null_and_missing_values_become_empty_cells() {
        let records = vec![json!({"a": null, "b": "x"})];
        let table = normalize_records(&records);
        assert_eq!(table.rows[0].cells, vec!["", "x"]);
    }

    #[test]
    fn test_scalar_values_render_as_text() {
        let records = vec![json!({"n": 2.5, "b": true, "s": "hi"})];
        let table = normalize_records(&records);
        assert_eq!(table.rows[0].cells, vec!["2.5", "true", "hi"]);
    }
}
