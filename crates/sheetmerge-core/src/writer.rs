//! File serializer collaborator: tables to exportable bytes
//!
//! Supports delimited text (csv/tsv), structured-record text (json), and a
//! minimal Office Open XML spreadsheet (xlsx) built directly on the zip
//! container with inline strings.

use crate::error::{Error, Result};
use crate::format::FileFormat;
use crate::table::Table;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

/// Write a table to a file in the requested format.
///
/// `Xls` and `Ods` are input-only formats and are rejected here.
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P, format: FileFormat) -> Result<()> {
    let path = path.as_ref();
    match format {
        FileFormat::Csv => write_delimited(table, path, b','),
        FileFormat::Tsv => write_delimited(table, path, b'\t'),
        FileFormat::Json => {
            let text = serde_json::to_string_pretty(&table_to_json(table))?;
            std::fs::write(path, text)?;
            Ok(())
        }
        FileFormat::Xlsx => {
            let file = File::create(path)?;
            write_xlsx(table, file)
        }
        FileFormat::Xls | FileFormat::Ods => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn write_delimited(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(file);

    writer.write_record(&table.header).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    for row in &table.rows {
        writer.write_record(&row.cells).map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the table as an array of per-row field/value mappings keyed by the
/// header, applying the numeric coercion rule to each cell.
pub fn table_to_json(table: &Table) -> Value {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut map = Map::new();
            for (field, cell) in table.header.iter().zip(&row.cells) {
                map.insert(field.clone(), coerce_cell(cell));
            }
            Value::Object(map)
        })
        .collect();
    Value::Array(rows)
}

/// Convert cell text to a JSON value: a non-empty, fully numeric cell becomes
/// a number unless it has a disallowed leading zero ("007" stays a string,
/// "0.5" becomes 0.5). Everything else stays a trimmed string.
pub fn coerce_cell(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() || has_disallowed_leading_zero(trimmed) {
        return Value::String(trimmed.to_string());
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::String(trimmed.to_string())
}

fn has_disallowed_leading_zero(s: &str) -> bool {
    s.len() > 1 && s.starts_with('0') && !s.starts_with("0.")
}

/// Write the table as a single-sheet XLSX package.
pub fn write_xlsx<W: Write + Seek>(table: &Table, writer: W) -> Result<()> {
    let mut zip = zip::ZipWriter::new(writer);
    let options = zip::write::SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS_XML.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(WORKBOOK_XML.as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS_XML.as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(STYLES_XML.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(worksheet_xml(table).as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn worksheet_xml(table: &Table) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
    );

    content.push_str("\n        <row r=\"1\">");
    for (col, name) in table.header.iter().enumerate() {
        push_string_cell(&mut content, 1, col, name);
    }
    content.push_str("\n        </row>");

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = i + 2;
        content.push_str(&format!("\n        <row r=\"{row_num}\">"));
        for (col, cell) in row.cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            match coerce_cell(cell) {
                Value::Number(n) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}{}\"><v>{}</v></c>",
                        column_ref(col),
                        row_num,
                        n
                    ));
                }
                _ => push_string_cell(&mut content, row_num, col, cell),
            }
        }
        content.push_str("\n        </row>");
    }

    content.push_str("\n    </sheetData>\n</worksheet>");
    content
}

fn push_string_cell(content: &mut String, row_num: usize, col: usize, text: &str) {
    content.push_str(&format!(
        "\n            <c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
        column_ref(col),
        row_num,
        escape_xml(text)
    ));
}

/// 0-based column index to the A1-notation column letters
fn column_ref(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="1"><fill><patternFill patternType="none"/></fill></fills>
    <borders count="1"><border/></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
</styleSheet>"#;
