//! Row loading from JSON and CSV files.
//!
//! Row ids are zero-based positions in the file.

use std::fs;
use std::path::Path;

use grid_filter_rs::Row;
use serde_json::Value as JsonValue;

use crate::commands::{CommandError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Loads rows from a file, dispatching by extension.
///
/// Supported formats:
/// * `.json` - `[{ "name": "Tom", "age": 25 }, ...]`
/// * `.csv`  - header row with column names, one row per record
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "json" => parse_json(&fs::read_to_string(path)?)?,
        "csv" => parse_csv(csv::Reader::from_path(path)?)?,
        other => {
            return Err(CommandError::Input(format!(
                "unsupported file extension '.{other}' (expected .json or .csv)"
            )))
        }
    };

    log::debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parses a top-level array of flat objects.
fn parse_json(text: &str) -> Result<Vec<Row>> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| CommandError::Input("expected a top-level JSON array".to_string()))?;

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let object = record
                .as_object()
                .ok_or_else(|| CommandError::Input(format!("row {i} is not a JSON object")))?;

            Ok(object
                .iter()
                .fold(Row::new(i), |row, (key, value)| {
                    row.with(key.as_str(), json_to_text(value))
                }))
        })
        .collect()
}

/// Renders a JSON value as cell content.
fn json_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Row>> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    if let Some(blank) = headers.iter().position(|h| h.is_empty()) {
        return Err(CommandError::Input(format!(
            "CSV header {} has no name",
            blank + 1
        )));
    }

    reader
        .records()
        .enumerate()
        .map(|(i, record)| {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .fold(Row::new(i), |row, (header, value)| {
                    row.with(header.as_str(), value)
                }))
        })
        .collect()
}
