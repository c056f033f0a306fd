//! Tabular file reading
//!
//! Turns a report export into `RawTable`s without interpreting any of the
//! content. CSV is the supported export format; each file contributes one
//! table named by its file stem, so the sheet-selection logic below also
//! covers sources that expose several named tables.

use std::fs::File;
use std::path::Path;

use super::{Cell, RawTable};
use crate::error::{Result, TrackerError};

/// Read all tables from a report file
pub fn read_tables(path: &Path) -> Result<Vec<RawTable>> {
    let file = File::open(path).map_err(|e| TrackerError::UnreadableInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Sheet1".to_string());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_cell).collect());
    }

    Ok(vec![RawTable {
        name,
        headers,
        rows,
    }])
}

/// Pick the table to import: first case-insensitive match against the
/// preferred sheet names, falling back to the first table.
pub fn select_sheet<'a>(tables: &'a [RawTable], preferred: &[String]) -> Option<&'a RawTable> {
    for name in preferred {
        if let Some(table) = tables.iter().find(|t| t.name.eq_ignore_ascii_case(name)) {
            return Some(table);
        }
    }
    tables.first()
}

fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    // "nan"/"inf" parse as floats but are not numbers we want
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(trimmed.to_string()),
    }
}
