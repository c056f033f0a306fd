//! Report ingestion pipeline
//!
//! Raw tabular input flows reader -> column resolver -> row normalizer ->
//! aggregator -> snapshot store. All semantic interpretation of the loosely
//! structured input happens in this module tree; the store only ever sees
//! validated records and precomputed rollups.

mod aggregate;
mod columns;
mod normalize;
mod reader;

pub use aggregate::{aggregate_records, CompanyAggregate, OfficeAggregate};
pub use columns::{resolve_columns, ResolvedColumns};
pub use normalize::{normalize_row, parse_amount, AgentRecord};
pub use reader::{read_tables, select_sheet};

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::store::SnapshotStore;

/// One cell of raw tabular input. The reader does no interpretation
/// beyond telling apart blank, numeric, and textual cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Cell content as text, if there is any
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(n.to_string()),
        }
    }
}

/// One named table of raw input: a header row plus data rows.
/// A CSV file yields a single table named by its file stem; a
/// multi-sheet source would yield one per sheet.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Result of one successful import, for the caller to display
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub baseline_id: i64,
    pub agents: i64,
    pub offices: i64,
    pub total_current: f64,
    pub total_following: f64,
    pub grand_total: f64,
}

/// Import one report file into the store.
///
/// When no baseline id is given, a baseline named after the import
/// timestamp is created. All rows and rollups for the baseline are
/// written atomically; on any failure nothing is persisted.
pub fn import_report(
    store: &mut SnapshotStore,
    path: &Path,
    baseline_id: Option<i64>,
    config: &Config,
) -> Result<ImportSummary> {
    let tables = read_tables(path)?;

    let table = select_sheet(&tables, &config.sheets.preferred).ok_or_else(|| {
        TrackerError::EmptySheet(path.display().to_string())
    })?;

    if table.rows.is_empty() {
        return Err(TrackerError::EmptySheet(path.display().to_string()));
    }

    log::debug!(
        "processing table '{}' with {} rows and {} columns",
        table.name,
        table.rows.len(),
        table.headers.len()
    );

    let cols = resolve_columns(&table.headers, &config.columns)?;

    let import_date = Local::now().date_naive();
    let records: Vec<AgentRecord> = table
        .rows
        .iter()
        .filter_map(|row| normalize_row(row, &cols, import_date))
        .collect();

    let (offices, company) = aggregate_records(&records);

    let baseline_id = match baseline_id {
        Some(id) => id,
        None => {
            let name = format!("Import_{}", Local::now().format("%Y%m%d_%H%M%S"));
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            store.create_baseline(&name, &format!("Auto-imported from {}", file_name))?
        }
    };

    store.import_snapshot(baseline_id, &records, &offices, &company)?;

    log::info!(
        "imported {} agents across {} offices into baseline {}",
        company.total_agents,
        company.total_offices,
        baseline_id
    );

    Ok(ImportSummary {
        baseline_id,
        agents: company.total_agents,
        offices: company.total_offices,
        total_current: company.total_current_month,
        total_following: company.total_following_month,
        grand_total: company.grand_total,
    })
}

/// Find report exports in a directory, newest first
pub fn discover_reports(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.csv");
    let mut found: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map_err(|e| TrackerError::UnreadableInput {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .collect();

    // Newest modification first so the latest export leads the batch
    found.sort_by_key(|p| {
        std::cmp::Reverse(
            std::fs::metadata(p)
                .and_then(|m| m.modified())
                .ok(),
        )
    });

    Ok(found)
}
