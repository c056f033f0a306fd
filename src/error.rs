use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Could not read input file {path}: {reason}")]
    UnreadableInput { path: PathBuf, reason: String },

    #[error("No data rows found in {0}")]
    EmptySheet(String),

    #[error("Could not identify agent column among headers: {0:?}")]
    AgentColumnUnresolved(Vec<String>),

    #[error("Baseline name must not be empty")]
    EmptyBaselineName,

    #[error("Baseline {0} not found")]
    BaselineNotFound(i64),

    #[error("Company totals not found for baseline {0}")]
    AggregateNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
