pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod ingest;
pub mod report;
pub mod store;

pub use config::Config;
pub use error::{Result, TrackerError};
pub use store::SnapshotStore;
