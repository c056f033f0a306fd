//! Export command implementation
//!
//! Emits the chart datasets as JSON for an external visualization
//! collaborator; the core does no chart rendering itself.

use anyhow::Result;
use std::path::Path;

use crate::error::TrackerError;
use crate::report::chart_data;
use crate::store::SnapshotStore;

pub fn run(store: &SnapshotStore, baseline_id: Option<i64>, out: Option<&Path>) -> Result<()> {
    let baseline = match baseline_id {
        Some(id) => store.get_baseline(id)?,
        None => store.most_recent_baseline()?,
    };

    let baseline = match baseline {
        Some(b) => b,
        None => {
            println!("No baselines found. Run 'pdp import' first.");
            return Ok(());
        }
    };

    let data = match chart_data(store, baseline.id) {
        Ok(d) => d,
        Err(e @ TrackerError::AggregateNotFound(_)) => {
            println!("❌ {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let json = serde_json::to_string_pretty(&data)?;

    match out {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("📊 Chart data written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
