//! Baseline management commands

use anyhow::Result;

use crate::store::SnapshotStore;

/// Create a new baseline explicitly (imports can also auto-create one)
pub fn create(store: &SnapshotStore, name: &str, description: &str) -> Result<()> {
    let id = store.create_baseline(name, description)?;
    println!("✅ Created baseline '{}' with ID {}", name.trim(), id);
    Ok(())
}
