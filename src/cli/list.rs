//! List command implementation

use anyhow::Result;

use crate::store::SnapshotStore;

pub fn run(store: &SnapshotStore) -> Result<()> {
    let baselines = store.get_baselines()?;

    if baselines.is_empty() {
        println!("No baselines found. Run 'pdp import' first.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<28} {}",
        "ID", "Date", "Name", "Description"
    );
    println!("{}", "-".repeat(80));

    for baseline in baselines {
        let name = if baseline.name.len() > 25 {
            format!("{}...", &baseline.name[..22])
        } else {
            baseline.name.clone()
        };

        println!(
            "{:<6} {:<12} {:<28} {}",
            baseline.id,
            baseline.baseline_date,
            name,
            baseline.description.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
