//! Import command implementation

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::error::TrackerError;
use crate::ingest;
use crate::report::format_currency;
use crate::store::SnapshotStore;

/// Import a single report file into a baseline (auto-created when no id
/// is given)
pub fn run(
    store: &mut SnapshotStore,
    config: &Config,
    path: &Path,
    baseline_id: Option<i64>,
) -> Result<()> {
    let summary = ingest::import_report(store, path, baseline_id, config)?;
    print_summary(&summary);
    Ok(())
}

/// Discover report exports in a directory and import each into its own
/// auto-created baseline. Per-file failures are reported and skipped.
pub fn run_dir(store: &mut SnapshotStore, config: &Config, dir: &Path) -> Result<()> {
    let files = ingest::discover_reports(dir)?;

    if files.is_empty() {
        println!("No report exports found in {}", dir.display());
        return Ok(());
    }

    println!("📁 Found {} report file(s):", files.len());
    for file in &files {
        println!("   {}", file.display());
    }
    println!();

    let mut imported = 0;
    for file in &files {
        match ingest::import_report(store, file, None, config) {
            Ok(summary) => {
                println!("📄 {}", file.display());
                print_summary(&summary);
                imported += 1;
            }
            Err(e @ TrackerError::AgentColumnUnresolved(_))
            | Err(e @ TrackerError::EmptySheet(_))
            | Err(e @ TrackerError::UnreadableInput { .. }) => {
                println!("❌ {}: {}", file.display(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\n✅ Imported {} of {} file(s)", imported, files.len());
    Ok(())
}

fn print_summary(summary: &ingest::ImportSummary) {
    println!(
        "✅ Imported {} agents across {} offices into baseline {}",
        summary.agents, summary.offices, summary.baseline_id
    );
    println!(
        "💰 Total Current Month: {}",
        format_currency(summary.total_current)
    );
    println!(
        "💰 Total Following Month: {}",
        format_currency(summary.total_following)
    );
    println!("💰 Grand Total: {}", format_currency(summary.grand_total));
}
