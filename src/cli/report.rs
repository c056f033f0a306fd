//! Report command implementation

use anyhow::Result;

use crate::report::progress_report;
use crate::store::SnapshotStore;

/// Print the progress report for a baseline, defaulting to the most
/// recently created one
pub fn run(store: &SnapshotStore, baseline_id: Option<i64>) -> Result<()> {
    let baseline = match baseline_id {
        Some(id) => store.get_baseline(id)?,
        None => store.most_recent_baseline()?,
    };

    let baseline = match baseline {
        Some(b) => b,
        None => {
            match baseline_id {
                Some(id) => println!("Baseline {} not found.", id),
                None => println!("No baselines found. Run 'pdp import' first."),
            }
            return Ok(());
        }
    };

    let company = match store.get_company_aggregate(baseline.id)? {
        Some(c) => c,
        None => {
            println!(
                "Baseline {} ('{}') has no imported data yet.",
                baseline.id, baseline.name
            );
            return Ok(());
        }
    };

    let offices = store.get_office_aggregates(baseline.id)?;
    print!("{}", progress_report(&baseline, &company, &offices));

    Ok(())
}
