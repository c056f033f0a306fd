//! Compare command implementation

use anyhow::Result;

use crate::compare::{compare_baselines, Comparison};
use crate::error::TrackerError;
use crate::report::format_currency;
use crate::store::SnapshotStore;

pub fn run(store: &SnapshotStore, id1: i64, id2: i64, json: bool) -> Result<()> {
    let comparison = match compare_baselines(store, id1, id2) {
        Ok(c) => c,
        Err(e @ TrackerError::BaselineNotFound(_))
        | Err(e @ TrackerError::AggregateNotFound(_)) => {
            println!("❌ {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", render(&comparison));
    }

    Ok(())
}

fn render(comparison: &Comparison) -> String {
    let imp = &comparison.improvements;

    let verdict = if imp.grand_total > 0.0 {
        "🎉 POSITIVE IMPROVEMENT!"
    } else if imp.grand_total < 0.0 {
        "⚠️ NEEDS ATTENTION"
    } else {
        "➡️ NO CHANGE"
    };

    format!(
        "\n🔍 BASELINE COMPARISON REPORT\n\
         {}\n\n\
         📊 BASELINE 1 (Starting Point):\n\
         • Name: {}\n\
         • Date: {}\n\
         • Grand Total: {}\n\n\
         📊 BASELINE 2 (Current):\n\
         • Name: {}\n\
         • Date: {}\n\
         • Grand Total: {}\n\n\
         📈 IMPROVEMENTS:\n\
         • Current Month Change: {} ({:.1}%)\n\
         • Following Month Change: {} ({:.1}%)\n\
         • Grand Total Change: {} ({:.1}%)\n\
         • Agent Count Change: {}\n\n\
         {}\n",
        "=".repeat(50),
        comparison.baseline1.name,
        comparison.baseline1.date,
        format_currency(comparison.baseline1.grand_total),
        comparison.baseline2.name,
        comparison.baseline2.date,
        format_currency(comparison.baseline2.grand_total),
        format_currency(imp.current_month),
        imp.current_month_percent,
        format_currency(imp.following_month),
        imp.following_month_percent,
        format_currency(imp.grand_total),
        imp.grand_total_percent,
        imp.agent_change,
        verdict,
    )
}
