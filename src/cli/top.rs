//! Top agents command implementation

use anyhow::Result;

use crate::report::format_currency;
use crate::store::SnapshotStore;

pub fn run(store: &SnapshotStore, baseline_id: Option<i64>, limit: i64) -> Result<()> {
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

    let agents = store.get_top_agents(baseline.id, limit)?;

    if agents.is_empty() {
        println!(
            "Baseline {} ('{}') has no imported data yet.",
            baseline.id, baseline.name
        );
        return Ok(());
    }

    println!(
        "Top {} agents for baseline {} ('{}'):\n",
        agents.len(),
        baseline.id,
        baseline.name
    );
    println!(
        "{:<4} {:<24} {:<16} {:>14} {:>14} {:>14}",
        "#", "Agent", "Office", "Current", "Following", "Total"
    );
    println!("{}", "-".repeat(90));

    for (i, agent) in agents.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<16} {:>14} {:>14} {:>14}",
            i + 1,
            agent.agent_name,
            agent.office,
            format_currency(agent.current_month_promised),
            format_currency(agent.following_month_promised),
            format_currency(agent.total_promised),
        );
    }

    Ok(())
}
