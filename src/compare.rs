//! Baseline comparison
//!
//! Computes signed improvement metrics between two baselines' company
//! totals. The result is a plain serializable struct so any frontend can
//! render it; nothing here formats text.

use serde::Serialize;

use crate::error::{Result, TrackerError};
use crate::store::SnapshotStore;

/// Identifying metadata for one side of a comparison
#[derive(Debug, Clone, Serialize)]
pub struct BaselineSummary {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub grand_total: f64,
}

/// Signed deltas and percentage changes from the first baseline to the
/// second
#[derive(Debug, Clone, Serialize)]
pub struct Improvements {
    pub current_month: f64,
    pub following_month: f64,
    pub grand_total: f64,
    pub agent_change: i64,
    pub current_month_percent: f64,
    pub following_month_percent: f64,
    pub grand_total_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub baseline1: BaselineSummary,
    pub baseline2: BaselineSummary,
    pub improvements: Improvements,
}

/// Compare two baselines' company totals.
///
/// A missing baseline or a baseline that was never imported into surfaces
/// as a typed error, not a panic.
pub fn compare_baselines(store: &SnapshotStore, id1: i64, id2: i64) -> Result<Comparison> {
    let baseline1 = store
        .get_baseline(id1)?
        .ok_or(TrackerError::BaselineNotFound(id1))?;
    let baseline2 = store
        .get_baseline(id2)?
        .ok_or(TrackerError::BaselineNotFound(id2))?;

    let totals1 = store
        .get_company_aggregate(id1)?
        .ok_or(TrackerError::AggregateNotFound(id1))?;
    let totals2 = store
        .get_company_aggregate(id2)?
        .ok_or(TrackerError::AggregateNotFound(id2))?;

    let current = totals2.total_current_month - totals1.total_current_month;
    let following = totals2.total_following_month - totals1.total_following_month;
    let grand = totals2.grand_total - totals1.grand_total;

    Ok(Comparison {
        baseline1: BaselineSummary {
            id: baseline1.id,
            name: baseline1.name,
            date: baseline1.baseline_date,
            grand_total: totals1.grand_total,
        },
        baseline2: BaselineSummary {
            id: baseline2.id,
            name: baseline2.name,
            date: baseline2.baseline_date,
            grand_total: totals2.grand_total,
        },
        improvements: Improvements {
            current_month: current,
            following_month: following,
            grand_total: grand,
            agent_change: totals2.total_agents - totals1.total_agents,
            current_month_percent: percent_change(current, totals1.total_current_month),
            following_month_percent: percent_change(following, totals1.total_following_month),
            grand_total_percent: percent_change(grand, totals1.grand_total),
        },
    })
}

/// Percentage change of `delta` against `base`; 0 when the base is not
/// positive, never NaN or infinite
fn percent_change(delta: f64, base: f64) -> f64 {
    if base > 0.0 {
        delta / base * 100.0
    } else {
        0.0
    }
}
