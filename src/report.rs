//! Progress report rendering and chart dataset assembly
//!
//! The text report is a pure function of already-fetched rows; callers
//! decide where it goes. Chart datasets are the four panels the external
//! visualization collaborator renders; the core only supplies the data.

use serde::Serialize;

use crate::error::{Result, TrackerError};
use crate::store::{BaselineRow, CompanyRow, OfficeRow, SnapshotStore};

/// Render a baseline's snapshot as a human-readable text block
pub fn progress_report(
    baseline: &BaselineRow,
    company: &CompanyRow,
    offices: &[OfficeRow],
) -> String {
    let average = if company.total_agents > 0 {
        format_currency(company.grand_total / company.total_agents as f64)
    } else {
        "n/a".to_string()
    };

    let mut report = format!(
        "\n📊 POST DATED PAYMENT (PDP) PROGRESS REPORT\n\
         {}\n\n\
         📅 Baseline: {}\n\
         📅 Date: {}\n\
         📝 Description: {}\n\n\
         💰 CURRENT TOTALS:\n\
         • Current Month Promised: {}\n\
         • Following Month Promised: {}\n\
         • Grand Total: {}\n\n\
         👥 TEAM METRICS:\n\
         • Total Agents: {}\n\
         • Total Offices: {}\n\
         • Average per Agent: {}\n\n",
        "=".repeat(50),
        baseline.name,
        baseline.baseline_date,
        baseline.description.as_deref().unwrap_or(""),
        format_currency(company.total_current_month),
        format_currency(company.total_following_month),
        format_currency(company.grand_total),
        company.total_agents,
        company.total_offices,
        average,
    );

    if !offices.is_empty() {
        report.push_str("🏢 OFFICE BREAKDOWN:\n");
        for office in offices {
            report.push_str(&format!(
                "• {}: {} ({} agents)\n",
                office.office,
                format_currency(office.grand_total),
                office.agent_count
            ));
        }
    }

    report
}

/// Currency with thousands separators and two decimals, sign inside the
/// symbol: `$1,234.56`, `$-1,234.56`
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}.{:02}", sign, grouped, frac)
}

// ============================================
// CHART DATASETS
// ============================================

/// Datasets for the visualization collaborator's four panels
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub baseline_id: i64,
    pub office_totals: Vec<OfficeTotalPoint>,
    pub period_split: PeriodSplit,
    pub top_agents: Vec<AgentPoint>,
    pub office_agent_counts: Vec<OfficeCountPoint>,
}

#[derive(Debug, Serialize)]
pub struct OfficeTotalPoint {
    pub office: String,
    pub grand_total: f64,
}

#[derive(Debug, Serialize)]
pub struct PeriodSplit {
    pub current_month: f64,
    pub following_month: f64,
}

#[derive(Debug, Serialize)]
pub struct AgentPoint {
    pub agent_name: String,
    pub office: String,
    pub total_promised: f64,
}

#[derive(Debug, Serialize)]
pub struct OfficeCountPoint {
    pub office: String,
    pub agent_count: i64,
}

/// Assemble the chart datasets for a baseline
pub fn chart_data(store: &SnapshotStore, baseline_id: i64) -> Result<ChartData> {
    if store.get_baseline(baseline_id)?.is_none() {
        return Err(TrackerError::BaselineNotFound(baseline_id));
    }
    let company = store
        .get_company_aggregate(baseline_id)?
        .ok_or(TrackerError::AggregateNotFound(baseline_id))?;
    let offices = store.get_office_aggregates(baseline_id)?;
    let agents = store.get_top_agents(baseline_id, 10)?;

    Ok(ChartData {
        baseline_id,
        office_totals: offices
            .iter()
            .map(|o| OfficeTotalPoint {
                office: o.office.clone(),
                grand_total: o.grand_total,
            })
            .collect(),
        period_split: PeriodSplit {
            current_month: company.total_current_month,
            following_month: company.total_following_month,
        },
        top_agents: agents
            .into_iter()
            .map(|a| AgentPoint {
                agent_name: a.agent_name,
                office: a.office,
                total_promised: a.total_promised,
            })
            .collect(),
        office_agent_counts: offices
            .into_iter()
            .map(|o| OfficeCountPoint {
                office: o.office,
                agent_count: o.agent_count,
            })
            .collect(),
    })
}
