//! Aggregation of agent records into office and company rollups

use std::collections::HashMap;

use super::AgentRecord;

/// Per-office rollup for one baseline
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeAggregate {
    pub office: String,
    pub current_month_total: f64,
    pub following_month_total: f64,
    pub grand_total: f64,
    pub agent_count: i64,
}

/// Company-wide rollup for one baseline
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyAggregate {
    pub total_current_month: f64,
    pub total_following_month: f64,
    pub grand_total: f64,
    pub total_agents: i64,
    pub total_offices: i64,
}

/// Fold agent records into one aggregate per distinct office plus the
/// company total.
///
/// Offices group by exact (case-sensitive) name and come back in
/// first-seen order, which keeps report output stable for a given input.
/// Every record counts toward its office's agent count; the same agent
/// name appearing twice contributes twice.
pub fn aggregate_records(records: &[AgentRecord]) -> (Vec<OfficeAggregate>, CompanyAggregate) {
    let mut offices: Vec<OfficeAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let idx = match index.get(&record.office) {
            Some(&i) => i,
            None => {
                offices.push(OfficeAggregate {
                    office: record.office.clone(),
                    current_month_total: 0.0,
                    following_month_total: 0.0,
                    grand_total: 0.0,
                    agent_count: 0,
                });
                index.insert(record.office.clone(), offices.len() - 1);
                offices.len() - 1
            }
        };

        let office = &mut offices[idx];
        office.current_month_total += record.current_month_promised;
        office.following_month_total += record.following_month_promised;
        office.agent_count += 1;
    }

    let mut company = CompanyAggregate {
        total_current_month: 0.0,
        total_following_month: 0.0,
        grand_total: 0.0,
        total_agents: records.len() as i64,
        total_offices: offices.len() as i64,
    };

    for office in &mut offices {
        office.grand_total = office.current_month_total + office.following_month_total;
        company.total_current_month += office.current_month_total;
        company.total_following_month += office.following_month_total;
    }
    company.grand_total = company.total_current_month + company.total_following_month;

    (offices, company)
}
