//! Column resolution
//!
//! Report exports never agree on header names, so each semantic field is
//! matched against a ranked keyword list. Headers are scanned in their
//! original order and the first one containing any keyword wins; there is
//! no ranking across multiple matching headers.

use crate::config::ColumnsConfig;
use crate::error::{Result, TrackerError};

/// Column indexes for the semantic fields of one import.
/// Only the agent column is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub agent: usize,
    pub office: Option<usize>,
    pub current: Option<usize>,
    pub following: Option<usize>,
}

/// Resolve header positions for all semantic fields.
///
/// Fails before anything is written when no agent column can be found;
/// the remaining fields simply stay unresolved and default downstream.
pub fn resolve_columns(headers: &[String], keywords: &ColumnsConfig) -> Result<ResolvedColumns> {
    let agent = find_column(headers, &keywords.agent)
        .ok_or_else(|| TrackerError::AgentColumnUnresolved(headers.to_vec()))?;

    Ok(ResolvedColumns {
        agent,
        office: find_column(headers, &keywords.office),
        current: find_column(headers, &keywords.current),
        following: find_column(headers, &keywords.following),
    })
}

fn find_column(headers: &[String], candidates: &[String]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.to_lowercase();
        candidates
            .iter()
            .any(|candidate| header.contains(&candidate.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_typical_export() {
        let headers = headers(&[
            "Agent Name",
            "Office",
            "Current Month Promised",
            "Following Month Promised",
        ]);
        let cols = resolve_columns(&headers, &ColumnsConfig::default()).unwrap();
        assert_eq!(
            cols,
            ResolvedColumns {
                agent: 0,
                office: Some(1),
                current: Some(2),
                following: Some(3),
            }
        );
    }

    #[test]
    fn test_first_matching_header_wins() {
        // Both headers contain "current"; the earlier one is taken
        let headers = headers(&["Collector", "Current Promised", "Current Month Adjusted"]);
        let cols = resolve_columns(&headers, &ColumnsConfig::default()).unwrap();
        assert_eq!(cols.current, Some(1));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let headers = headers(&["EMPLOYEE", "BRANCH"]);
        let cols = resolve_columns(&headers, &ColumnsConfig::default()).unwrap();
        assert_eq!(cols.agent, 0);
        assert_eq!(cols.office, Some(1));
    }

    #[test]
    fn test_missing_agent_column_is_fatal() {
        let headers = headers(&["Office", "Current Month", "Following Month"]);
        let err = resolve_columns(&headers, &ColumnsConfig::default()).unwrap_err();
        assert!(matches!(err, TrackerError::AgentColumnUnresolved(_)));
    }

    #[test]
    fn test_optional_columns_stay_unresolved() {
        let headers = headers(&["Agent"]);
        let cols = resolve_columns(&headers, &ColumnsConfig::default()).unwrap();
        assert_eq!(cols.office, None);
        assert_eq!(cols.current, None);
        assert_eq!(cols.following, None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let headers = headers(&["Name", "Location", "This Month", "Next Month"]);
        let keywords = ColumnsConfig::default();
        let first = resolve_columns(&headers, &keywords).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve_columns(&headers, &keywords).unwrap(), first);
        }
    }

    #[test]
    fn test_custom_keywords_apply() {
        let headers = headers(&["Rep", "Region"]);
        let keywords = ColumnsConfig {
            agent: vec!["rep".to_string()],
            office: vec!["region".to_string()],
            ..ColumnsConfig::default()
        };
        let cols = resolve_columns(&headers, &keywords).unwrap();
        assert_eq!(cols.agent, 0);
        assert_eq!(cols.office, Some(1));
    }
}
