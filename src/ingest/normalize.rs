//! Row normalization
//!
//! Converts one raw row into a validated agent record, or drops it when it
//! is a blank, NaN, or summary line. A single malformed cell never aborts
//! an import: unparsable amounts become 0 and a missing office becomes
//! "Unknown".

use chrono::NaiveDate;

use super::{Cell, ResolvedColumns};

/// Office label used when the office column is unresolved or the cell is blank
pub const UNKNOWN_OFFICE: &str = "Unknown";

/// Agent rows whose name cell matches one of these (trimmed, lowercased)
/// are summary lines, not data
const SKIP_MARKERS: [&str; 3] = ["nan", "total", "grand total"];

/// One validated agent row from an import
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub agent_name: String,
    pub office: String,
    pub current_month_promised: f64,
    pub following_month_promised: f64,
    /// Always current + following, never read from the source
    pub total_promised: f64,
    pub import_date: NaiveDate,
}

/// Normalize one raw row. Returns `None` for rows that should be skipped.
pub fn normalize_row(
    cells: &[Cell],
    cols: &ResolvedColumns,
    import_date: NaiveDate,
) -> Option<AgentRecord> {
    let agent_name = cells
        .get(cols.agent)
        .and_then(|c| c.as_text())
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let marker = agent_name.to_lowercase();
    if marker.is_empty() || SKIP_MARKERS.contains(&marker.as_str()) {
        log::debug!("skipping summary/blank row: {:?}", agent_name);
        return None;
    }

    let office = cols
        .office
        .and_then(|i| cells.get(i))
        .and_then(|c| c.as_text())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_OFFICE.to_string());

    let current = cols
        .current
        .map(|i| parse_amount(cells.get(i)))
        .unwrap_or(0.0);
    let following = cols
        .following
        .map(|i| parse_amount(cells.get(i)))
        .unwrap_or(0.0);

    Some(AgentRecord {
        agent_name,
        office,
        current_month_promised: current,
        following_month_promised: following,
        total_promised: current + following,
        import_date,
    })
}

/// Parse a promised amount from a cell.
///
/// Strips currency symbols and thousands separators; anything that still
/// fails to parse yields 0. Amounts are clamped to be non-negative.
pub fn parse_amount(cell: Option<&Cell>) -> f64 {
    let value = match cell {
        None | Some(Cell::Empty) => 0.0,
        Some(Cell::Number(n)) => *n,
        Some(Cell::Text(s)) => {
            let cleaned = s.trim().replace(['$', ','], "");
            cleaned.parse::<f64>().unwrap_or(0.0)
        }
    };

    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> ResolvedColumns {
        ResolvedColumns {
            agent: 0,
            office: Some(1),
            current: Some(2),
            following: Some(3),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_normalizes_complete_row() {
        let row = vec![
            text("John Smith"),
            text("Downtown"),
            Cell::Number(5000.0),
            Cell::Number(3200.0),
        ];
        let record = normalize_row(&row, &cols(), date()).unwrap();
        assert_eq!(record.agent_name, "John Smith");
        assert_eq!(record.office, "Downtown");
        assert_eq!(record.current_month_promised, 5000.0);
        assert_eq!(record.following_month_promised, 3200.0);
        assert_eq!(record.total_promised, 8200.0);
    }

    #[test]
    fn test_skips_summary_rows() {
        for marker in ["", "  ", "nan", "Total", "Grand Total", "GRAND TOTAL"] {
            let row = vec![text(marker), text("Downtown"), Cell::Number(1.0)];
            assert!(
                normalize_row(&row, &cols(), date()).is_none(),
                "expected skip for {:?}",
                marker
            );
        }
    }

    #[test]
    fn test_currency_text_is_parsed() {
        let row = vec![text("Jane Doe"), text("Uptown"), text("$1,234.56")];
        let record = normalize_row(&row, &cols(), date()).unwrap();
        assert_eq!(record.current_month_promised, 1234.56);
        // Missing following cell defaults to 0
        assert_eq!(record.following_month_promised, 0.0);
        assert_eq!(record.total_promised, 1234.56);
    }

    #[test]
    fn test_malformed_amount_defaults_to_zero() {
        let row = vec![text("Jane Doe"), text("Uptown"), text("N/A"), Cell::Empty];
        let record = normalize_row(&row, &cols(), date()).unwrap();
        assert_eq!(record.current_month_promised, 0.0);
        assert_eq!(record.following_month_promised, 0.0);
    }

    #[test]
    fn test_blank_office_becomes_unknown() {
        let row = vec![text("Jane Doe"), Cell::Empty, Cell::Number(100.0)];
        let record = normalize_row(&row, &cols(), date()).unwrap();
        assert_eq!(record.office, UNKNOWN_OFFICE);
    }

    #[test]
    fn test_unresolved_office_column_becomes_unknown() {
        let no_office = ResolvedColumns {
            agent: 0,
            office: None,
            current: Some(1),
            following: None,
        };
        let row = vec![text("Jane Doe"), Cell::Number(100.0)];
        let record = normalize_row(&row, &no_office, date()).unwrap();
        assert_eq!(record.office, UNKNOWN_OFFICE);
        assert_eq!(record.current_month_promised, 100.0);
    }

    #[test]
    fn test_parse_amount_clamps_negatives() {
        assert_eq!(parse_amount(Some(&Cell::Number(-250.0))), 0.0);
        assert_eq!(parse_amount(Some(&text("-$1,000.00"))), 0.0);
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        assert_eq!(parse_amount(Some(&Cell::Number(f64::NAN))), 0.0);
        assert_eq!(parse_amount(Some(&Cell::Number(f64::INFINITY))), 0.0);
    }
}
