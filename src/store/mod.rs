//! Snapshot storage with SQLite
//!
//! Owns the single database connection. Each import writes agent rows,
//! office rollups, and the company rollup for a baseline inside one
//! transaction, so readers never observe a partial import. Re-importing
//! into an existing baseline replaces its rows rather than appending.

mod schema;

use chrono::Local;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::{Result, TrackerError};
use crate::ingest::{AgentRecord, CompanyAggregate, OfficeAggregate};

pub use schema::SCHEMA;

pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ============================================
    // BASELINES
    // ============================================

    /// Create a new baseline dated today. The name must not be empty.
    pub fn create_baseline(&self, name: &str, description: &str) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(TrackerError::EmptyBaselineName);
        }

        let baseline_date = Local::now().date_naive().format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO baselines (baseline_date, baseline_name, description)
             VALUES (?, ?, ?)",
            params![baseline_date, name.trim(), description],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// All baselines, most recent baseline_date first; ties go to the
    /// most recently created
    pub fn get_baselines(&self) -> Result<Vec<BaselineRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, baseline_date, baseline_name, description, created_at
             FROM baselines
             ORDER BY baseline_date DESC, id DESC",
        )?;

        let rows = stmt.query_map([], map_baseline_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub fn get_baseline(&self, baseline_id: i64) -> Result<Option<BaselineRow>> {
        let row = self.conn.query_row(
            "SELECT id, baseline_date, baseline_name, description, created_at
             FROM baselines WHERE id = ?",
            params![baseline_id],
            map_baseline_row,
        );

        match row {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Most recently created baseline, if any
    pub fn most_recent_baseline(&self) -> Result<Option<BaselineRow>> {
        let row = self.conn.query_row(
            "SELECT id, baseline_date, baseline_name, description, created_at
             FROM baselines
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
            [],
            map_baseline_row,
        );

        match row {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ============================================
    // IMPORT
    // ============================================

    /// Write all three levels of an import for one baseline atomically.
    ///
    /// Any existing rows for the baseline are replaced inside the same
    /// transaction, so a re-import of the same export never double-counts.
    pub fn import_snapshot(
        &mut self,
        baseline_id: i64,
        records: &[AgentRecord],
        offices: &[OfficeAggregate],
        company: &CompanyAggregate,
    ) -> Result<()> {
        if self.get_baseline(baseline_id)?.is_none() {
            return Err(TrackerError::BaselineNotFound(baseline_id));
        }

        // Rolls back on drop unless committed
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM agent_performance WHERE baseline_id = ?",
            params![baseline_id],
        )?;
        tx.execute(
            "DELETE FROM office_totals WHERE baseline_id = ?",
            params![baseline_id],
        )?;
        tx.execute(
            "DELETE FROM company_totals WHERE baseline_id = ?",
            params![baseline_id],
        )?;

        for record in records {
            let import_date = record.import_date.format("%Y-%m-%d").to_string();
            tx.execute(
                "INSERT INTO agent_performance
                 (baseline_id, agent_name, office, current_month_promised,
                  following_month_promised, total_promised, import_date)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    baseline_id,
                    record.agent_name,
                    record.office,
                    record.current_month_promised,
                    record.following_month_promised,
                    record.total_promised,
                    import_date,
                ],
            )?;
        }

        let import_date = Local::now().date_naive().format("%Y-%m-%d").to_string();
        for office in offices {
            tx.execute(
                "INSERT INTO office_totals
                 (baseline_id, office, current_month_total, following_month_total,
                  grand_total, agent_count, import_date)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    baseline_id,
                    office.office,
                    office.current_month_total,
                    office.following_month_total,
                    office.grand_total,
                    office.agent_count,
                    import_date,
                ],
            )?;
        }

        tx.execute(
            "INSERT INTO company_totals
             (baseline_id, total_current_month, total_following_month,
              grand_total, total_agents, total_offices, import_date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                baseline_id,
                company.total_current_month,
                company.total_following_month,
                company.grand_total,
                company.total_agents,
                company.total_offices,
                import_date,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    // ============================================
    // QUERIES
    // ============================================

    pub fn get_company_aggregate(&self, baseline_id: i64) -> Result<Option<CompanyRow>> {
        let row = self.conn.query_row(
            "SELECT baseline_id, total_current_month, total_following_month,
                    grand_total, total_agents, total_offices, import_date
             FROM company_totals WHERE baseline_id = ?",
            params![baseline_id],
            |row| {
                Ok(CompanyRow {
                    baseline_id: row.get(0)?,
                    total_current_month: row.get(1)?,
                    total_following_month: row.get(2)?,
                    grand_total: row.get(3)?,
                    total_agents: row.get(4)?,
                    total_offices: row.get(5)?,
                    import_date: row.get(6)?,
                })
            },
        );

        match row {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Office rollups for a baseline, largest grand total first
    pub fn get_office_aggregates(&self, baseline_id: i64) -> Result<Vec<OfficeRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT office, current_month_total, following_month_total,
                    grand_total, agent_count
             FROM office_totals
             WHERE baseline_id = ?
             ORDER BY grand_total DESC",
        )?;

        let rows = stmt.query_map(params![baseline_id], |row| {
            Ok(OfficeRow {
                office: row.get(0)?,
                current_month_total: row.get(1)?,
                following_month_total: row.get(2)?,
                grand_total: row.get(3)?,
                agent_count: row.get(4)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Top agents for a baseline by total promised
    pub fn get_top_agents(&self, baseline_id: i64, limit: i64) -> Result<Vec<AgentRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT agent_name, office, current_month_promised,
                    following_month_promised, total_promised
             FROM agent_performance
             WHERE baseline_id = ?
             ORDER BY total_promised DESC
             LIMIT ?",
        )?;

        let rows = stmt.query_map(params![baseline_id, limit], |row| {
            Ok(AgentRow {
                agent_name: row.get(0)?,
                office: row.get(1)?,
                current_month_promised: row.get(2)?,
                following_month_promised: row.get(3)?,
                total_promised: row.get(4)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

fn map_baseline_row(row: &rusqlite::Row) -> rusqlite::Result<BaselineRow> {
    Ok(BaselineRow {
        id: row.get(0)?,
        baseline_date: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
    })
}

// ============================================
// ROW TYPES
// ============================================

#[derive(Debug, Clone)]
pub struct BaselineRow {
    pub id: i64,
    pub baseline_date: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CompanyRow {
    pub baseline_id: i64,
    pub total_current_month: f64,
    pub total_following_month: f64,
    pub grand_total: f64,
    pub total_agents: i64,
    pub total_offices: i64,
    pub import_date: String,
}

#[derive(Debug, Clone)]
pub struct OfficeRow {
    pub office: String,
    pub current_month_total: f64,
    pub following_month_total: f64,
    pub grand_total: f64,
    pub agent_count: i64,
}

#[derive(Debug, Clone)]
pub struct AgentRow {
    pub agent_name: String,
    pub office: String,
    pub current_month_promised: f64,
    pub following_month_promised: f64,
    pub total_promised: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::aggregate_records;
    use chrono::NaiveDate;

    fn open_store(dir: &tempfile::TempDir) -> SnapshotStore {
        SnapshotStore::open(&dir.path().join("pdp.db")).unwrap()
    }

    fn record(name: &str, office: &str, current: f64, following: f64) -> AgentRecord {
        AgentRecord {
            agent_name: name.to_string(),
            office: office.to_string(),
            current_month_promised: current,
            following_month_promised: following,
            total_promised: current + following,
            import_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    fn import(store: &mut SnapshotStore, baseline_id: i64, records: &[AgentRecord]) {
        let (offices, company) = aggregate_records(records);
        store
            .import_snapshot(baseline_id, records, &offices, &company)
            .unwrap();
    }

    #[test]
    fn test_create_baseline_rejects_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let err = store.create_baseline("  ", "").unwrap_err();
        assert!(matches!(err, TrackerError::EmptyBaselineName));
    }

    #[test]
    fn test_import_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.create_baseline("March", "first snapshot").unwrap();

        import(
            &mut store,
            id,
            &[
                record("John", "Downtown", 5000.0, 3200.0),
                record("Jane", "Downtown", 7500.0, 4100.0),
                record("Mike", "Uptown", 6200.0, 5500.0),
            ],
        );

        let company = store.get_company_aggregate(id).unwrap().unwrap();
        assert_eq!(company.total_agents, 3);
        assert_eq!(company.total_offices, 2);
        assert_eq!(company.grand_total, 31500.0);

        let offices = store.get_office_aggregates(id).unwrap();
        assert_eq!(offices.len(), 2);
        // Ordered by grand total descending
        assert_eq!(offices[0].office, "Downtown");
        assert_eq!(offices[0].grand_total, 19800.0);
        assert_eq!(offices[1].office, "Uptown");

        let top = store.get_top_agents(id, 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].agent_name, "Jane");
        assert_eq!(top[0].total_promised, 11600.0);
        assert_eq!(top[1].agent_name, "Mike");
    }

    #[test]
    fn test_reimport_replaces_rather_than_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.create_baseline("March", "").unwrap();

        let records = vec![record("John", "Downtown", 100.0, 50.0)];
        import(&mut store, id, &records);
        import(&mut store, id, &records);

        let company = store.get_company_aggregate(id).unwrap().unwrap();
        assert_eq!(company.total_agents, 1);
        assert_eq!(company.grand_total, 150.0);

        let agents = store.get_top_agents(id, 10).unwrap();
        assert_eq!(agents.len(), 1);
    }

    #[test]
    fn test_import_into_unknown_baseline_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let records = vec![record("John", "X", 1.0, 0.0)];
        let (offices, company) = aggregate_records(&records);
        let err = store
            .import_snapshot(99, &records, &offices, &company)
            .unwrap_err();
        assert!(matches!(err, TrackerError::BaselineNotFound(99)));
        // Nothing was written
        assert!(store.get_company_aggregate(99).unwrap().is_none());
    }

    #[test]
    fn test_baselines_ordered_by_date_then_recency() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let first = store.create_baseline("first", "").unwrap();
        let second = store.create_baseline("second", "").unwrap();

        // Same baseline_date (today), so the later insertion leads
        let baselines = store.get_baselines().unwrap();
        assert_eq!(baselines.len(), 2);
        assert_eq!(baselines[0].id, second);
        assert_eq!(baselines[1].id, first);

        let recent = store.most_recent_baseline().unwrap().unwrap();
        assert_eq!(recent.id, second);
        assert_eq!(recent.name, "second");
    }

    #[test]
    fn test_lookups_return_none_for_missing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        assert!(store.get_baseline(7).unwrap().is_none());
        assert!(store.get_company_aggregate(7).unwrap().is_none());
        assert!(store.most_recent_baseline().unwrap().is_none());
        assert!(store.get_office_aggregates(7).unwrap().is_empty());
    }

    #[test]
    fn test_schema_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdp.db");
        let store = SnapshotStore::open(&path).unwrap();
        let id = store.create_baseline("kept", "").unwrap();
        drop(store);

        let store = SnapshotStore::open(&path).unwrap();
        assert_eq!(store.get_baseline(id).unwrap().unwrap().name, "kept");
    }
}
