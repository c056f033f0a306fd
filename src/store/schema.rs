//! SQLite schema definition
//!
//! Four related tables, all keyed off baselines:
//! - baselines: one row per named snapshot
//! - agent_performance: per-agent promised amounts within a baseline
//! - office_totals: per-office rollups within a baseline
//! - company_totals: one company-wide rollup per baseline
//!
//! Applied idempotently at store open; there are no migrations.

pub const SCHEMA: &str = r#"
-- ============================================
-- BASELINES
-- ============================================

-- Named, dated snapshots of promised-payment data
CREATE TABLE IF NOT EXISTS baselines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    baseline_date DATE NOT NULL,
    baseline_name TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- ============================================
-- AGENT PERFORMANCE
-- ============================================

-- One row per agent row accepted from an import
CREATE TABLE IF NOT EXISTS agent_performance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    baseline_id INTEGER NOT NULL,
    agent_name TEXT NOT NULL,
    office TEXT,
    current_month_promised REAL DEFAULT 0,
    following_month_promised REAL DEFAULT 0,
    total_promised REAL DEFAULT 0,          -- current + following, stored for queries
    import_date DATE NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (baseline_id) REFERENCES baselines (id) ON DELETE CASCADE
);

-- ============================================
-- OFFICE TOTALS
-- ============================================

-- One row per distinct office observed in a baseline's import
CREATE TABLE IF NOT EXISTS office_totals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    baseline_id INTEGER NOT NULL,
    office TEXT NOT NULL,
    current_month_total REAL DEFAULT 0,
    following_month_total REAL DEFAULT 0,
    grand_total REAL DEFAULT 0,
    agent_count INTEGER DEFAULT 0,
    import_date DATE NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (baseline_id) REFERENCES baselines (id) ON DELETE CASCADE
);

-- ============================================
-- COMPANY TOTALS
-- ============================================

-- Exactly one row per imported baseline
CREATE TABLE IF NOT EXISTS company_totals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    baseline_id INTEGER NOT NULL,
    total_current_month REAL DEFAULT 0,
    total_following_month REAL DEFAULT 0,
    grand_total REAL DEFAULT 0,
    total_agents INTEGER DEFAULT 0,
    total_offices INTEGER DEFAULT 0,
    import_date DATE NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (baseline_id) REFERENCES baselines (id) ON DELETE CASCADE
);

-- ============================================
-- INDEXES
-- ============================================

CREATE INDEX IF NOT EXISTS idx_baselines_date ON baselines(baseline_date DESC);
CREATE INDEX IF NOT EXISTS idx_agent_perf_baseline ON agent_performance(baseline_id);
CREATE INDEX IF NOT EXISTS idx_agent_perf_total ON agent_performance(total_promised DESC);
CREATE INDEX IF NOT EXISTS idx_office_totals_baseline ON office_totals(baseline_id);
CREATE INDEX IF NOT EXISTS idx_company_totals_baseline ON company_totals(baseline_id);
"#;
