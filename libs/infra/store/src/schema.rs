// [libs/infra/store/src/schema.rs]
/*!
 * =================================================================
 * APARATO: RUN STORE SCHEMA
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA TOTAL
 *
 * Tres fases, aplicadas en orden: solidificación de tablas base,
 * evolución incremental de columnas (tolerante a "duplicate column"
 * en motores que ya las tienen), y endurecimiento con índices.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, warn};

const BASE_TABLES: &[(&str, &str)] = &[
    ("TABLE_RUNS", r#"
        CREATE TABLE IF NOT EXISTS runs (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            criteria_json TEXT NOT NULL,
            target_quantity INTEGER NOT NULL,
            contacts_min INTEGER NOT NULL DEFAULT 1,
            contacts_max INTEGER NOT NULL DEFAULT 3,
            stage TEXT NOT NULL DEFAULT 'discovery',
            status TEXT NOT NULL DEFAULT 'active',
            notes TEXT NOT NULL DEFAULT ''
        );
    "#),
    ("TABLE_COMPANY_CANDIDATES", r#"
        CREATE TABLE IF NOT EXISTS company_candidates (
            id TEXT PRIMARY KEY,
            run_id TEXT NOT NULL,
            name TEXT NOT NULL,
            website TEXT NOT NULL,
            domain TEXT NOT NULL,
            state TEXT,
            description TEXT,
            discovery_source TEXT NOT NULL,
            pms_detected TEXT,
            units_estimate INTEGER,
            evidence_json TEXT,
            status TEXT NOT NULL DEFAULT 'candidate',
            meets_all_requirements INTEGER,
            rejected_reasons TEXT,
            idempotency_key TEXT,
            worker_id TEXT,
            lease_until TEXT,
            discovered_at TEXT NOT NULL,
            UNIQUE(run_id, domain),
            UNIQUE(run_id, idempotency_key)
        );
    "#),
    ("TABLE_COMPANY_RESEARCH", r#"
        CREATE TABLE IF NOT EXISTS company_research (
            id TEXT PRIMARY KEY,
            run_id TEXT NOT NULL,
            company_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            facts_json TEXT,
            signals_json TEXT,
            confidence REAL,
            units_under_management INTEGER,
            pms_detected TEXT,
            meets_all_requirements INTEGER,
            disqualifier TEXT,
            researched_at TEXT,
            UNIQUE(run_id, company_id)
        );
    "#),
    ("TABLE_CONTACT_CANDIDATES", r#"
        CREATE TABLE IF NOT EXISTS contact_candidates (
            id TEXT PRIMARY KEY,
            run_id TEXT NOT NULL,
            company_id TEXT NOT NULL,
            full_name TEXT NOT NULL,
            title TEXT,
            email TEXT,
            linkedin_url TEXT,
            department TEXT,
            seniority TEXT,
            quality_score REAL,
            signals_json TEXT,
            evidence_json TEXT,
            status TEXT NOT NULL DEFAULT 'candidate',
            idempotency_key TEXT,
            worker_id TEXT,
            lease_until TEXT,
            discovered_at TEXT NOT NULL,
            UNIQUE(run_id, company_id, email),
            UNIQUE(run_id, company_id, linkedin_url),
            UNIQUE(run_id, company_id, idempotency_key)
        );
    "#),
    ("TABLE_WORKER_HEARTBEATS", r#"
        CREATE TABLE IF NOT EXISTS worker_heartbeats (
            worker_id TEXT PRIMARY KEY,
            role TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'idle',
            current_run_id TEXT,
            current_task TEXT,
            lease_expires_at TEXT,
            last_heartbeat_at TEXT NOT NULL,
            started_at TEXT NOT NULL,
            metadata_json TEXT
        );
    "#),
    ("TABLE_SUPPRESSED_DOMAINS", r#"
        CREATE TABLE IF NOT EXISTS suppressed_domains (
            domain TEXT NOT NULL,
            source TEXT NOT NULL,
            recorded_at TEXT NOT NULL,
            expires_at TEXT,
            PRIMARY KEY(domain, source)
        );
    "#),
    ("TABLE_SEED_CATALOG", r#"
        CREATE TABLE IF NOT EXISTS seed_catalog (
            id TEXT PRIMARY KEY,
            pms TEXT NOT NULL,
            state TEXT,
            city TEXT,
            name TEXT NOT NULL,
            website TEXT NOT NULL,
            domain TEXT NOT NULL,
            units_estimate INTEGER
        );
    "#),
];

/// Columnas añadidas tras la primera versión de cada tabla; toleran
/// "duplicate column name" en despliegues que ya las tienen.
const EVOLUTIONARY_COLUMNS: &[(&str, &str)] = &[
    ("RUN_ARCHIVED_MARKER", "ALTER TABLE runs ADD COLUMN archived_at TEXT"),
];

const ACCELERATION_INDEXES: &[(&str, &str)] = &[
    ("IDX_COMPANY_RUN_STATUS", "CREATE INDEX IF NOT EXISTS idx_company_run_status ON company_candidates(run_id, status);"),
    ("IDX_COMPANY_LEASE", "CREATE INDEX IF NOT EXISTS idx_company_lease ON company_candidates(run_id, lease_until);"),
    ("IDX_CONTACT_RUN_COMPANY", "CREATE INDEX IF NOT EXISTS idx_contact_run_company ON contact_candidates(run_id, company_id, status);"),
    ("IDX_RESEARCH_RUN_COMPANY", "CREATE INDEX IF NOT EXISTS idx_research_run_company ON company_research(run_id, company_id);"),
    ("IDX_HEARTBEAT_STATUS", "CREATE INDEX IF NOT EXISTS idx_heartbeat_status ON worker_heartbeats(role, status, last_heartbeat_at);"),
    ("IDX_SEED_CATALOG_LOOKUP", "CREATE INDEX IF NOT EXISTS idx_seed_catalog_lookup ON seed_catalog(pms, state, city);"),
];

pub async fn apply_schema(database_connection: &Connection) -> Result<()> {
    info!("applying run store schema");
    solidify_base_tables(database_connection).await?;
    apply_evolutionary_columns(database_connection).await;
    harden_indexes(database_connection).await?;
    info!("run store schema up to date");
    Ok(())
}

async fn solidify_base_tables(db: &Connection) -> Result<()> {
    for (identifier, sql) in BASE_TABLES {
        debug!(table = identifier, "solidifying table");
        db.execute(*sql, ())
            .await
            .with_context(|| format!("failed to create table {identifier}"))?;
    }
    Ok(())
}

async fn apply_evolutionary_columns(db: &Connection) {
    for (identifier, sql) in EVOLUTIONARY_COLUMNS {
        match db.execute(*sql, ()).await {
            Ok(_) => info!(column = identifier, "applied evolutionary column"),
            Err(e) => {
                let message = e.to_string();
                if message.contains("duplicate column name") {
                    debug!(column = identifier, "column already present");
                } else {
                    warn!(column = identifier, error = %message, "evolutionary column skipped");
                }
            }
        }
    }
}

async fn harden_indexes(db: &Connection) -> Result<()> {
    for (identifier, sql) in ACCELERATION_INDEXES {
        debug!(index = identifier, "hardening index");
        db.execute(*sql, ())
            .await
            .with_context(|| format!("failed to create index {identifier}"))?;
    }
    Ok(())
}
