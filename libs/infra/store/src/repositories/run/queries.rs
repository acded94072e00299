// [libs/infra/store/src/repositories/run/queries.rs]
//! SQL statements for the `runs` table, named by intent.

pub const CREATE_RUN: &str = r#"
    INSERT INTO runs (id, created_at, criteria_json, target_quantity, contacts_min, contacts_max, stage, status, notes)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'discovery', 'active', '')
"#;

pub const GET_RUN: &str = r#"
    SELECT id, created_at, criteria_json, target_quantity, contacts_min, contacts_max, stage, status, notes
    FROM runs WHERE id = ?1
"#;

pub const LIST_ACTIVE_RUNS: &str = r#"
    SELECT id, created_at, criteria_json, target_quantity, contacts_min, contacts_max, stage, status, notes
    FROM runs
    WHERE status NOT IN ('completed', 'error', 'archived')
    ORDER BY created_at ASC
"#;

pub const LIST_ACTIVE_RUNS_BY_STAGE: &str = r#"
    SELECT id, created_at, criteria_json, target_quantity, contacts_min, contacts_max, stage, status, notes
    FROM runs
    WHERE status NOT IN ('completed', 'error', 'archived') AND stage = ?1
    ORDER BY created_at ASC
"#;

pub const SET_STAGE: &str = "UPDATE runs SET stage = ?1 WHERE id = ?2";

pub const SET_STATUS: &str = "UPDATE runs SET status = ?1 WHERE id = ?2";

pub const SET_STATUS_WITH_NOTES: &str = "UPDATE runs SET status = ?1, notes = ?2 WHERE id = ?3";

pub const APPEND_NOTES: &str = "UPDATE runs SET notes = notes || ?1 WHERE id = ?2";

/// A diferencia de `SET_STATUS`, estas dos no comprueban terminalidad:
/// son el único camino que la especificación reserva para el
/// archivado/desarchivado administrativo explícito (§8, invariante 7).
pub const ARCHIVE_RUN: &str = "UPDATE runs SET status = 'archived', archived_at = ?1 WHERE id = ?2";

pub const UNARCHIVE_RUN: &str =
    "UPDATE runs SET status = ?1, archived_at = NULL WHERE id = ?2 AND status = 'archived'";
