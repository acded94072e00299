// [libs/infra/store/src/repositories/worker/queries.rs]
//! SQL statements for the `worker_heartbeats` table.

pub const UPSERT_HEARTBEAT: &str = r#"
    INSERT INTO worker_heartbeats
        (worker_id, role, status, current_run_id, current_task, lease_expires_at,
         last_heartbeat_at, started_at, metadata_json)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(worker_id) DO UPDATE SET
        role = excluded.role,
        status = excluded.status,
        current_run_id = excluded.current_run_id,
        current_task = excluded.current_task,
        lease_expires_at = excluded.lease_expires_at,
        last_heartbeat_at = excluded.last_heartbeat_at,
        metadata_json = excluded.metadata_json
"#;

pub const STOP_WORKER: &str = "UPDATE worker_heartbeats SET status = 'stopped' WHERE worker_id = ?1";

pub const LIST_ACTIVE: &str = r#"
    SELECT worker_id, role, status, current_run_id, current_task, lease_expires_at,
           last_heartbeat_at, started_at, metadata_json
    FROM worker_heartbeats WHERE last_heartbeat_at >= ?1 AND status != 'stopped'
"#;

pub const LIST_DEAD: &str = r#"
    SELECT worker_id, role, status, current_run_id, current_task, lease_expires_at,
           last_heartbeat_at, started_at, metadata_json
    FROM worker_heartbeats WHERE last_heartbeat_at < ?1 AND status != 'stopped'
"#;

pub const RELEASE_COMPANY_LEASES_FOR_WORKER: &str = r#"
    UPDATE company_candidates SET worker_id = NULL, lease_until = NULL WHERE worker_id = ?1
"#;

pub const RELEASE_CONTACT_LEASES_FOR_WORKER: &str = r#"
    UPDATE contact_candidates SET worker_id = NULL, lease_until = NULL WHERE worker_id = ?1
"#;

pub const PURGE_STOPPED_HEARTBEATS: &str = r#"
    DELETE FROM worker_heartbeats WHERE status = 'stopped' AND last_heartbeat_at < ?1
"#;
