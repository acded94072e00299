// [libs/infra/store/src/repositories/worker/mod.rs]
/*!
 * APARATO: WORKER HEARTBEAT REPOSITORY
 * RESPONSABILIDAD: TELEMETRÍA DE VIDA Y LIBERACIÓN DE LEASES HUÉRFANOS
 */

pub mod queries;

use chrono::{DateTime, Duration, Utc};
use leadgen_domain_models::{WorkerHeartbeat, WorkerRole, WorkerStatus};
use libsql::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use self::queries as sql;
use crate::errors::StoreError;

pub struct WorkerRepository {
    connection: Connection,
}

impl WorkerRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, heartbeat))]
    pub async fn upsert_heartbeat(&self, heartbeat: &WorkerHeartbeat) -> Result<(), StoreError> {
        let metadata_json = heartbeat
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?;

        self.connection
            .execute(
                sql::UPSERT_HEARTBEAT,
                params![
                    heartbeat.worker_id.to_string(),
                    heartbeat.role.as_str(),
                    heartbeat.status.as_str(),
                    heartbeat.current_run_id.map(|id| id.to_string()),
                    heartbeat.current_task.clone(),
                    heartbeat.lease_expires_at.map(|ts| ts.to_rfc3339()),
                    heartbeat.last_heartbeat_at.to_rfc3339(),
                    heartbeat.started_at.to_rfc3339(),
                    metadata_json,
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn stop_worker(&self, worker_id: Uuid) -> Result<(), StoreError> {
        self.connection.execute(sql::STOP_WORKER, params![worker_id.to_string()]).await?;
        Ok(())
    }

    pub async fn list_active(&self, liveness_window_secs: i64) -> Result<Vec<WorkerHeartbeat>, StoreError> {
        let cutoff = Utc::now() - Duration::seconds(liveness_window_secs);
        self.list_since(sql::LIST_ACTIVE, cutoff).await
    }

    pub async fn list_dead(&self, dead_threshold_secs: i64) -> Result<Vec<WorkerHeartbeat>, StoreError> {
        let cutoff = Utc::now() - Duration::seconds(dead_threshold_secs);
        self.list_since(sql::LIST_DEAD, cutoff).await
    }

    async fn list_since(&self, query: &str, cutoff: DateTime<Utc>) -> Result<Vec<WorkerHeartbeat>, StoreError> {
        let mut rows = self.connection.query(query, params![cutoff.to_rfc3339()]).await?;
        let mut heartbeats = Vec::new();
        while let Some(row) = rows.next().await? {
            heartbeats.push(row_to_heartbeat(&row)?);
        }
        Ok(heartbeats)
    }

    /// Libera los leases de empresa y contacto que un worker zombi dejó
    /// abiertos, sin importar la etapa en la que se encontraba.
    #[instrument(skip(self))]
    pub async fn release_leases_for(&self, worker_id: Uuid) -> Result<(), StoreError> {
        self.connection
            .execute(sql::RELEASE_COMPANY_LEASES_FOR_WORKER, params![worker_id.to_string()])
            .await?;
        self.connection
            .execute(sql::RELEASE_CONTACT_LEASES_FOR_WORKER, params![worker_id.to_string()])
            .await?;
        Ok(())
    }

    /// Purga filas `stopped` cuyo último latido quedó por detrás del
    /// umbral de retención; devuelve cuántas filas se eliminaron.
    #[instrument(skip(self))]
    pub async fn purge_stopped(&self, retention_secs: i64) -> Result<u64, StoreError> {
        let cutoff = Utc::now() - Duration::seconds(retention_secs);
        let affected = self
            .connection
            .execute(sql::PURGE_STOPPED_HEARTBEATS, params![cutoff.to_rfc3339()])
            .await?;
        Ok(affected)
    }
}

fn row_to_heartbeat(row: &Row) -> Result<WorkerHeartbeat, StoreError> {
    let worker_id: String = row.get(0)?;
    let role: String = row.get(1)?;
    let status: String = row.get(2)?;
    let current_run_id: Option<String> = row.get(3)?;
    let current_task: Option<String> = row.get(4)?;
    let lease_expires_at: Option<String> = row.get(5)?;
    let last_heartbeat_at: String = row.get(6)?;
    let started_at: String = row.get(7)?;
    let metadata_json: Option<String> = row.get(8)?;

    Ok(WorkerHeartbeat {
        worker_id: Uuid::parse_str(&worker_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        role: parse_role(&role)?,
        status: WorkerStatus::parse(&status).ok_or_else(|| StoreError::MappingError(format!("unknown status {status}")))?,
        current_run_id: current_run_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        current_task,
        lease_expires_at: lease_expires_at
            .map(|raw| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc)))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        last_heartbeat_at: DateTime::parse_from_rfc3339(&last_heartbeat_at)
            .map_err(|e| StoreError::MappingError(e.to_string()))?
            .with_timezone(&Utc),
        started_at: DateTime::parse_from_rfc3339(&started_at)
            .map_err(|e| StoreError::MappingError(e.to_string()))?
            .with_timezone(&Utc),
        metadata: metadata_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
    })
}

fn parse_role(value: &str) -> Result<WorkerRole, StoreError> {
    match value {
        "discovery" => Ok(WorkerRole::Discovery),
        "research" => Ok(WorkerRole::Research),
        "contact" => Ok(WorkerRole::Contact),
        other => Err(StoreError::MappingError(format!("unknown worker role {other}"))),
    }
}
