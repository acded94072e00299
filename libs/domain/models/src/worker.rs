// [libs/domain/models/src/worker.rs]
/*!
 * APARATO: WORKER HEARTBEAT MODEL
 * RESPONSABILIDAD: TELEMETRÍA DE VIDA DE CADA PROCESO DE FONDO
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Rol operativo de un worker, usado para filtrar qué lease puede
/// reclamar y qué cola de trabajo consulta.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    Discovery,
    Research,
    Contact,
}

impl WorkerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkerRole::Discovery => "discovery",
            WorkerRole::Research => "research",
            WorkerRole::Contact => "contact",
        }
    }
}

/// Estado reportado por el worker en su último heartbeat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Idle,
    Processing,
    Stopped,
}

impl WorkerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkerStatus::Idle => "idle",
            WorkerStatus::Processing => "processing",
            WorkerStatus::Stopped => "stopped",
        }
    }

    pub fn parse(value: &str) -> Option<WorkerStatus> {
        match value {
            "idle" => Some(WorkerStatus::Idle),
            "processing" => Some(WorkerStatus::Processing),
            "stopped" => Some(WorkerStatus::Stopped),
            _ => None,
        }
    }
}

/// Fila de telemetría que un worker de fondo refresca periódicamente.
/// El Heartbeat Monitor compara `last_heartbeat_at` contra un umbral de
/// inactividad para decidir si el worker está zombi.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerHeartbeat {
    pub worker_id: Uuid,
    pub role: WorkerRole,
    pub status: WorkerStatus,
    pub current_run_id: Option<Uuid>,
    pub current_task: Option<String>,
    pub lease_expires_at: Option<DateTime<Utc>>,
    pub last_heartbeat_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub metadata: Option<Value>,
}

impl WorkerHeartbeat {
    /// Un worker se considera zombi cuando su último heartbeat es más
    /// viejo que el umbral de inactividad configurado.
    pub fn is_stale(&self, now: DateTime<Utc>, stale_after_secs: i64) -> bool {
        let age = now.signed_duration_since(self.last_heartbeat_at);
        age.num_seconds() > stale_after_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn heartbeat_aged(seconds_ago: i64) -> WorkerHeartbeat {
        let now = Utc::now();
        WorkerHeartbeat {
            worker_id: Uuid::new_v4(),
            role: WorkerRole::Discovery,
            status: WorkerStatus::Processing,
            current_run_id: None,
            current_task: None,
            lease_expires_at: None,
            last_heartbeat_at: now - Duration::seconds(seconds_ago),
            started_at: now - Duration::seconds(seconds_ago + 10),
            metadata: None,
        }
    }

    #[test]
    fn stale_detection_respects_threshold() {
        let fresh = heartbeat_aged(5);
        let stale = heartbeat_aged(120);
        assert!(!fresh.is_stale(Utc::now(), 60));
        assert!(stale.is_stale(Utc::now(), 60));
    }
}
