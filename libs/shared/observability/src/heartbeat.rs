// [libs/shared/observability/src/heartbeat.rs]
/*!
 * APARATO: HEARTBEAT TICKER
 * RESPONSABILIDAD: UPSERT PERIÓDICO DE `WorkerHeartbeat` COMPARTIDO POR
 * LOS TRES WORKERS DE LARGA DURACIÓN
 *
 * Cada worker arranca uno de estos al inicio (§4.3 de la especificación).
 * El ticker usa `MissedTickBehavior::Skip` para que una llamada a la base
 * lenta no acumule ticks atrasados (grounded on the teacher's
 * `ChronosPacemaker`/reaper `tokio::time::interval` convention). El
 * worker actualiza su estado en memoria vía `HeartbeatHandle::set`; el
 * ticker solo lee ese estado y lo refleja en la fila compartida.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use leadgen_domain_models::{WorkerHeartbeat, WorkerRole, WorkerStatus};
use leadgen_infra_store::{StoreClient, StoreError, WorkerRepository};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

/// Mango que el worker retiene para reportar su estado actual al
/// ticker de fondo sin tener que pasarle la conexión a la base cada vez.
#[derive(Clone)]
pub struct HeartbeatHandle {
    state: Arc<Mutex<(WorkerStatus, Option<Uuid>, Option<String>)>>,
    stop: Arc<AtomicBool>,
}

impl HeartbeatHandle {
    pub async fn set(&self, status: WorkerStatus, current_run_id: Option<Uuid>, current_task: Option<String>) {
        let mut guard = self.state.lock().await;
        *guard = (status, current_run_id, current_task);
    }

    /// Señala al ticker que debe escribir `status=stopped` y terminar en
    /// su próximo ciclo (o inmediatamente si está dormido entre ticks,
    /// dado `MissedTickBehavior::Skip` no retrasa la observación de esta
    /// bandera en el siguiente `select!`).
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// Arranca el ticker de heartbeat para un worker. Devuelve el mango
/// para reportar estado y el `JoinHandle` de la tarea de fondo, que el
/// binario debe esperar (`await`) durante su apagado ordenado para
/// garantizar que `status=stopped` quedó persistido antes de salir.
pub fn spawn_heartbeat_ticker(
    store: StoreClient,
    worker_id: Uuid,
    role: WorkerRole,
    heartbeat_interval: Duration,
) -> (HeartbeatHandle, JoinHandle<()>) {
    let started_at = Utc::now();
    let state = Arc::new(Mutex::new((WorkerStatus::Idle, None::<Uuid>, None::<String>)));
    let stop = Arc::new(AtomicBool::new(false));

    let handle = HeartbeatHandle {
        state: state.clone(),
        stop: stop.clone(),
    };

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(heartbeat_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let should_stop = stop.load(Ordering::SeqCst);
            let (status, current_run_id, current_task) = {
                let guard = state.lock().await;
                guard.clone()
            };
            let effective_status = if should_stop { WorkerStatus::Stopped } else { status };

            let heartbeat = WorkerHeartbeat {
                worker_id,
                role,
                status: effective_status,
                current_run_id,
                current_task,
                lease_expires_at: None,
                last_heartbeat_at: Utc::now(),
                started_at,
                metadata: None,
            };

            if let Err(error) = upsert(&store, &heartbeat).await {
                warn!(worker_id = %worker_id, error = %error, "heartbeat upsert failed");
            }

            if should_stop {
                break;
            }
        }
    });

    (handle, task)
}

async fn upsert(store: &StoreClient, heartbeat: &WorkerHeartbeat) -> Result<(), StoreError> {
    let repo = WorkerRepository::new(store.connection()?);
    repo.upsert_heartbeat(heartbeat).await
}
