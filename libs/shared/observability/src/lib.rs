// [libs/shared/observability/src/lib.rs]
/*!
 * =================================================================
 * CRATE: leadgen-shared-observability
 * CLASIFICACIÓN: SHARED LAYER (ESTRATO L4)
 * RESPONSABILIDAD: ARRANQUE DE TRACING Y TICKER DE HEARTBEAT COMPARTIDOS
 *
 * Los cinco binarios del pipeline llaman a `init_tracing` en su primera
 * línea de `main`; los tres workers de larga duración además arrancan
 * `spawn_heartbeat_ticker` para mantener su fila en `worker_heartbeats`
 * viva mientras procesan.
 * =================================================================
 */

mod heartbeat;
mod tracing_init;

pub use heartbeat::{spawn_heartbeat_ticker, HeartbeatHandle};
pub use tracing_init::init_tracing;
