// [apps/contact-worker/src/errors.rs]
/*!
 * APARATO: CONTACT WORKER ERROR CATALOG
 * RESPONSABILIDAD: ENVOLVER LOS FALLOS DE CAPAS INFERIORES SIN CRUZAR
 * EL LÍMITE DE ETAPA — EL WORKER REGISTRA Y SIGUE, NUNCA SE DESENROLLA
 *
 * Un fallo de correo o de proyección CSV nunca se propaga como
 * `WorkerError`: la entrega es best-effort (§4.6) y se captura en el
 * sitio de llamada para anotarse en `runs.notes`.
 */

use leadgen_infra_agent_client::AgentClientError;
use leadgen_infra_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("[APP_STORE_FAULT]: {0}")]
    Store(#[from] StoreError),

    #[error("[APP_AGENT_FAULT]: {0}")]
    Agent(#[from] AgentClientError),
}
