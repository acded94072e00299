// [apps/discovery-worker/src/errors.rs]
/*!
 * APARATO: DISCOVERY WORKER ERROR CATALOG
 * RESPONSABILIDAD: ENVOLVER LOS FALLOS DE CAPAS INFERIORES SIN CRUZAR
 * EL LÍMITE DE ETAPA — EL WORKER REGISTRA Y SIGUE, NUNCA SE DESENROLLA
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

    #[error("[APP_CONFIG_FAULT]: {0}")]
    Configuration(String),
}
