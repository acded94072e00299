// [apps/discovery-worker/src/config.rs]
/*!
 * APARATO: DIRECTIVAS OPERATIVAS DEL DISCOVERY WORKER
 * RESPONSABILIDAD: CARGA DE CONFIGURACIÓN VÍA CLI/ENTORNO
 *
 * Cada campo compartido (`LEADGEN_DATABASE_URL`, `AGENT_GATEWAY_*`) usa
 * el mismo nombre de variable de entorno en los cinco binarios, siguiendo
 * la convención `#[arg(long, env = "...")]` del worker del equipo original.
 */

use uuid::Uuid;

#[derive(clap::Parser, Debug)]
#[command(about = "Discovery stage worker for the lead-generation pipeline")]
pub struct DiscoveryWorkerConfig {
    #[arg(long, env = "LEADGEN_DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "LEADGEN_DATABASE_TOKEN")]
    pub database_token: Option<String>,

    #[arg(long, env = "AGENT_GATEWAY_URL")]
    pub agent_gateway_url: String,

    #[arg(long, env = "AGENT_GATEWAY_TOKEN")]
    pub agent_gateway_token: String,

    #[arg(long, env = "CRM_BASE_URL")]
    pub crm_base_url: Option<String>,

    #[arg(long, env = "CRM_TOKEN")]
    pub crm_token: Option<String>,

    /// Segundos entre sondeos cuando no hay runs elegibles.
    #[arg(long, env = "WORKER_POLL_INTERVAL", default_value_t = 3)]
    pub worker_poll_interval: u64,

    #[arg(long, env = "HEARTBEAT_INTERVAL", default_value_t = 30)]
    pub heartbeat_interval: u64,

    #[arg(long, env = "OVERSAMPLE_FACTOR", default_value_t = 2.0)]
    pub oversample_factor: f64,

    #[arg(long, env = "REGION_COUNT", default_value_t = 1)]
    pub region_count: u32,

    #[arg(long, env = "BATCH_SIZE", default_value_t = 10)]
    pub batch_size: u32,

    /// 0 = sin límite; se usa un valor acotado en pruebas dirigidas a un
    /// único run vía `run_filter_id`.
    #[arg(long, env = "WORKER_MAX_LOOPS", default_value_t = 0)]
    pub worker_max_loops: u32,

    #[arg(long, env = "RUN_FILTER_ID")]
    pub run_filter_id: Option<Uuid>,
}
