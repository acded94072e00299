// [apps/research-worker/src/config.rs]
/*!
 * APARATO: DIRECTIVAS OPERATIVAS DEL RESEARCH WORKER
 * RESPONSABILIDAD: CARGA DE CONFIGURACIÓN VÍA CLI/ENTORNO
 */

use uuid::Uuid;

#[derive(clap::Parser, Debug)]
#[command(about = "Research stage worker for the lead-generation pipeline")]
pub struct ResearchWorkerConfig {
    #[arg(long, env = "LEADGEN_DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "LEADGEN_DATABASE_TOKEN")]
    pub database_token: Option<String>,

    #[arg(long, env = "AGENT_GATEWAY_URL")]
    pub agent_gateway_url: String,

    #[arg(long, env = "AGENT_GATEWAY_TOKEN")]
    pub agent_gateway_token: String,

    /// Segundos entre sondeos cuando no hay runs elegibles.
    #[arg(long, env = "WORKER_POLL_INTERVAL", default_value_t = 3)]
    pub worker_poll_interval: u64,

    #[arg(long, env = "HEARTBEAT_INTERVAL", default_value_t = 30)]
    pub heartbeat_interval: u64,

    /// Duración del lease de una empresa reclamada para investigación.
    #[arg(long, env = "RESEARCH_LEASE_SECONDS", default_value_t = 600)]
    pub lease_seconds: i64,

    /// 0 = sin límite.
    #[arg(long, env = "WORKER_MAX_LOOPS", default_value_t = 0)]
    pub worker_max_loops: u32,

    #[arg(long, env = "RUN_FILTER_ID")]
    pub run_filter_id: Option<Uuid>,
}
