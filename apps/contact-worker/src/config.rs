// [apps/contact-worker/src/config.rs]
/*!
 * APARATO: DIRECTIVAS OPERATIVAS DEL CONTACT WORKER
 * RESPONSABILIDAD: CARGA DE CONFIGURACIÓN VÍA CLI/ENTORNO
 */

use uuid::Uuid;

#[derive(clap::Parser, Debug)]
#[command(about = "Contact-discovery stage worker for the lead-generation pipeline")]
pub struct ContactWorkerConfig {
    #[arg(long, env = "LEADGEN_DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "LEADGEN_DATABASE_TOKEN")]
    pub database_token: Option<String>,

    #[arg(long, env = "AGENT_GATEWAY_URL")]
    pub agent_gateway_url: String,

    #[arg(long, env = "AGENT_GATEWAY_TOKEN")]
    pub agent_gateway_token: String,

    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: String,

    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: String,

    #[arg(long, env = "SMTP_PASSWORD")]
    pub smtp_password: String,

    #[arg(long, env = "SMTP_FROM_ADDRESS")]
    pub smtp_from_address: String,

    /// Segundos entre sondeos cuando no hay runs elegibles.
    #[arg(long, env = "WORKER_POLL_INTERVAL", default_value_t = 3)]
    pub worker_poll_interval: u64,

    #[arg(long, env = "HEARTBEAT_INTERVAL", default_value_t = 30)]
    pub heartbeat_interval: u64,

    /// Duración del lease de una empresa reclamada para contactos.
    #[arg(long, env = "CONTACT_LEASE_SECONDS", default_value_t = 600)]
    pub lease_seconds: i64,

    /// 0 = sin límite; cuando se agota con la brecha aún abierta, el run
    /// pasa a `needs_user_decision` (fallback de brecha acotada).
    #[arg(long, env = "WORKER_MAX_LOOPS", default_value_t = 0)]
    pub worker_max_loops: u32,

    #[arg(long, env = "RUN_FILTER_ID")]
    pub run_filter_id: Option<Uuid>,
}
