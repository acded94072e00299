// [apps/heartbeat-monitor/src/config.rs]
/*!
 * APARATO: DIRECTIVAS OPERATIVAS DEL HEARTBEAT MONITOR
 * RESPONSABILIDAD: CARGA DE CONFIGURACIÓN VÍA CLI/ENTORNO
 */

#[derive(clap::Parser, Debug)]
#[command(about = "Releases leases held by workers whose heartbeat has lapsed")]
pub struct MonitorConfig {
    #[arg(long, env = "LEADGEN_DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "LEADGEN_DATABASE_TOKEN")]
    pub database_token: Option<String>,

    /// Segundos entre ciclos de barrido.
    #[arg(long, env = "MONITOR_INTERVAL", default_value_t = 60)]
    pub monitor_interval: u64,

    /// Un worker se considera muerto si su último latido es más viejo
    /// que este umbral.
    #[arg(long, env = "DEAD_WORKER_THRESHOLD", default_value_t = 300)]
    pub dead_worker_threshold: i64,

    /// Cuánto tiempo conservar filas `stopped` antes de purgarlas.
    #[arg(long, env = "STOPPED_RETENTION_SECONDS", default_value_t = 86_400)]
    pub stopped_retention_seconds: i64,

    /// Si está presente, cada worker muerto detectado dispara un correo
    /// a esta dirección (§4.3 paso 3, opcional).
    #[arg(long, env = "MONITOR_ALERT_EMAIL")]
    pub alert_email: Option<String>,

    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    #[arg(long, env = "SMTP_PASSWORD")]
    pub smtp_password: Option<String>,

    #[arg(long, env = "SMTP_FROM_ADDRESS")]
    pub smtp_from_address: Option<String>,

    /// 0 = sin límite; usado por pruebas acotadas.
    #[arg(long, env = "MONITOR_MAX_CYCLES", default_value_t = 0)]
    pub monitor_max_cycles: u32,
}
