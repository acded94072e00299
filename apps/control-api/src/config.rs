// [apps/control-api/src/config.rs]
/*!
 * APARATO: DIRECTIVAS OPERATIVAS DE CONTROL-API
 * RESPONSABILIDAD: CARGA DE CONFIGURACIÓN VÍA CLI/ENTORNO
 */

#[derive(clap::Parser, Debug)]
#[command(about = "HTTP facade over the Run Store: run creation, monitoring, and user-decision resolution")]
pub struct ControlApiConfig {
    #[arg(long, env = "LEADGEN_DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "LEADGEN_DATABASE_TOKEN")]
    pub database_token: Option<String>,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

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
}
