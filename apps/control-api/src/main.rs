// [apps/control-api/src/main.rs]
/*!
 * APARATO: CONTROL-API SHELL
 * RESPONSABILIDAD: BOOTSTRAP DE CONFIGURACIÓN, TELEMETRÍA Y EL SERVIDOR
 * HTTP; NO PORTA LÓGICA DE PIPELINE PROPIA
 */

mod config;
mod delivery;
mod errors;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use clap::Parser;
use leadgen_infra_mailer::{Mailer, SmtpConfig};
use leadgen_infra_store::StoreClient;
use leadgen_shared_observability::init_tracing;
use tracing::info;

use config::ControlApiConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("leadgen_control_api");

    let config = ControlApiConfig::parse();

    let store = StoreClient::connect(&config.database_url, config.database_token.clone()).await?;
    let mailer = Arc::new(Mailer::new(SmtpConfig {
        host: config.smtp_host.clone(),
        port: config.smtp_port,
        username: config.smtp_username.clone(),
        password: config.smtp_password.clone(),
        from_address: config.smtp_from_address.clone(),
    })?);

    let state = AppState { store, mailer };
    let router = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "control-api listening");
    axum::serve(listener, router).await?;

    Ok(())
}
