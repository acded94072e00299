// [apps/heartbeat-monitor/src/main.rs]
/*!
 * APARATO: HEARTBEAT MONITOR SHELL
 * RESPONSABILIDAD: BOOTSTRAP DE CONFIGURACIÓN Y TELEMETRÍA; DELEGA CADA
 * CICLO DE BARRIDO AL MOTOR EN `engine.rs`
 *
 * A diferencia de los tres workers de etapa, este binario no lleva su
 * propio ticker de heartbeat: no reclama leases ni procesa entidades,
 * solo observa `worker_heartbeats` y actúa sobre lo que encuentra ahí.
 */

mod config;
mod engine;
mod errors;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use leadgen_infra_mailer::{Mailer, SmtpConfig};
use leadgen_infra_store::StoreClient;
use leadgen_shared_observability::init_tracing;
use tracing::{info, warn};

use config::MonitorConfig;
use engine::{sweep_once, SweepConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("leadgen_heartbeat_monitor");

    let config = MonitorConfig::parse();
    let store = StoreClient::connect(&config.database_url, config.database_token.clone()).await?;

    let mailer = build_mailer(&config)?;

    let stop = Arc::new(AtomicBool::new(false));
    let stop_signal = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("shutdown requested, exiting after current sweep");
            stop_signal.store(true, Ordering::SeqCst);
        }
    });

    let sweep_config = SweepConfig {
        dead_worker_threshold: config.dead_worker_threshold,
        stopped_retention_seconds: config.stopped_retention_seconds,
        alert_email: config.alert_email.clone(),
    };

    let mut cycles = 0u32;
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        if config.monitor_max_cycles > 0 && cycles >= config.monitor_max_cycles {
            info!("monitor cycle cap reached, exiting");
            break;
        }

        match sweep_once(&store, mailer.as_ref(), &sweep_config).await {
            Ok(summary) => {
                if summary.dead_workers_found > 0 {
                    info!(
                        dead_workers = summary.dead_workers_found,
                        leases_released = summary.leases_released_for,
                        "sweep cycle complete"
                    );
                }
            }
            Err(error) => warn!(error = %error, "sweep cycle failed, continuing"),
        }

        cycles += 1;
        tokio::time::sleep(Duration::from_secs(config.monitor_interval)).await;
    }

    Ok(())
}

/// El alerta por correo es opcional (§4.3 paso 3): si falta el email o
/// las credenciales SMTP, el monitor sigue liberando leases sin alertar.
fn build_mailer(config: &MonitorConfig) -> anyhow::Result<Option<Arc<Mailer>>> {
    if config.alert_email.is_none() {
        return Ok(None);
    }

    let (Some(host), Some(username), Some(password), Some(from_address)) = (
        config.smtp_host.clone(),
        config.smtp_username.clone(),
        config.smtp_password.clone(),
        config.smtp_from_address.clone(),
    ) else {
        warn!("MONITOR_ALERT_EMAIL set without complete SMTP credentials, alerts disabled");
        return Ok(None);
    };

    let mailer = Mailer::new(SmtpConfig {
        host,
        port: config.smtp_port,
        username,
        password,
        from_address,
    })?;
    Ok(Some(Arc::new(mailer)))
}
