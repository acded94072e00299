// [apps/research-worker/src/main.rs]
/*!
 * APARATO: RESEARCH WORKER SHELL
 * RESPONSABILIDAD: BOOTSTRAP DE CONFIGURACIÓN, TELEMETRÍA Y APAGADO
 * ORDENADO; DELEGA LA ITERACIÓN AL MOTOR EN `engine.rs`
 */

mod agent_port;
mod config;
mod engine;
mod errors;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use leadgen_infra_agent_client::AgentClient;
use leadgen_infra_store::StoreClient;
use leadgen_shared_observability::{init_tracing, spawn_heartbeat_ticker};
use tracing::{info, warn};
use uuid::Uuid;

use agent_port::ResearchAgentPort;
use config::ResearchWorkerConfig;
use engine::{run_iteration, IterationOutcome, ResearchEngineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("leadgen_research_worker");

    let config = ResearchWorkerConfig::parse();
    let worker_id = Uuid::new_v4();

    let store = StoreClient::connect(&config.database_url, config.database_token.clone()).await?;
    let agent: Arc<dyn ResearchAgentPort> = Arc::new(AgentClient::new(
        config.agent_gateway_url.clone(),
        config.agent_gateway_token.clone(),
    )?);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_signal = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("shutdown requested, finishing in-flight work");
            stop_signal.store(true, Ordering::SeqCst);
        }
    });

    let (heartbeat, heartbeat_task) = spawn_heartbeat_ticker(
        store.clone(),
        worker_id,
        leadgen_domain_models::WorkerRole::Research,
        Duration::from_secs(config.heartbeat_interval),
    );

    let engine_config = ResearchEngineConfig {
        worker_id,
        lease_seconds: config.lease_seconds,
        run_filter_id: config.run_filter_id,
    };

    let mut loops = 0u32;
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        if config.worker_max_loops > 0 && loops >= config.worker_max_loops {
            info!("worker loop cap reached, exiting");
            break;
        }

        match run_iteration(&store, &agent, &engine_config).await {
            Ok(IterationOutcome::Idle) => {
                tokio::time::sleep(Duration::from_secs(config.worker_poll_interval)).await;
            }
            Ok(IterationOutcome::ShouldExit) => {
                info!("filtered run reached a terminal status, exiting");
                break;
            }
            Ok(IterationOutcome::Progressed) => {}
            Err(error) => {
                warn!(error = %error, "research iteration failed, continuing");
                tokio::time::sleep(Duration::from_secs(config.worker_poll_interval)).await;
            }
        }
        loops += 1;
    }

    heartbeat.request_stop();
    let _ = heartbeat_task.await;
    Ok(())
}
