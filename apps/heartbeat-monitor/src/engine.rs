// [apps/heartbeat-monitor/src/engine.rs]
/*!
 * APARATO: MOTOR DE BARRIDO DEL HEARTBEAT MONITOR
 * RESPONSABILIDAD: UN CICLO COMPLETO DE DETECCIÓN DE WORKERS MUERTOS —
 * LIBERAR SUS LEASES, ALERTAR OPCIONALMENTE, Y PURGAR HEARTBEATS
 * `stopped` VENCIDOS (§4.3)
 *
 * Este es el único mecanismo de recuperación de workers caídos: no
 * existe un barredor de leases separado porque los leases son cortos y
 * los workers vivos los refrescan por su cuenta (§4.3, última línea).
 */

use std::sync::Arc;

use leadgen_domain_models::WorkerHeartbeat;
use leadgen_infra_mailer::Mailer;
use leadgen_infra_store::{StoreClient, WorkerRepository};
use tracing::{info, warn};

use crate::errors::MonitorError;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub dead_workers_found: u32,
    pub leases_released_for: u32,
    pub stopped_heartbeats_purged: u64,
}

pub struct SweepConfig {
    pub dead_worker_threshold: i64,
    pub stopped_retention_seconds: i64,
    pub alert_email: Option<String>,
}

pub async fn sweep_once(
    store: &StoreClient,
    mailer: Option<&Arc<Mailer>>,
    config: &SweepConfig,
) -> Result<SweepSummary, MonitorError> {
    let workers = WorkerRepository::new(store.connection()?);

    let dead = workers.list_dead(config.dead_worker_threshold).await?;
    let mut summary = SweepSummary {
        dead_workers_found: dead.len() as u32,
        ..Default::default()
    };

    for worker in &dead {
        if let Err(error) = workers.release_leases_for(worker.worker_id).await {
            warn!(worker_id = %worker.worker_id, error = %error, "failed to release leases for dead worker, will retry next cycle");
            continue;
        }
        summary.leases_released_for += 1;
        info!(worker_id = %worker.worker_id, role = worker.role.as_str(), "released leases for dead worker");

        alert_if_configured(mailer, config, worker).await;
    }

    summary.stopped_heartbeats_purged = workers.purge_stopped(config.stopped_retention_seconds).await?;
    if summary.stopped_heartbeats_purged > 0 {
        info!(purged = summary.stopped_heartbeats_purged, "purged stale stopped heartbeats");
    }

    Ok(summary)
}

async fn alert_if_configured(mailer: Option<&Arc<Mailer>>, config: &SweepConfig, worker: &WorkerHeartbeat) {
    let (Some(mailer), Some(to_address)) = (mailer, config.alert_email.as_deref()) else {
        return;
    };

    if let Err(error) = mailer
        .send_dead_worker_alert(to_address, worker.worker_id, worker.role.as_str(), worker.last_heartbeat_at)
        .await
    {
        warn!(worker_id = %worker.worker_id, error = %error, "dead-worker alert email failed to send");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadgen_domain_models::{CandidateStatus, CompanyCandidate, Geography, RunCriteria};
    use leadgen_domain_models::{WorkerRole, WorkerStatus};
    use leadgen_infra_store::{CompanyRepository, RunRepository};
    use uuid::Uuid;

    async fn memory_store() -> StoreClient {
        StoreClient::connect("file::memory:", None).await.expect("schema bootstrap")
    }

    #[tokio::test]
    async fn sweep_releases_leases_of_a_stale_worker() {
        let store = memory_store().await;
        let runs = RunRepository::new(store.connection().unwrap());
        let companies = CompanyRepository::new(store.connection().unwrap());
        let workers = WorkerRepository::new(store.connection().unwrap());

        let criteria = RunCriteria {
            pms: Some("Buildium".to_string()),
            geography: Geography {
                state: Some("CO".to_string()),
                city: None,
            },
            units_min: None,
            target_distribution: None,
            notification_email: "ops@example.com".to_string(),
        };
        let run_id = runs.create_run(&criteria, 5, 1, 3).await.unwrap();

        let worker_id = Uuid::new_v4();
        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id,
            name: "Stale Co".to_string(),
            website: "https://stale.co".to_string(),
            domain: "stale.co".to_string(),
            state: Some("CO".to_string()),
            description: None,
            discovery_source: "seed:catalog".to_string(),
            pms_detected: Some("Buildium".to_string()),
            units_estimate: Some(80),
            evidence: None,
            status: CandidateStatus::Validated,
            meets_all_requirements: Some(true),
            rejected_reasons: None,
            idempotency_key: Some("stale.co".to_string()),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };
        companies.insert_candidate(&candidate).await.unwrap();
        companies.claim_for_research(run_id, worker_id, 600).await.unwrap();

        let stale_heartbeat = WorkerHeartbeat {
            worker_id,
            role: WorkerRole::Research,
            status: WorkerStatus::Processing,
            current_run_id: Some(run_id),
            current_task: None,
            lease_expires_at: None,
            last_heartbeat_at: Utc::now() - chrono::Duration::seconds(600),
            started_at: Utc::now() - chrono::Duration::seconds(700),
            metadata: None,
        };
        workers.upsert_heartbeat(&stale_heartbeat).await.unwrap();

        let summary = sweep_once(
            &store,
            None,
            &SweepConfig {
                dead_worker_threshold: 300,
                stopped_retention_seconds: 86_400,
                alert_email: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(summary.dead_workers_found, 1);
        assert_eq!(summary.leases_released_for, 1);

        let reclaimed = companies.claim_for_research(run_id, Uuid::new_v4(), 600).await.unwrap();
        assert!(reclaimed.is_claimed());
    }

    #[tokio::test]
    async fn sweep_purges_stale_stopped_heartbeats() {
        let store = memory_store().await;
        let workers = WorkerRepository::new(store.connection().unwrap());

        let worker_id = Uuid::new_v4();
        let stopped = WorkerHeartbeat {
            worker_id,
            role: WorkerRole::Discovery,
            status: WorkerStatus::Stopped,
            current_run_id: None,
            current_task: None,
            lease_expires_at: None,
            last_heartbeat_at: Utc::now() - chrono::Duration::seconds(200_000),
            started_at: Utc::now() - chrono::Duration::seconds(300_000),
            metadata: None,
        };
        workers.upsert_heartbeat(&stopped).await.unwrap();

        let summary = sweep_once(
            &store,
            None,
            &SweepConfig {
                dead_worker_threshold: 300,
                stopped_retention_seconds: 86_400,
                alert_email: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(summary.stopped_heartbeats_purged, 1);
    }
}
