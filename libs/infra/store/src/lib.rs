// [libs/infra/store/src/lib.rs]
/*!
 * =================================================================
 * CRATE: leadgen-infra-store
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EL RUN STORE — ÚNICA FUENTE DE VERDAD DEL PIPELINE
 *
 * Todo worker coordina exclusivamente a través de este crate: no hay
 * canal en memoria ni cola externa. Un Run, sus candidatos de empresa,
 * su investigación, sus candidatos de contacto, los latidos de los
 * workers y el conjunto de dominios suprimidos viven todos en las
 * tablas que `schema` declara, detrás de los repositorios que este
 * módulo reexporta.
 * =================================================================
 */

mod client;
mod errors;
mod gap_views;
mod repositories;
mod schema;

pub use client::StoreClient;
pub use errors::StoreError;
pub use gap_views::GapViews;
pub use repositories::{
    CompanyRepository, ContactRepository, ResearchRepository, RunRepository, SeedCatalogRepository, SeedCompany,
    SuppressionRepository, WorkerRepository,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadgen_domain_models::{CandidateStatus, CompanyCandidate, Geography, RunCriteria};
    use uuid::Uuid;

    async fn memory_store() -> StoreClient {
        StoreClient::connect("file::memory:", None)
            .await
            .expect("in-memory store should bootstrap schema")
    }

    fn sample_criteria() -> RunCriteria {
        RunCriteria {
            pms: Some("AppFolio".to_string()),
            geography: Geography {
                state: Some("TX".to_string()),
                city: None,
            },
            units_min: Some(50),
            target_distribution: None,
            notification_email: "ops@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_run_round_trips() {
        let store = memory_store().await;
        let runs = RunRepository::new(store.connection().unwrap());

        let run_id = runs.create_run(&sample_criteria(), 10, 1, 3).await.unwrap();
        let run = runs.get_run(run_id).await.unwrap();

        assert_eq!(run.target_quantity, 10);
        assert_eq!(run.contacts_min, 1);
        assert_eq!(run.contacts_max, 3);
        assert_eq!(run.stage.as_str(), "discovery");
    }

    #[tokio::test]
    async fn duplicate_domain_is_ignored_not_errored() {
        let store = memory_store().await;
        let runs = RunRepository::new(store.connection().unwrap());
        let companies = CompanyRepository::new(store.connection().unwrap());

        let run_id = runs.create_run(&sample_criteria(), 10, 1, 3).await.unwrap();

        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id,
            name: "Acme Property Management".to_string(),
            website: "https://acmepm.com".to_string(),
            domain: "acmepm.com".to_string(),
            state: Some("TX".to_string()),
            description: None,
            discovery_source: "agent".to_string(),
            pms_detected: Some("AppFolio".to_string()),
            units_estimate: Some(200),
            evidence: None,
            status: CandidateStatus::Candidate,
            meets_all_requirements: None,
            rejected_reasons: None,
            idempotency_key: Some("acmepm.com".to_string()),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };

        let first = companies.insert_candidate(&candidate).await.unwrap();
        assert!(first.was_inserted());

        let duplicate = CompanyCandidate {
            id: Uuid::new_v4(),
            ..candidate
        };
        let second = companies.insert_candidate(&duplicate).await.unwrap();
        assert!(!second.was_inserted());
        assert_eq!(companies.count_ready(run_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn claim_for_research_is_exclusive_across_workers() {
        let store = memory_store().await;
        let runs = RunRepository::new(store.connection().unwrap());
        let companies = CompanyRepository::new(store.connection().unwrap());

        let run_id = runs.create_run(&sample_criteria(), 10, 1, 3).await.unwrap();
        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id,
            name: "Validated Holdings".to_string(),
            website: "https://validatedholdings.com".to_string(),
            domain: "validatedholdings.com".to_string(),
            state: Some("TX".to_string()),
            description: None,
            discovery_source: "seed_catalog".to_string(),
            pms_detected: Some("AppFolio".to_string()),
            units_estimate: Some(300),
            evidence: None,
            status: CandidateStatus::Validated,
            meets_all_requirements: Some(true),
            rejected_reasons: None,
            idempotency_key: Some("validatedholdings.com".to_string()),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };
        companies.insert_candidate(&candidate).await.unwrap();

        let worker_a = Uuid::new_v4();
        let worker_b = Uuid::new_v4();

        let claimed = companies.claim_for_research(run_id, worker_a, 300).await.unwrap();
        assert!(claimed.is_claimed());

        let contested = companies.claim_for_research(run_id, worker_b, 300).await.unwrap();
        assert!(!contested.is_claimed());
    }

    #[tokio::test]
    async fn gap_views_reflect_ready_counts() {
        let store = memory_store().await;
        let runs = RunRepository::new(store.connection().unwrap());
        let companies = CompanyRepository::new(store.connection().unwrap());
        let gap_views = GapViews::new(store.connection().unwrap());

        let run_id = runs.create_run(&sample_criteria(), 3, 1, 3).await.unwrap();
        let gap = gap_views.company_gap(run_id).await.unwrap();
        assert_eq!(gap.companies_gap, 3);

        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id,
            name: "Promoted Co".to_string(),
            website: "https://promotedco.com".to_string(),
            domain: "promotedco.com".to_string(),
            state: Some("TX".to_string()),
            description: None,
            discovery_source: "agent".to_string(),
            pms_detected: Some("AppFolio".to_string()),
            units_estimate: Some(150),
            evidence: None,
            status: CandidateStatus::Promoted,
            meets_all_requirements: Some(true),
            rejected_reasons: None,
            idempotency_key: Some("promotedco.com".to_string()),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };
        companies.insert_candidate(&candidate).await.unwrap();

        let gap = gap_views.company_gap(run_id).await.unwrap();
        assert_eq!(gap.companies_gap, 2);
    }
}
