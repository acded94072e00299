// [apps/discovery-worker/src/engine.rs]
/*!
 * APARATO: MOTOR DEL DISCOVERY WORKER
 * RESPONSABILIDAD: EL CICLO DE NUEVE PASOS QUE LLENA LA ETAPA `discovery`
 *
 * Cada llamada a `run_iteration` procesa como máximo un run: elige uno
 * elegible, lo siembra desde el catálogo, abanica al Agente por región
 * bajo el Arnés de Reintentos, deduplica contra la Supresión y transiciona
 * cuando el objetivo final está cubierto. El resto del proceso (ticker
 * de heartbeat, bucle externo, señal de apagado) vive en `main.rs`.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use leadgen_core_gap_math::discovery_target as compute_discovery_target;
use leadgen_core_retry::{retry, RetryPolicy};
use leadgen_domain_agent_contract::{AgentRequest, AgentRole, DiscoveredCompany};
use leadgen_domain_models::{CandidateStatus, CompanyCandidate, Run, RunStatus, Stage};
use leadgen_infra_agent_client::CrmSuppressionSource;
use leadgen_infra_store::{CompanyRepository, GapViews, RunRepository, SeedCatalogRepository, StoreClient, SuppressionRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent_port::DiscoveryAgentPort;
use crate::errors::WorkerError;
use crate::regions::{partition_geography, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// No había runs elegibles; el llamador debería dormir `worker_poll_interval`.
    Idle,
    /// El run filtrado ya alcanzó un estado terminal; el worker debe salir.
    ShouldExit,
    /// Se procesó un run (avanzó, se sembró, o se registraron fallas parciales).
    Progressed,
}

pub struct DiscoveryEngineConfig {
    pub oversample_factor: f64,
    pub region_count: u32,
    /// Tope por llamada al Agente dentro de una región; 0 desactiva el
    /// baching y pide el objetivo completo de la región en una sola
    /// llamada (§4.8).
    pub batch_size: u32,
    pub run_filter_id: Option<Uuid>,
}

/// Ejecuta una iteración del bucle de descubrimiento contra como máximo
/// un run elegible.
pub async fn run_iteration(
    store: &StoreClient,
    agent: &Arc<dyn DiscoveryAgentPort>,
    crm: &Arc<dyn CrmSuppressionSource>,
    config: &DiscoveryEngineConfig,
) -> Result<IterationOutcome, WorkerError> {
    let connection = store.connection()?;
    let runs = RunRepository::new(connection.clone());

    let candidates = runs.list_active_runs(Some(Stage::Discovery)).await?;
    let run = match select_run(candidates, config.run_filter_id) {
        Selected::Run(run) => run,
        Selected::FilteredRunTerminal => return Ok(IterationOutcome::ShouldExit),
        Selected::None => return Ok(IterationOutcome::Idle),
    };

    process_run(store, agent, crm, config, &run).await?;
    Ok(IterationOutcome::Progressed)
}

enum Selected {
    Run(Run),
    FilteredRunTerminal,
    None,
}

fn select_run(candidates: Vec<Run>, run_filter_id: Option<Uuid>) -> Selected {
    match run_filter_id {
        Some(filter_id) => match candidates.into_iter().find(|run| run.id == filter_id) {
            Some(run) if run.status.is_terminal() => Selected::FilteredRunTerminal,
            Some(run) => Selected::Run(run),
            None => Selected::FilteredRunTerminal,
        },
        None => candidates.into_iter().next().map(Selected::Run).unwrap_or(Selected::None),
    }
}

async fn process_run(
    store: &StoreClient,
    agent: &Arc<dyn DiscoveryAgentPort>,
    crm: &Arc<dyn CrmSuppressionSource>,
    config: &DiscoveryEngineConfig,
    run: &Run,
) -> Result<(), WorkerError> {
    let connection = store.connection()?;
    let runs = RunRepository::new(connection.clone());
    let companies = CompanyRepository::new(connection.clone());
    let gap_views = GapViews::new(connection.clone());

    let final_target = run.target_quantity;
    let target = compute_discovery_target(final_target, config.oversample_factor);
    let company_gap = gap_views.company_gap(run.id).await?;

    if company_gap.companies_ready >= target {
        return transition_if_satisfied(&runs, &gap_views, run.id, final_target).await;
    }

    seed_from_catalog(store, run, &companies).await?;

    let company_gap_after_seed = gap_views.company_gap(run.id).await?;
    if company_gap_after_seed.companies_ready >= target {
        return transition_if_satisfied(&runs, &gap_views, run.id, final_target).await;
    }

    let regions = partition_geography(&run.criteria, config.region_count, target);
    let (companies_found, failed_regions) = fan_out_regions(agent, run, &regions, config.batch_size).await;

    let suppressed = union_suppressed_domains(store, crm).await?;
    ingest_companies(&companies, run.id, companies_found, &suppressed, run.criteria.pms.as_deref()).await?;

    if !failed_regions.is_empty() {
        let marker = format!("discovery regions failed after retries: {}", failed_regions.join(", "));
        runs.append_notes(run.id, &marker).await?;
    }

    // hard-zero: no companies at all after seeding and every region's
    // retries, regardless of whether any individual region errored or
    // merely reported an empty `companies` list (§4.4, §8).
    let gap_after_ingest = gap_views.company_gap(run.id).await?;
    if gap_after_ingest.companies_ready == 0 {
        runs.set_status(run.id, RunStatus::Error, Some("discovery found zero companies after seeding and all regions")).await?;
        warn!(run_id = %run.id, "hard-zero discovery, run marked error");
        return Ok(());
    }

    transition_if_satisfied(&runs, &gap_views, run.id, final_target).await
}

async fn transition_if_satisfied(
    runs: &RunRepository,
    gap_views: &GapViews,
    run_id: Uuid,
    final_target: u32,
) -> Result<(), WorkerError> {
    let gap = gap_views.company_gap(run_id).await?;
    if gap.companies_ready >= final_target {
        runs.set_stage(run_id, Stage::Research).await?;
        info!(run_id = %run_id, "discovery satisfied, advancing to research");
    }
    Ok(())
}

async fn seed_from_catalog(store: &StoreClient, run: &Run, companies: &CompanyRepository) -> Result<(), WorkerError> {
    let Some(pms) = run.criteria.pms.as_deref() else {
        return Ok(());
    };
    let connection = store.connection()?;
    let seed_catalog = SeedCatalogRepository::new(connection);

    let seeds = seed_catalog
        .matching(pms, run.criteria.geography.state.as_deref(), run.criteria.geography.city.as_deref())
        .await?;

    for seed in seeds {
        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id: run.id,
            name: seed.name,
            website: seed.website.clone(),
            domain: CompanyCandidate::normalize_domain(&seed.domain),
            state: seed.state,
            description: None,
            discovery_source: format!("seed:{}", seed.pms),
            pms_detected: Some(seed.pms),
            units_estimate: seed.units_estimate,
            evidence: None,
            status: CandidateStatus::Validated,
            meets_all_requirements: None,
            rejected_reasons: None,
            idempotency_key: Some(CompanyCandidate::normalize_domain(&seed.domain)),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };
        companies.insert_candidate(&candidate).await?;
    }
    Ok(())
}

struct RegionOutcome {
    region_name: String,
    companies: Vec<DiscoveredCompany>,
    failed: bool,
}

/// Una empresa descubierta por el Agente, etiquetada con la región que
/// la produjo, para que `discovery_source` pueda preservar el origen
/// (`agent:region:<name>`) hasta el momento de la inserción (§4.4 paso 8).
struct RegionTaggedCompany {
    region_name: String,
    company: DiscoveredCompany,
}

const REGION_RETRY_BACKOFFS: &[Duration] = &[Duration::from_secs(30), Duration::from_secs(60)];
const REGION_TIMEOUT: Duration = Duration::from_secs(15 * 60);

async fn fan_out_regions(
    agent: &Arc<dyn DiscoveryAgentPort>,
    run: &Run,
    regions: &[Region],
    batch_size: u32,
) -> (Vec<RegionTaggedCompany>, Vec<String>) {
    fn tag_outcome(companies: &mut Vec<RegionTaggedCompany>, outcome: RegionOutcome) {
        let region_name = outcome.region_name;
        companies.extend(
            outcome
                .companies
                .into_iter()
                .map(|company| RegionTaggedCompany { region_name: region_name.clone(), company }),
        );
    }

    let first_pass = join_all(regions.iter().map(|region| call_region(agent.clone(), run, region, batch_size))).await;

    let mut companies = Vec::new();
    let mut outstanding: Vec<Region> = Vec::new();
    for (region, outcome) in regions.iter().zip(first_pass.into_iter()) {
        if outcome.failed {
            outstanding.push(region.clone());
        } else {
            tag_outcome(&mut companies, outcome);
        }
    }

    for backoff in REGION_RETRY_BACKOFFS {
        if outstanding.is_empty() {
            break;
        }
        tokio::time::sleep(*backoff).await;
        let retry_pass = join_all(outstanding.iter().map(|region| call_region(agent.clone(), run, region, batch_size))).await;
        let mut still_failing = Vec::new();
        for (region, outcome) in outstanding.iter().zip(retry_pass.into_iter()) {
            if outcome.failed {
                still_failing.push(region.clone());
            } else {
                tag_outcome(&mut companies, outcome);
            }
        }
        outstanding = still_failing;
    }

    let failed_region_names = outstanding.into_iter().map(|region| region.name).collect();
    (companies, failed_region_names)
}

fn build_region_prompt(run: &Run, region: &Region, found_so_far: u32, ask_for: u32) -> String {
    format!(
        "find candidate companies matching pms={:?} units_min={:?}, restricted to {} ({}); \
         total target for this region = {}; we have {found_so_far} of {target} so far, find the \
         next {ask_for}; never fetch contacts; consult the suppression list once.",
        run.criteria.pms,
        run.criteria.units_min,
        region.name,
        region.narrative_focus,
        region.per_region_target,
        target = region.per_region_target,
    )
}

async fn invoke_discovery_agent(
    agent: &Arc<dyn DiscoveryAgentPort>,
    prompt: String,
) -> Result<Vec<DiscoveredCompany>, leadgen_infra_agent_client::AgentClientError> {
    let request = AgentRequest {
        prompt,
        role: AgentRole::ListAgent,
        schema_name: "DiscoveryAgentOutput",
    };

    let policy = RetryPolicy::for_agent();
    let agent = agent.clone();
    let call = move || {
        let agent = agent.clone();
        let request = request.clone();
        async move { agent.discover(request).await }
    };

    let response = retry(policy, "discovery_agent_invoke", call).await?;

    // after every attempt (success or failure) settle the gateway session
    tokio::time::sleep(Duration::from_millis(250)).await;

    Ok(response.structured.companies)
}

/// Una región entera, bajo un único timeout de pared. Si `batch_size`
/// es 0 pide el objetivo completo en una sola llamada; de lo contrario
/// pide en tandas de a lo sumo `batch_size`, deteniéndose en cuanto una
/// tanda regresa menos de lo pedido (la región está agotada) o el
/// objetivo se alcanza — cada tanda es un checkpoint implícito, no hay
/// reintento de "lo que falta" a través de llamadas distintas dentro de
/// la misma región aparte del que ya aplica el Arnés de Reintentos.
async fn call_region(agent: Arc<dyn DiscoveryAgentPort>, run: &Run, region: &Region, batch_size: u32) -> RegionOutcome {
    let region_name = region.name.clone();

    let body = async {
        if batch_size == 0 {
            let prompt = build_region_prompt(run, region, 0, region.per_region_target);
            return invoke_discovery_agent(&agent, prompt).await;
        }

        let mut companies = Vec::new();
        loop {
            let found_so_far = companies.len() as u32;
            if found_so_far >= region.per_region_target {
                break;
            }
            let ask_for = (region.per_region_target - found_so_far).min(batch_size);
            let prompt = build_region_prompt(run, region, found_so_far, ask_for);
            let batch = invoke_discovery_agent(&agent, prompt).await?;
            let got = batch.len() as u32;
            companies.extend(batch);
            if got < ask_for {
                // the region is exhausted: the Agent couldn't fill the batch
                break;
            }
        }
        Ok(companies)
    };

    match tokio::time::timeout(REGION_TIMEOUT, body).await {
        Ok(Ok(companies)) => RegionOutcome { region_name, companies, failed: false },
        Ok(Err(error)) => {
            warn!(region = %region_name, error = %error, "region discovery call exhausted retries");
            RegionOutcome { region_name, companies: Vec::new(), failed: true }
        }
        Err(_) => {
            warn!(region = %region_name, "region discovery call timed out");
            RegionOutcome { region_name, companies: Vec::new(), failed: true }
        }
    }
}

async fn union_suppressed_domains(
    store: &StoreClient,
    crm: &Arc<dyn CrmSuppressionSource>,
) -> Result<HashSet<String>, WorkerError> {
    let connection = store.connection()?;
    let mut domains = SuppressionRepository::new(connection).list_suppressed_domains().await?;
    match crm.suppressed_domains().await {
        Ok(crm_domains) => domains.extend(crm_domains),
        Err(error) => warn!(error = %error, "CRM suppression lookup failed, proceeding with internal set only"),
    }
    Ok(domains)
}

/// Verdadero si el PMS detectado no contradice el criterio del Run. Sin
/// criterio de PMS, o sin PMS detectado todavía, no hay base para
/// rechazar (la investigación lo confirmará más adelante); solo un
/// `pms_detected` explícito y distinto (insensible a mayúsculas) cuenta
/// como desacuerdo (§8, caso límite de PMS).
fn pms_mismatch(required_pms: Option<&str>, detected_pms: Option<&str>) -> bool {
    match (required_pms, detected_pms) {
        (Some(required), Some(detected)) => !required.eq_ignore_ascii_case(detected),
        _ => false,
    }
}

/// Deduplica por dominio normalizado (quedándose con el mayor
/// `quality_score`), descarta cualquier dominio suprimido, e inserta
/// idempotentemente el resto: `status=validated`, salvo que su
/// `pms_detected` contradiga `criteria.pms`, en cuyo caso se inserta
/// `status=rejected` en lugar de filtrarse en silencio, preservando el
/// registro para auditoría.
async fn ingest_companies(
    companies: &CompanyRepository,
    run_id: Uuid,
    discovered: Vec<RegionTaggedCompany>,
    suppressed: &HashSet<String>,
    required_pms: Option<&str>,
) -> Result<u32, WorkerError> {
    let mut best_by_domain: HashMap<String, RegionTaggedCompany> = HashMap::new();
    for tagged in discovered {
        let normalized = CompanyCandidate::normalize_domain(&tagged.company.domain);
        if suppressed.contains(&normalized) {
            continue;
        }
        match best_by_domain.get(&normalized) {
            Some(existing) if existing.company.quality_score.unwrap_or(0.0) >= tagged.company.quality_score.unwrap_or(0.0) => {}
            _ => {
                best_by_domain.insert(normalized, tagged);
            }
        }
    }

    let mut inserted = 0;
    for (normalized_domain, tagged) in best_by_domain {
        let RegionTaggedCompany { region_name, company } = tagged;

        let (status, rejected_reasons) = if pms_mismatch(required_pms, company.pms.as_deref()) {
            (
                CandidateStatus::Rejected,
                Some(format!(
                    "pms_detected {:?} does not match criteria pms {:?}",
                    company.pms, required_pms
                )),
            )
        } else {
            (CandidateStatus::Validated, None)
        };

        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id,
            name: company.name,
            website: company.website,
            domain: normalized_domain.clone(),
            state: company.state,
            description: company.evidence,
            discovery_source: format!("agent:region:{region_name}"),
            pms_detected: company.pms,
            units_estimate: company.units,
            evidence: None,
            status,
            meets_all_requirements: None,
            rejected_reasons,
            idempotency_key: Some(normalized_domain),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };
        if companies.insert_candidate(&candidate).await?.was_inserted() {
            inserted += 1;
        }
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_infra_store::CompanyRepository;

    fn discovered(name: &str, domain: &str, quality_score: f64) -> DiscoveredCompany {
        DiscoveredCompany {
            name: name.to_string(),
            domain: domain.to_string(),
            website: format!("https://{domain}"),
            state: None,
            pms: None,
            units: None,
            evidence: None,
            quality_score: Some(quality_score),
        }
    }

    fn tagged(region_name: &str, company: DiscoveredCompany) -> RegionTaggedCompany {
        RegionTaggedCompany { region_name: region_name.to_string(), company }
    }

    #[test]
    fn select_run_returns_idle_when_no_candidates() {
        assert!(matches!(select_run(Vec::new(), None), Selected::None));
    }

    #[test]
    fn select_run_exits_when_filtered_run_missing() {
        let filter = Uuid::new_v4();
        assert!(matches!(select_run(Vec::new(), Some(filter)), Selected::FilteredRunTerminal));
    }

    #[tokio::test]
    async fn ingest_deduplicates_by_domain_keeping_highest_quality() {
        let store = StoreClient::connect("file::memory:", None).await.unwrap();
        let connection = store.connection().unwrap();
        let companies = CompanyRepository::new(connection);
        let run_id = Uuid::new_v4();

        let discovered = vec![
            tagged("region-a", discovered("Acme PM", "https://www.Acme.com/", 0.4)),
            tagged("region-b", discovered("Acme Property Management", "acme.com", 0.9)),
        ];

        let inserted = ingest_companies(&companies, run_id, discovered, &HashSet::new(), None).await.unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(companies.count_ready(run_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ingest_drops_suppressed_domains() {
        let store = StoreClient::connect("file::memory:", None).await.unwrap();
        let connection = store.connection().unwrap();
        let companies = CompanyRepository::new(connection);
        let run_id = Uuid::new_v4();

        let mut suppressed = HashSet::new();
        suppressed.insert("blocked.com".to_string());

        let inserted = ingest_companies(
            &companies,
            run_id,
            vec![tagged("region-a", discovered("Blocked Co", "blocked.com", 0.9))],
            &suppressed,
            None,
        )
        .await
        .unwrap();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn ingest_preserves_region_tag_in_discovery_source() {
        let store = StoreClient::connect("file::memory:", None).await.unwrap();
        let connection = store.connection().unwrap();
        let companies = CompanyRepository::new(connection);
        let run_id = Uuid::new_v4();

        let inserted = ingest_companies(
            &companies,
            run_id,
            vec![tagged("Boulder", discovered("Acme PM", "acme.com", 0.9))],
            &HashSet::new(),
            None,
        )
        .await
        .unwrap();
        assert_eq!(inserted, 1);

        let ready = companies.list_ready(run_id).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].discovery_source, "agent:region:Boulder");
    }

    #[tokio::test]
    async fn ingest_rejects_companies_whose_pms_does_not_match_criteria() {
        let store = StoreClient::connect("file::memory:", None).await.unwrap();
        let connection = store.connection().unwrap();
        let companies = CompanyRepository::new(connection);
        let run_id = Uuid::new_v4();

        let mut mismatched = discovered("Wrong PMS Co", "wrongpms.com", 0.9);
        mismatched.pms = Some("Yardi".to_string());

        let inserted = ingest_companies(
            &companies,
            run_id,
            vec![tagged("region-a", mismatched)],
            &HashSet::new(),
            Some("Buildium"),
        )
        .await
        .unwrap();

        // inserted as a row (idempotent insert succeeded) but rejected,
        // so it never counts toward "companies ready".
        assert_eq!(inserted, 1);
        assert_eq!(companies.count_ready(run_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ingest_keeps_companies_with_unknown_pms_when_criteria_names_one() {
        let store = StoreClient::connect("file::memory:", None).await.unwrap();
        let connection = store.connection().unwrap();
        let companies = CompanyRepository::new(connection);
        let run_id = Uuid::new_v4();

        let unknown_pms = discovered("Unconfirmed Co", "unconfirmed.com", 0.9);

        let inserted = ingest_companies(
            &companies,
            run_id,
            vec![tagged("region-a", unknown_pms)],
            &HashSet::new(),
            Some("Buildium"),
        )
        .await
        .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(companies.count_ready(run_id).await.unwrap(), 1);
    }

    struct BatchingMockAgent {
        batches: std::sync::Mutex<std::collections::VecDeque<Vec<DiscoveredCompany>>>,
        calls_made: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl crate::agent_port::DiscoveryAgentPort for BatchingMockAgent {
        async fn discover(
            &self,
            _request: AgentRequest,
        ) -> Result<leadgen_domain_agent_contract::AgentResponse<leadgen_domain_agent_contract::DiscoveryAgentOutput>, leadgen_infra_agent_client::AgentClientError>
        {
            self.calls_made.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            let companies = self.batches.lock().unwrap().pop_front().unwrap_or_default();
            Ok(leadgen_domain_agent_contract::AgentResponse {
                structured: leadgen_domain_agent_contract::DiscoveryAgentOutput {
                    companies,
                    metadata: leadgen_domain_agent_contract::DiscoveryMetadata { region_name: "test".to_string(), notes: None },
                },
                artifact_markdown: String::new(),
            })
        }
    }

    fn sample_run_for_region_tests() -> Run {
        Run {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            criteria: leadgen_domain_models::RunCriteria {
                pms: Some("Buildium".to_string()),
                geography: leadgen_domain_models::Geography::default(),
                units_min: None,
                target_distribution: None,
                notification_email: "ops@example.com".to_string(),
            },
            target_quantity: 5,
            contacts_min: 1,
            contacts_max: 3,
            stage: Stage::Discovery,
            status: RunStatus::Active,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn call_region_batches_until_target_reached() {
        let region = Region {
            name: "test region".to_string(),
            narrative_focus: "batching test".to_string(),
            state: None,
            city: None,
            per_region_target: 5,
        };
        let agent: Arc<dyn DiscoveryAgentPort> = Arc::new(BatchingMockAgent {
            batches: std::sync::Mutex::new(std::collections::VecDeque::from(vec![
                vec![discovered("A", "a.com", 0.5), discovered("B", "b.com", 0.5)],
                vec![discovered("C", "c.com", 0.5), discovered("D", "d.com", 0.5)],
                vec![discovered("E", "e.com", 0.5)],
            ])),
            calls_made: std::sync::atomic::AtomicUsize::new(0),
        });

        let run = sample_run_for_region_tests();
        let outcome = call_region(agent.clone(), &run, &region, 2).await;

        assert!(!outcome.failed);
        assert_eq!(outcome.companies.len(), 5);
    }

    #[tokio::test]
    async fn call_region_stops_batching_when_agent_returns_short_batch() {
        let region = Region {
            name: "test region".to_string(),
            narrative_focus: "exhaustion test".to_string(),
            state: None,
            city: None,
            per_region_target: 10,
        };
        let agent: Arc<dyn DiscoveryAgentPort> = Arc::new(BatchingMockAgent {
            batches: std::sync::Mutex::new(std::collections::VecDeque::from(vec![vec![discovered(
                "Only One",
                "only.com",
                0.5,
            )]])),
            calls_made: std::sync::atomic::AtomicUsize::new(0),
        });

        let run = sample_run_for_region_tests();
        let outcome = call_region(agent.clone(), &run, &region, 4).await;

        assert!(!outcome.failed);
        assert_eq!(outcome.companies.len(), 1);
    }

    #[tokio::test]
    async fn call_region_with_batch_size_zero_asks_once_for_full_target() {
        let region = Region {
            name: "test region".to_string(),
            narrative_focus: "single-shot test".to_string(),
            state: None,
            city: None,
            per_region_target: 5,
        };
        let agent = Arc::new(BatchingMockAgent {
            batches: std::sync::Mutex::new(std::collections::VecDeque::from(vec![vec![
                discovered("A", "a.com", 0.5),
                discovered("B", "b.com", 0.5),
            ]])),
            calls_made: std::sync::atomic::AtomicUsize::new(0),
        });
        let agent_dyn: Arc<dyn DiscoveryAgentPort> = agent.clone();

        let run = sample_run_for_region_tests();
        let outcome = call_region(agent_dyn, &run, &region, 0).await;

        assert!(!outcome.failed);
        assert_eq!(outcome.companies.len(), 2);
        assert_eq!(agent.calls_made.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
