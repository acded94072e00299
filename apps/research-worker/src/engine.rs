// [apps/research-worker/src/engine.rs]
/*!
 * APARATO: MOTOR DE ITERACIÓN DEL RESEARCH WORKER
 * RESPONSABILIDAD: UNA ITERACIÓN COMPLETA DEL LAZO DE INVESTIGACIÓN —
 * RECLAMAR UNA EMPRESA, ENRIQUECERLA BAJO EL AGENTE, LIBERAR EL LEASE
 * Y DECIDIR SI LA ETAPA AVANZA A `contact_discovery`
 *
 * El motor nunca mata un run por una falla de investigación: una
 * empresa atascada queda con `research.status=failed` y se anota en
 * las notas del run; el worker sigue con la siguiente candidata.
 */

use std::sync::Arc;

use chrono::Utc;
use leadgen_domain_agent_contract::{AgentRequest, AgentRole, ResearchAgentOutput};
use leadgen_domain_models::{ClaimOutcome, CompanyCandidate, CompanyResearch, ResearchStatus, Run, Stage};
use leadgen_core_retry::{retry, RetryPolicy};
use leadgen_infra_store::{CompanyRepository, ResearchRepository, RunRepository, StoreClient};
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent_port::ResearchAgentPort;
use crate::errors::WorkerError;

#[derive(Debug, PartialEq, Eq)]
pub enum IterationOutcome {
    Idle,
    ShouldExit,
    Progressed,
}

pub struct ResearchEngineConfig {
    pub worker_id: Uuid,
    pub lease_seconds: i64,
    pub run_filter_id: Option<Uuid>,
}

enum Selected {
    Run(Run),
    FilteredRunTerminal,
    None,
}

fn select_run(candidates: Vec<Run>, run_filter_id: Option<Uuid>) -> Selected {
    match run_filter_id {
        Some(id) => match candidates.into_iter().find(|run| run.id == id) {
            Some(run) => Selected::Run(run),
            None => Selected::FilteredRunTerminal,
        },
        None => candidates.into_iter().next().map(Selected::Run).unwrap_or(Selected::None),
    }
}

pub async fn run_iteration(
    store: &StoreClient,
    agent: &Arc<dyn ResearchAgentPort>,
    config: &ResearchEngineConfig,
) -> Result<IterationOutcome, WorkerError> {
    let connection = store.connection()?;
    let runs = RunRepository::new(connection.clone());
    let companies = CompanyRepository::new(connection.clone());
    let research = ResearchRepository::new(connection);

    let candidates = runs.list_active_runs(Some(Stage::Research)).await?;
    let run = match select_run(candidates, config.run_filter_id) {
        Selected::Run(run) => run,
        Selected::FilteredRunTerminal => return Ok(IterationOutcome::ShouldExit),
        Selected::None => return Ok(IterationOutcome::Idle),
    };

    process_run(&runs, &companies, &research, agent, config, run).await
}

async fn process_run(
    runs: &RunRepository,
    companies: &CompanyRepository,
    research: &ResearchRepository,
    agent: &Arc<dyn ResearchAgentPort>,
    config: &ResearchEngineConfig,
    run: Run,
) -> Result<IterationOutcome, WorkerError> {
    let claim = companies.claim_for_research(run.id, config.worker_id, config.lease_seconds).await?;

    let company = match claim {
        ClaimOutcome::Claimed(company) => company,
        ClaimOutcome::None => {
            if !research.has_pending_research(run.id).await? {
                runs.set_stage(run.id, Stage::ContactDiscovery).await?;
                info!(run_id = %run.id, "research queue drained, stage advanced to contact_discovery");
                return Ok(IterationOutcome::Progressed);
            }
            return Ok(IterationOutcome::Idle);
        }
    };

    let outcome = research_company(companies, research, agent, &run, &company).await;

    companies.release_lease(company.id).await?;

    outcome.map(|()| IterationOutcome::Progressed)
}

fn build_prompt(run: &Run, company: &CompanyCandidate) -> String {
    format!(
        "Research {name} ({website}, domain {domain}) against this criterion: PMS={pms:?}, \
         geography={geography:?}, units_min={units_min:?}. Confirm units under management, the \
         property management system in use, headquarters location, founding year, property mix \
         and states of operation. Set meets_all_requirements=false with a stated disqualifier only \
         when the company clearly fails the criterion; otherwise leave it true.",
        name = company.name,
        website = company.website,
        domain = company.domain,
        pms = run.criteria.pms,
        geography = run.criteria.geography,
        units_min = run.criteria.units_min,
    )
}

async fn research_company(
    companies: &CompanyRepository,
    research: &ResearchRepository,
    agent: &Arc<dyn ResearchAgentPort>,
    run: &Run,
    company: &CompanyCandidate,
) -> Result<(), WorkerError> {
    let request = AgentRequest {
        prompt: build_prompt(run, company),
        role: AgentRole::ResearchAgent,
        schema_name: "ResearchAgentOutput",
    };

    let agent_ref = agent.clone();
    let call_request = request.clone();
    let outcome = retry(RetryPolicy::for_agent(), "research_agent_invoke", move || {
        let agent_ref = agent_ref.clone();
        let request = call_request.clone();
        async move { agent_ref.research(request).await }
    })
    .await;

    match outcome {
        Ok(response) => {
            let output: ResearchAgentOutput = response.structured;
            let row = CompanyResearch {
                id: Uuid::new_v4(),
                run_id: run.id,
                company_id: company.id,
                status: ResearchStatus::Complete,
                facts: Some(serde_json::to_value(&output.facts).map_err(|e| leadgen_infra_store::StoreError::MappingError(e.to_string()))?),
                signals: Some(serde_json::to_value(&output.signals).map_err(|e| leadgen_infra_store::StoreError::MappingError(e.to_string()))?),
                confidence: Some(output.confidence),
                units_under_management: output.facts.units_under_management,
                pms_detected: output.facts.pms_detected.clone(),
                meets_all_requirements: Some(output.meets_all_requirements),
                disqualifier: output.disqualifier.clone(),
                researched_at: Some(Utc::now()),
            };
            research.upsert_research(&row).await?;

            if !output.meets_all_requirements {
                if let Some(reason) = output.disqualifier {
                    companies.reject_candidate(company.id, &reason).await?;
                    info!(run_id = %run.id, company_id = %company.id, reason = %reason, "candidate rejected by research");
                }
            }
            Ok(())
        }
        Err(error) => {
            warn!(run_id = %run.id, company_id = %company.id, error = %error, "research agent exhausted retries");
            let previous = research.get_research(run.id, company.id).await?;
            let row = CompanyResearch {
                id: previous.as_ref().map(|r| r.id).unwrap_or_else(Uuid::new_v4),
                run_id: run.id,
                company_id: company.id,
                status: ResearchStatus::Failed,
                facts: previous.as_ref().and_then(|r| r.facts.clone()),
                signals: previous.as_ref().and_then(|r| r.signals.clone()),
                confidence: previous.as_ref().and_then(|r| r.confidence),
                units_under_management: previous.as_ref().and_then(|r| r.units_under_management),
                pms_detected: previous.as_ref().and_then(|r| r.pms_detected.clone()),
                meets_all_requirements: None,
                disqualifier: None,
                researched_at: None,
            };
            let already_failed = previous.as_ref().map(|r| r.status == ResearchStatus::Failed).unwrap_or(false);
            research.upsert_research(&row).await?;
            if already_failed {
                warn!(run_id = %run.id, company_id = %company.id, "company stuck in research after repeated failures");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_run_prefers_filtered_run_when_present() {
        let run = sample_run();
        let id = run.id;
        let result = select_run(vec![run], Some(id));
        assert!(matches!(result, Selected::Run(r) if r.id == id));
    }

    #[test]
    fn select_run_exits_when_filtered_run_absent() {
        let result = select_run(Vec::new(), Some(Uuid::new_v4()));
        assert!(matches!(result, Selected::FilteredRunTerminal));
    }

    #[test]
    fn select_run_idles_with_no_candidates_and_no_filter() {
        let result = select_run(Vec::new(), None);
        assert!(matches!(result, Selected::None));
    }

    fn sample_run() -> Run {
        Run {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            criteria: leadgen_domain_models::RunCriteria {
                pms: None,
                geography: leadgen_domain_models::Geography::default(),
                units_min: None,
                target_distribution: None,
                notification_email: "ops@example.com".to_string(),
            },
            target_quantity: 10,
            contacts_min: 1,
            contacts_max: 3,
            stage: Stage::Research,
            status: leadgen_domain_models::RunStatus::Active,
            notes: String::new(),
        }
    }
}
