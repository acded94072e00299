// [apps/contact-worker/src/engine.rs]
/*!
 * APARATO: MOTOR DE ITERACIÓN DEL CONTACT WORKER
 * RESPONSABILIDAD: UNA ITERACIÓN COMPLETA DEL LAZO DE CONTACTOS —
 * RECLAMAR UNA EMPRESA, DESCUBRIR DECISORES BAJO EL AGENTE, LIBERAR EL
 * LEASE, Y CERRAR EL RUN (ENTREGA) CUANDO LA BRECHA AGREGADA LLEGA A CERO
 */

use std::sync::Arc;

use chrono::Utc;
use leadgen_domain_agent_contract::{AgentRequest, AgentRole};
use leadgen_domain_delivery::ContactEvidence;
use leadgen_domain_models::{
    CandidateStatus, ClaimOutcome, CompanyCandidate, ContactCandidate, DecisionMarker, DecisionOption, Run, RunStatus, Stage,
};
use leadgen_core_retry::{retry, RetryPolicy};
use leadgen_infra_mailer::Mailer;
use leadgen_infra_store::{CompanyRepository, ContactRepository, GapViews, ResearchRepository, RunRepository, StoreClient};
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent_port::ContactAgentPort;
use crate::delivery;
use crate::errors::WorkerError;

#[derive(Debug, PartialEq, Eq)]
pub enum IterationOutcome {
    Idle,
    ShouldExit,
    Progressed,
}

pub struct ContactEngineConfig {
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
    agent: &Arc<dyn ContactAgentPort>,
    mailer: &Arc<Mailer>,
    config: &ContactEngineConfig,
) -> Result<IterationOutcome, WorkerError> {
    let connection = store.connection()?;
    let runs = RunRepository::new(connection.clone());
    let companies = CompanyRepository::new(connection.clone());
    let contacts = ContactRepository::new(connection.clone());
    let research = ResearchRepository::new(connection.clone());
    let gap_views = GapViews::new(connection);

    let candidates = runs.list_active_runs(Some(Stage::ContactDiscovery)).await?;
    let run = match select_run(candidates, config.run_filter_id) {
        Selected::Run(run) => run,
        Selected::FilteredRunTerminal => return Ok(IterationOutcome::ShouldExit),
        Selected::None => return Ok(IterationOutcome::Idle),
    };

    process_run(&runs, &companies, &contacts, &research, &gap_views, agent, mailer, config, run).await
}

#[allow(clippy::too_many_arguments)]
async fn process_run(
    runs: &RunRepository,
    companies: &CompanyRepository,
    contacts: &ContactRepository,
    research: &ResearchRepository,
    gap_views: &GapViews,
    agent: &Arc<dyn ContactAgentPort>,
    mailer: &Arc<Mailer>,
    config: &ContactEngineConfig,
    run: Run,
) -> Result<IterationOutcome, WorkerError> {
    let claim = companies.claim_for_contacts(run.id, config.worker_id, config.lease_seconds).await?;

    let progressed = match claim {
        ClaimOutcome::Claimed((company, needed)) => {
            let result = discover_contacts(contacts, agent, &run, &company, needed).await;
            companies.release_lease(company.id).await?;
            if let Err(error) = result {
                warn!(run_id = %run.id, company_id = %company.id, error = %error, "contact agent exhausted retries");
            }
            true
        }
        ClaimOutcome::None => false,
    };

    let gap = gap_views.contact_gap(run.id).await?;
    if gap.contacts_min_gap_total == 0 {
        finalize_completed_run(runs, companies, contacts, research, mailer, &run).await?;
        return Ok(IterationOutcome::Progressed);
    }

    if progressed {
        Ok(IterationOutcome::Progressed)
    } else {
        Ok(IterationOutcome::Idle)
    }
}

fn build_prompt(run: &Run, company: &CompanyCandidate, needed: u32) -> String {
    format!(
        "Find up to {needed} decision-makers (owners, executives, or property managers) at \
         {name} ({website}). For each contact, include a Markdown report with sections for \
         professional summary, personal anecdotes, professional anecdotes, sources, and gaps.",
        needed = needed,
        name = company.name,
        website = company.website,
    )
}

async fn discover_contacts(
    contacts: &ContactRepository,
    agent: &Arc<dyn ContactAgentPort>,
    run: &Run,
    company: &CompanyCandidate,
    needed: u32,
) -> Result<(), WorkerError> {
    let request = AgentRequest {
        prompt: build_prompt(run, company, needed),
        role: AgentRole::ContactAgent,
        schema_name: "ContactAgentOutput",
    };

    let agent_ref = agent.clone();
    let call_request = request.clone();
    let response = retry(RetryPolicy::for_agent(), "contact_agent_invoke", move || {
        let agent_ref = agent_ref.clone();
        let request = call_request.clone();
        async move { agent_ref.find_contacts(request).await }
    })
    .await?;

    for discovered in response.structured.contacts.into_iter().take(needed as usize) {
        let idempotency_key = ContactCandidate::derive_idempotency_key(&discovered.full_name, discovered.email.as_deref());
        let evidence = ContactEvidence {
            agent_output: Some(response.artifact_markdown.clone()),
            professional_summary: discovered.professional_summary.clone(),
            personal_anecdotes: discovered.personal_anecdotes.clone(),
            professional_anecdotes: discovered.professional_anecdotes.clone(),
            sources: discovered.sources.clone(),
            gaps: discovered.gaps.clone(),
        };

        let candidate = ContactCandidate {
            id: Uuid::new_v4(),
            run_id: run.id,
            company_id: company.id,
            full_name: discovered.full_name,
            title: discovered.title,
            email: discovered.email,
            linkedin_url: discovered.linkedin_url,
            department: None,
            seniority: None,
            quality_score: None,
            signals: None,
            evidence: Some(serde_json::to_value(&evidence).map_err(|e| leadgen_infra_store::StoreError::MappingError(e.to_string()))?),
            status: CandidateStatus::Validated,
            idempotency_key: Some(idempotency_key),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };

        contacts.insert_candidate(&candidate).await?;
    }

    Ok(())
}

async fn finalize_completed_run(
    runs: &RunRepository,
    companies: &CompanyRepository,
    contacts: &ContactRepository,
    research: &ResearchRepository,
    mailer: &Arc<Mailer>,
    run: &Run,
) -> Result<(), WorkerError> {
    if run.stage != Stage::Done {
        runs.set_stage(run.id, Stage::Done).await?;
    }
    if run.status != RunStatus::Completed {
        runs.set_status(run.id, RunStatus::Completed, None).await?;
    }

    info!(run_id = %run.id, "contact gap closed, run completed, triggering delivery");

    if let Err(error) = delivery::send_completion_export(
        companies,
        contacts,
        research,
        mailer,
        run.id,
        &run.criteria.notification_email,
    )
    .await
    {
        warn!(run_id = %run.id, error = %error, "delivery email failed, run stays completed");
        let note = format!("\ndelivery failed: {error}\n");
        let _ = runs.append_notes(run.id, &note).await;
    }

    Ok(())
}

/// Fallback de brecha acotada: se invoca cuando el worker agota su
/// límite de iteraciones para un run específico (`run_filter_id`) y la
/// brecha de contactos sigue abierta. Deja el run en
/// `needs_user_decision` con un marcador estructurado en `notes`.
pub async fn apply_bounded_gap_fallback(
    runs: &RunRepository,
    gap_views: &GapViews,
    mailer: &Arc<Mailer>,
    run_id: Uuid,
) -> Result<(), WorkerError> {
    let run = runs.get_run(run_id).await?;
    if run.status.is_terminal() {
        return Ok(());
    }

    let company_gap = gap_views.company_gap(run_id).await?;
    let contact_gap = gap_views.contact_gap(run_id).await?;
    if company_gap.companies_gap == 0 && contact_gap.contacts_min_gap_total == 0 {
        return Ok(());
    }

    let marker = DecisionMarker::GapSummary {
        companies_gap: company_gap.companies_gap,
        contacts_min_gap_total: contact_gap.contacts_min_gap_total,
        options: vec![DecisionOption::AcceptPartial, DecisionOption::ExpandGeography, DecisionOption::LoosenPms],
        recorded_at: Utc::now(),
    };

    runs.set_status(run_id, RunStatus::NeedsUserDecision, Some(&marker.to_fenced_block())).await?;
    warn!(run_id = %run_id, "worker loop cap reached with gap still open, run needs a user decision");

    if let Err(error) = mailer
        .send_needs_decision_notice(&run.criteria.notification_email, run_id, company_gap.companies_gap, contact_gap.contacts_min_gap_total)
        .await
    {
        warn!(run_id = %run_id, error = %error, "needs-decision notice failed to send");
    }

    Ok(())
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
            stage: Stage::ContactDiscovery,
            status: RunStatus::Active,
            notes: String::new(),
        }
    }
}
