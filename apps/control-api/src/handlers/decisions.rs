// [apps/control-api/src/handlers/decisions.rs]
/*!
 * APARATO: USER-DECISION RESOLUTION HANDLERS
 * RESPONSABILIDAD: TRADUCIR LA ELECCIÓN DE UN OPERADOR SOBRE UN RUN EN
 * `needs_user_decision` A LA TRANSICIÓN CORRESPONDIENTE (§6), Y EXPONER
 * EL ARCHIVADO/DESARCHIVADO ADMINISTRATIVO (§8, invariante 7)
 *
 * Este módulo es el único lugar del sistema donde `accept_partial`
 * dispara la entrega: el Contact Worker nunca decide cerrar con
 * brecha abierta por su cuenta, solo deja el Run a la espera aquí.
 */

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use leadgen_domain_models::{DecisionMarker, DecisionOption, RunStatus, Stage};
use leadgen_infra_store::RunRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::delivery::send_completion_export;
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveDecisionPayload {
    pub option: DecisionOption,
    pub notification_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveDecisionResponse {
    pub run_id: Uuid,
    pub option: DecisionOption,
}

pub async fn resolve_decision(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    Json(payload): Json<ResolveDecisionPayload>,
) -> Result<Json<ResolveDecisionResponse>, ApiError> {
    let connection = state.store.connection()?;
    let runs = RunRepository::new(connection.clone());

    let run = runs.get_run(run_id).await?;
    if run.status != RunStatus::NeedsUserDecision {
        return Err(ApiError::InvalidRequest(format!(
            "run is in status {}, not needs_user_decision",
            run.status.as_str()
        )));
    }

    match payload.option {
        DecisionOption::AcceptPartial => {
            if run.stage != Stage::Done {
                runs.set_stage(run_id, Stage::Done).await?;
            }
            runs.set_status(run_id, RunStatus::Completed, None).await?;

            if let Some(notification_email) = payload.notification_email.as_deref() {
                let companies = leadgen_infra_store::CompanyRepository::new(connection.clone());
                let contacts = leadgen_infra_store::ContactRepository::new(connection.clone());
                let research = leadgen_infra_store::ResearchRepository::new(connection);
                send_completion_export(&companies, &contacts, &research, &state.mailer, run_id, notification_email).await?;
            }
        }
        DecisionOption::ExpandGeography => {
            let marker = DecisionMarker::ExpandRequested { recorded_at: Utc::now() };
            runs.append_notes(run_id, &marker.to_fenced_block()).await?;
        }
        DecisionOption::LoosenPms => {
            let marker = DecisionMarker::LoosenRequested { recorded_at: Utc::now() };
            runs.append_notes(run_id, &marker.to_fenced_block()).await?;
        }
    }

    Ok(Json(ResolveDecisionResponse { run_id, option: payload.option }))
}

#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub run_id: Uuid,
}

pub async fn archive_run(State(state): State<AppState>, Path(run_id): Path<Uuid>) -> Result<Json<ArchiveResponse>, ApiError> {
    let runs = RunRepository::new(state.store.connection()?);
    runs.archive_run(run_id).await?;
    Ok(Json(ArchiveResponse { run_id }))
}

#[derive(Debug, Deserialize)]
pub struct UnarchiveRunPayload {
    #[serde(default = "default_restored_status")]
    pub restored_status: RunStatus,
}

fn default_restored_status() -> RunStatus {
    RunStatus::Active
}

pub async fn unarchive_run(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    Json(payload): Json<UnarchiveRunPayload>,
) -> Result<Json<ArchiveResponse>, ApiError> {
    let runs = RunRepository::new(state.store.connection()?);
    runs.unarchive_run(run_id, payload.restored_status).await?;
    Ok(Json(ArchiveResponse { run_id }))
}
