// [apps/control-api/src/handlers/runs.rs]
/*!
 * APARATO: RUN LIFECYCLE HANDLERS
 * RESPONSABILIDAD: CREACIÓN, LECTURA Y LISTADO DE RUNS — EL CONTRATO
 * QUE LA UI DE CREACIÓN/MONITOREO CONSUME (§6)
 */

use axum::extract::{Path, Query, State};
use axum::Json;
use leadgen_domain_models::{Run, RunCriteria, Stage};
use leadgen_infra_store::{GapViews, RunRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRunPayload {
    pub criteria: RunCriteria,
    pub target_quantity: u32,
    #[serde(default = "default_contacts_min")]
    pub contacts_min: u32,
    #[serde(default = "default_contacts_max")]
    pub contacts_max: u32,
}

fn default_contacts_min() -> u32 {
    1
}

fn default_contacts_max() -> u32 {
    3
}

#[derive(Debug, Serialize)]
pub struct CreateRunResponse {
    pub run_id: Uuid,
}

pub async fn create_run(
    State(state): State<AppState>,
    Json(payload): Json<CreateRunPayload>,
) -> Result<Json<CreateRunResponse>, ApiError> {
    let runs = RunRepository::new(state.store.connection()?);
    let run_id = runs
        .create_run(&payload.criteria, payload.target_quantity, payload.contacts_min, payload.contacts_max)
        .await?;
    Ok(Json(CreateRunResponse { run_id }))
}

#[derive(Debug, Serialize)]
pub struct RunDetail {
    #[serde(flatten)]
    pub run: Run,
    pub resume_plan: leadgen_core_gap_math::ResumePlan,
}

pub async fn get_run(State(state): State<AppState>, Path(run_id): Path<Uuid>) -> Result<Json<RunDetail>, ApiError> {
    let connection = state.store.connection()?;
    let runs = RunRepository::new(connection.clone());
    let gap_views = GapViews::new(connection);

    let run = runs.get_run(run_id).await?;
    let resume_plan = gap_views.resume_plan(run_id).await?;
    Ok(Json(RunDetail { run, resume_plan }))
}

#[derive(Debug, Deserialize)]
pub struct ListRunsQuery {
    pub stage: Option<String>,
    pub run_id: Option<Uuid>,
}

pub async fn list_runs(State(state): State<AppState>, Query(query): Query<ListRunsQuery>) -> Result<Json<Vec<Run>>, ApiError> {
    let runs = RunRepository::new(state.store.connection()?);

    let stage_filter = match query.stage.as_deref() {
        Some(raw) => Some(Stage::parse(raw).ok_or_else(|| ApiError::InvalidRequest(format!("unknown stage {raw}")))?),
        None => None,
    };

    let mut results = runs.list_active_runs(stage_filter).await?;
    if let Some(run_id) = query.run_id {
        results.retain(|run| run.id == run_id);
    }
    Ok(Json(results))
}
