// [apps/control-api/src/handlers/gaps.rs]
/*!
 * APARATO: GAP VIEW READ HANDLERS
 * RESPONSABILIDAD: EXPONER LAS VISTAS DERIVADAS DE "TRABAJO RESTANTE"
 * (§3, Gap Views) PARA EL MONITOREO DE LA UI SIN DUPLICAR LA ARITMÉTICA
 * DE `leadgen-core-gap-math`
 */

use axum::extract::{Path, State};
use axum::Json;
use leadgen_core_gap_math::{CompanyGap, ContactGap};
use leadgen_infra_store::GapViews;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::AppState;

pub async fn company_gap(State(state): State<AppState>, Path(run_id): Path<Uuid>) -> Result<Json<CompanyGap>, ApiError> {
    let gap_views = GapViews::new(state.store.connection()?);
    Ok(Json(gap_views.company_gap(run_id).await?))
}

pub async fn contact_gap(State(state): State<AppState>, Path(run_id): Path<Uuid>) -> Result<Json<ContactGap>, ApiError> {
    let gap_views = GapViews::new(state.store.connection()?);
    Ok(Json(gap_views.contact_gap(run_id).await?))
}
