// [apps/control-api/src/routes.rs]
/*!
 * APARATO: CONTROL-API ROUTING TABLE
 * RESPONSABILIDAD: CABLEAR LOS HANDLERS DE RUNS, GAP VIEWS Y DECISIONES
 * SOBRE UN ÚNICO `Router` CON CORS Y TRAZADO DE PETICIONES
 */

use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{decisions, gaps, runs};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/runs", get(runs::list_runs).post(runs::create_run))
        .route("/runs/:run_id", get(runs::get_run))
        .route("/runs/:run_id/gap/company", get(gaps::company_gap))
        .route("/runs/:run_id/gap/contact", get(gaps::contact_gap))
        .route("/runs/:run_id/decision", post(decisions::resolve_decision))
        .route("/runs/:run_id/archive", post(decisions::archive_run))
        .route("/runs/:run_id/unarchive", post(decisions::unarchive_run))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
