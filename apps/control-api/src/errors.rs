// [apps/control-api/src/errors.rs]
/*!
 * APARATO: CONTROL-API ERROR CATALOG
 * RESPONSABILIDAD: TRADUCIR FALLOS DEL RUN STORE A RESPUESTAS HTTP
 * TIPADAS, SIN FILTRAR DETALLES DE IMPLEMENTACIÓN AL LLAMANTE
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leadgen_infra_mailer::MailerError;
use leadgen_infra_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("run not found")]
    RunNotFound,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("store fault: {0}")]
    Store(String),

    #[error("mailer fault: {0}")]
    Mailer(String),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::RunNotFound => ApiError::RunNotFound,
            StoreError::InvalidTransition(message) => ApiError::InvalidRequest(message),
            other => ApiError::Store(other.to_string()),
        }
    }
}

impl From<MailerError> for ApiError {
    fn from(error: MailerError) -> Self {
        ApiError::Mailer(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::RunNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Mailer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
