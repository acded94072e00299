// [libs/infra/store/src/errors.rs]
/*!
 * APARATO: RUN STORE ERROR CATALOG
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE PERSISTENCIA
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Error de enlace físico con el motor libSQL.
    #[error("[L3_DB_NET_FAULT]: DATABASE_UPLINK_SEVERED -> {0}")]
    ConnectionError(String),

    /// Fallo en la configuración del entorno (URL o token ausente).
    #[error("[L3_DB_CONFIG_FAULT]: STRATEGIC_ENV_VOID -> {0}")]
    ConfigurationError(String),

    /// Error de sintaxis o ejecución devuelto por el motor libSQL.
    #[error("[L3_DB_QUERY_FAULT]: SQL_QUERY_REJECTED -> {0}")]
    QueryError(#[from] libsql::Error),

    /// Fallo al transformar una fila SQL en un tipo de dominio.
    #[error("[L3_DB_MAPPING_FAULT]: DATA_MAPPING_VIOLATION -> {0}")]
    MappingError(String),

    /// El Run solicitado no existe.
    #[error("[L3_RUN_FAULT]: RUN_NOT_FOUND")]
    RunNotFound,

    /// La transición de etapa o estado solicitada viola el orden
    /// monótono del pipeline o intenta escribir sobre un estado terminal.
    #[error("[L3_RUN_FAULT]: INVALID_STAGE_TRANSITION -> {0}")]
    InvalidTransition(String),

    /// Fallo al comprometer una secuencia multi-sentencia.
    #[error("[L3_DB_FAULT]: TRANSACTION_COLLAPSE -> {0}")]
    TransactionError(String),
}
