// [apps/heartbeat-monitor/src/errors.rs]
/*!
 * APARATO: HEARTBEAT MONITOR ERROR CATALOG
 * RESPONSABILIDAD: ENVOLVER LOS FALLOS DE CAPAS INFERIORES SIN DETENER
 * EL CICLO DE BARRIDO — UN WORKER MUERTO QUE NO SE PUDO LIBERAR SE
 * REGISTRA Y SE REINTENTA EN EL PRÓXIMO CICLO
 */

use leadgen_infra_mailer::MailerError;
use leadgen_infra_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("[APP_STORE_FAULT]: {0}")]
    Store(#[from] StoreError),

    #[error("[APP_MAILER_FAULT]: {0}")]
    Mailer(#[from] MailerError),
}
