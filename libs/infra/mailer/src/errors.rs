// [libs/infra/mailer/src/errors.rs]
/*!
 * APARATO: MAILER ERROR CATALOG
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE LA VÍA SMTP
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("[L3_SMTP_CONFIG_FAULT]: SMTP_CREDENTIALS_ABSENT -> {0}")]
    ConfigurationError(String),

    #[error("[L3_SMTP_COMPOSE_FAULT]: MESSAGE_ASSEMBLY_REJECTED -> {0}")]
    ComposeFault(#[from] lettre::error::Error),

    #[error("[L3_SMTP_TRANSPORT_FAULT]: UPLINK_CONFIG_REJECTED -> {0}")]
    TransportBuildFault(#[from] lettre::transport::smtp::Error),

    #[error("[L3_SMTP_ADDRESS_FAULT]: RECIPIENT_ADDRESS_REJECTED -> {0}")]
    AddressFault(#[from] lettre::address::AddressError),

    #[error("[L3_SMTP_SEND_FAULT]: MESSAGE_REJECTED_BY_RELAY -> {0}")]
    SendFault(String),
}
