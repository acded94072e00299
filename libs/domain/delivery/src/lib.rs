// [libs/domain/delivery/src/lib.rs]
/*!
 * =================================================================
 * CRATE: leadgen-domain-delivery
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: PROYECCIÓN TABULAR Y REDACCIÓN DE LA ENTREGA FINAL
 *
 * Mecánica pura: recibe filas de dominio ya leídas por el Contact
 * Worker y produce texto CSV y copy de correo. No sabe de SQL ni de
 * SMTP — esas son responsabilidad de `leadgen-infra-store` y
 * `leadgen-infra-mailer` respectivamente.
 * =================================================================
 */

mod company_table;
mod contact_table;
mod email_copy;
mod errors;

pub use company_table::{project_company_row, write_company_csv, CompanyExportRow};
pub use contact_table::{project_contact_row, write_contact_csv, ContactEvidence, ContactExportRow};
pub use email_copy::{
    completion_body, completion_subject, dead_worker_alert_body, dead_worker_alert_subject, needs_decision_body,
    needs_decision_subject, DeliverySummary,
};
pub use errors::DeliveryError;
