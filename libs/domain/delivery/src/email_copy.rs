// [libs/domain/delivery/src/email_copy.rs]
/*!
 * APARATO: DELIVERY EMAIL COPY
 * RESPONSABILIDAD: COMPONER ASUNTO Y CUERPO DE LA NOTIFICACIÓN FINAL
 *
 * Pura composición de texto: `leadgen-infra-mailer` es el único crate
 * que sabe de SMTP/MIME. Esto mantiene la redacción testeable sin
 * tocar red.
 */

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DeliverySummary {
    pub run_id: Uuid,
    pub companies_delivered: u32,
    pub contacts_delivered: u32,
}

pub fn completion_subject(summary: &DeliverySummary) -> String {
    format!("Lead list ready: {} companies", summary.companies_delivered)
}

pub fn completion_body(summary: &DeliverySummary) -> String {
    format!(
        "Run {run_id} finished with {companies} companies and {contacts} contacts.\n\
         Both exports are attached as CSV.\n",
        run_id = summary.run_id,
        companies = summary.companies_delivered,
        contacts = summary.contacts_delivered,
    )
}

/// Asunto/cuerpo para la notificación de brecha no cerrada, enviada
/// junto con el marcador `needs_user_decision` (ver
/// `leadgen_domain_models::decision`).
pub fn needs_decision_subject(run_id: Uuid) -> String {
    format!("Run {run_id} needs a decision")
}

pub fn needs_decision_body(companies_gap: u32, contacts_min_gap_total: u32) -> String {
    format!(
        "This run could not close its gap within the bounded worker loop.\n\
         Remaining company gap: {companies_gap}\n\
         Remaining contact gap: {contacts_min_gap_total}\n\n\
         Choose one of: accept partial, expand geography, loosen PMS.\n",
    )
}

/// Asunto/cuerpo del aviso opcional que el Heartbeat Monitor envía tras
/// liberar los leases de un worker muerto (§4.3 paso 3).
pub fn dead_worker_alert_subject(worker_id: Uuid) -> String {
    format!("Worker {worker_id} missed its heartbeat threshold")
}

pub fn dead_worker_alert_body(worker_id: Uuid, worker_role: &str, last_heartbeat_at: chrono::DateTime<chrono::Utc>) -> String {
    format!(
        "Worker {worker_id} (role: {worker_role}) last reported at {last_heartbeat_at}.\n\
         Its company/contact leases have been released back to the claimable pool.\n",
    )
}

#[cfg(test)]
mod alert_tests {
    use super::*;

    #[test]
    fn alert_subject_mentions_worker_id() {
        let worker_id = Uuid::nil();
        assert!(dead_worker_alert_subject(worker_id).contains(&worker_id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_reports_company_count() {
        let summary = DeliverySummary {
            run_id: Uuid::nil(),
            companies_delivered: 5,
            contacts_delivered: 8,
        };
        assert_eq!(completion_subject(&summary), "Lead list ready: 5 companies");
    }

    #[test]
    fn body_mentions_both_counts() {
        let summary = DeliverySummary {
            run_id: Uuid::nil(),
            companies_delivered: 5,
            contacts_delivered: 8,
        };
        let body = completion_body(&summary);
        assert!(body.contains("5 companies"));
        assert!(body.contains("8 contacts"));
    }
}
