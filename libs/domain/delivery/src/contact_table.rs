// [libs/domain/delivery/src/contact_table.rs]
/*!
 * APARATO: CONTACT EXPORT PROJECTION
 * RESPONSABILIDAD: PROYECTAR ContactCandidate EN LAS 19 COLUMNAS FIJAS
 * DE LA TABLA DE CONTACTOS DE ENTREGA
 *
 * `evidence` en `ContactCandidate` porta el reporte Markdown completo
 * del contact-agent bajo `agent_output`, más las cinco secciones ya
 * separadas por el Contact Worker al momento de persistir (ver
 * `ContactEvidence`). Esta proyección nunca vuelve a parsear Markdown:
 * solo lee los campos ya separados.
 */

use chrono::{DateTime, Utc};
use leadgen_domain_models::ContactCandidate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Forma esperada de `ContactCandidate::evidence`, escrita por el
/// Contact Worker al persistir el resultado del contact-agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactEvidence {
    pub agent_output: Option<String>,
    pub professional_summary: Option<String>,
    pub personal_anecdotes: Option<String>,
    pub professional_anecdotes: Option<String>,
    pub sources: Option<String>,
    pub gaps: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactExportRow {
    pub contact_id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub full_name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub department: Option<String>,
    pub seniority: Option<String>,
    pub quality_score: Option<f64>,
    pub professional_summary: Option<String>,
    pub personal_anecdotes: Option<String>,
    pub professional_anecdotes: Option<String>,
    pub sources: Option<String>,
    pub gaps: Option<String>,
    pub status: String,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub domain: String,
}

/// Compone una fila de exportación; `company_name` y `domain` llegan
/// del lado de la llamada porque `ContactCandidate` solo guarda
/// `company_id` (id-keyed lookup, no grafo de punteros).
pub fn project_contact_row(contact: &ContactCandidate, company_name: &str, company_domain: &str) -> ContactExportRow {
    let evidence: ContactEvidence = contact
        .evidence
        .clone()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();

    ContactExportRow {
        contact_id: contact.id,
        company_id: contact.company_id,
        company_name: company_name.to_string(),
        full_name: contact.full_name.clone(),
        title: contact.title.clone(),
        email: contact.email.clone(),
        linkedin_url: contact.linkedin_url.clone(),
        department: contact.department.clone(),
        seniority: contact.seniority.clone(),
        quality_score: contact.quality_score,
        professional_summary: evidence.professional_summary,
        personal_anecdotes: evidence.personal_anecdotes,
        professional_anecdotes: evidence.professional_anecdotes,
        sources: evidence.sources,
        gaps: evidence.gaps,
        status: contact.status.as_str().to_string(),
        idempotency_key: contact.idempotency_key.clone(),
        created_at: contact.discovered_at,
        domain: company_domain.to_string(),
    }
}

pub fn write_contact_csv(rows: &[ContactExportRow]) -> Result<String, crate::errors::DeliveryError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::errors::DeliveryError::CsvWriteFault(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_domain_models::CandidateStatus;

    #[test]
    fn projection_unpacks_evidence_sections() {
        let evidence = serde_json::to_value(ContactEvidence {
            agent_output: Some("# Report\n...".to_string()),
            professional_summary: Some("VP of Operations".to_string()),
            personal_anecdotes: Some("Runs marathons.".to_string()),
            professional_anecdotes: None,
            sources: Some("linkedin.com/in/jane".to_string()),
            gaps: Some("No verified email.".to_string()),
        })
        .unwrap();

        let contact = ContactCandidate {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            title: Some("VP Operations".to_string()),
            email: None,
            linkedin_url: Some("linkedin.com/in/jane".to_string()),
            department: None,
            seniority: Some("vp".to_string()),
            quality_score: Some(0.8),
            signals: None,
            evidence: Some(evidence),
            status: CandidateStatus::Validated,
            idempotency_key: Some("jane doe".to_string()),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };

        let row = project_contact_row(&contact, "Acme Property Management", "acmepm.com");
        assert_eq!(row.professional_summary.as_deref(), Some("VP of Operations"));
        assert_eq!(row.gaps.as_deref(), Some("No verified email."));
        assert_eq!(row.company_name, "Acme Property Management");
    }

    #[test]
    fn missing_evidence_yields_empty_sections() {
        let contact = ContactCandidate {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            full_name: "John Roe".to_string(),
            title: None,
            email: Some("john@acmepm.com".to_string()),
            linkedin_url: None,
            department: None,
            seniority: None,
            quality_score: None,
            signals: None,
            evidence: None,
            status: CandidateStatus::Validated,
            idempotency_key: None,
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        };
        let row = project_contact_row(&contact, "Acme", "acmepm.com");
        assert!(row.professional_summary.is_none());
    }
}
