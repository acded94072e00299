// [libs/domain/models/src/contact.rs]
/*!
 * APARATO: CONTACT CANDIDATE MODEL
 * RESPONSABILIDAD: DECISORES INDIVIDUALES ENCONTRADOS DENTRO DE UNA EMPRESA
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::company::CandidateStatus;

/// Un decisor (owner, executive o property manager) descubierto para
/// una empresa promovida. Cada empresa porta entre `contacts_min` y
/// `contacts_max` contactos al momento de la entrega. Comparte el
/// mismo vocabulario de estado que `CompanyCandidate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCandidate {
    pub id: Uuid,
    pub run_id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub department: Option<String>,
    pub seniority: Option<String>,
    pub quality_score: Option<f64>,
    pub signals: Option<Value>,
    /// Debe portar el reporte Markdown completo del Agente bajo
    /// `evidence.agent_output`, con las secciones de anécdotas ya
    /// separadas por el research worker para la proyección de entrega.
    pub evidence: Option<Value>,
    pub status: CandidateStatus,
    pub idempotency_key: Option<String>,
    pub worker_id: Option<Uuid>,
    pub lease_until: Option<DateTime<Utc>>,
    pub discovered_at: DateTime<Utc>,
}

impl ContactCandidate {
    /// Un contacto es utilizable en la entrega si porta al menos un
    /// canal de alcance (email o LinkedIn).
    pub fn has_reachable_channel(&self) -> bool {
        self.email.is_some() || self.linkedin_url.is_some()
    }

    /// Clave de idempotencia determinística derivada del nombre y, si
    /// existe, el email normalizado — usada por el Contact Worker para
    /// que un reintento de la misma llamada del Agente no duplique filas.
    pub fn derive_idempotency_key(full_name: &str, email: Option<&str>) -> String {
        let normalized_name = full_name.trim().to_lowercase();
        match email {
            Some(email) => format!("{normalized_name}:{}", email.trim().to_lowercase()),
            None => normalized_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(email: Option<&str>, linkedin: Option<&str>) -> ContactCandidate {
        ContactCandidate {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            title: None,
            email: email.map(String::from),
            linkedin_url: linkedin.map(String::from),
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
        }
    }

    #[test]
    fn reachable_with_any_single_channel() {
        assert!(sample(Some("jane@example.com"), None).has_reachable_channel());
        assert!(sample(None, Some("linkedin.com/in/jane")).has_reachable_channel());
    }

    #[test]
    fn unreachable_with_no_channel() {
        assert!(!sample(None, None).has_reachable_channel());
    }

    #[test]
    fn idempotency_key_is_deterministic() {
        let a = ContactCandidate::derive_idempotency_key("Jane Doe", Some("Jane@Example.com"));
        let b = ContactCandidate::derive_idempotency_key("jane doe", Some("jane@example.com"));
        assert_eq!(a, b);
    }
}
