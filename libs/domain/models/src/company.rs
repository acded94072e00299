// [libs/domain/models/src/company.rs]
/*!
 * APARATO: COMPANY CANDIDATE MODEL
 * RESPONSABILIDAD: REPRESENTAR UNA EMPRESA DESCUBIERTA POR EL DISCOVERY WORKER
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Estado de un candidato a lo largo del embudo de deduplicación,
/// investigación y promoción. Es el mismo conjunto usado por
/// `ContactCandidate`. `Candidate` es el estado inicial de inserción;
/// `Validated` marca que pasó el filtro de dominio/supresión;
/// `Promoted` indica que se confirmó apto para entrega; `Rejected` es
/// terminal (duplicado, suprimido o descalificado en investigación).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Candidate,
    Validated,
    Promoted,
    Rejected,
}

impl CandidateStatus {
    /// Un candidato en este estado cuenta hacia "companies ready".
    pub fn counts_toward_gap(self) -> bool {
        matches!(self, CandidateStatus::Validated | CandidateStatus::Promoted)
    }

    /// Un candidato en este estado admite trabajo de descubrimiento de
    /// contactos (la investigación aún no lo descalificó).
    pub fn permits_contact_work(self) -> bool {
        matches!(self, CandidateStatus::Validated | CandidateStatus::Promoted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Candidate => "candidate",
            CandidateStatus::Validated => "validated",
            CandidateStatus::Promoted => "promoted",
            CandidateStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<CandidateStatus> {
        match value {
            "candidate" => Some(CandidateStatus::Candidate),
            "validated" => Some(CandidateStatus::Validated),
            "promoted" => Some(CandidateStatus::Promoted),
            "rejected" => Some(CandidateStatus::Rejected),
            _ => None,
        }
    }
}

/// Empresa de administración de propiedades surgida de un ciclo de
/// descubrimiento. El `domain` normalizado en minúsculas es la clave
/// de deduplicación a nivel de todo el Run; `idempotency_key` cubre el
/// caso en que dos llamadas del Agente describan la misma empresa con
/// variantes de dominio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCandidate {
    pub id: Uuid,
    pub run_id: Uuid,
    pub name: String,
    pub website: String,
    pub domain: String,
    pub state: Option<String>,
    pub description: Option<String>,
    pub discovery_source: String,
    pub pms_detected: Option<String>,
    pub units_estimate: Option<u32>,
    pub evidence: Option<Value>,
    pub status: CandidateStatus,
    pub meets_all_requirements: Option<bool>,
    pub rejected_reasons: Option<String>,
    pub idempotency_key: Option<String>,
    pub worker_id: Option<Uuid>,
    pub lease_until: Option<DateTime<Utc>>,
    pub discovered_at: DateTime<Utc>,
}

impl CompanyCandidate {
    /// Normaliza un dominio a su forma canónica de deduplicación:
    /// minúsculas, sin esquema, sin `www.` líder, sin barra final.
    pub fn normalize_domain(raw: &str) -> String {
        let trimmed = raw.trim().to_lowercase();
        let without_scheme = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        let without_www = without_scheme.trim_start_matches("www.");
        without_www.trim_end_matches('/').to_string()
    }

    /// Un dominio es válido de cara a inserción si es no vacío y el
    /// host del `website` lo contiene (ver invariante de consistencia
    /// dominio/sitio).
    pub fn domain_matches_website(domain: &str, website: &str) -> bool {
        if domain.is_empty() {
            return false;
        }
        let normalized_domain = Self::normalize_domain(domain);
        let normalized_website = Self::normalize_domain(website);
        normalized_website == normalized_domain || normalized_website.ends_with(&format!(".{normalized_domain}"))
    }

    /// Un lease activo bloquea otros claims hasta que expire o se libere.
    pub fn is_leased(&self, now: DateTime<Utc>) -> bool {
        match self.lease_until {
            Some(until) => until > now,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_domain_strips_scheme_and_www() {
        assert_eq!(
            CompanyCandidate::normalize_domain("https://www.Example.com/"),
            "example.com"
        );
        assert_eq!(CompanyCandidate::normalize_domain("EXAMPLE.com"), "example.com");
        assert_eq!(CompanyCandidate::normalize_domain("http://example.com"), "example.com");
    }

    #[test]
    fn status_round_trips() {
        for status in [
            CandidateStatus::Candidate,
            CandidateStatus::Validated,
            CandidateStatus::Promoted,
            CandidateStatus::Rejected,
        ] {
            assert_eq!(CandidateStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn only_validated_and_promoted_count_toward_gap() {
        assert!(CandidateStatus::Validated.counts_toward_gap());
        assert!(CandidateStatus::Promoted.counts_toward_gap());
        assert!(!CandidateStatus::Candidate.counts_toward_gap());
        assert!(!CandidateStatus::Rejected.counts_toward_gap());
    }

    #[test]
    fn website_host_must_contain_domain() {
        assert!(CompanyCandidate::domain_matches_website(
            "acmepm.com",
            "https://www.acmepm.com/"
        ));
        assert!(!CompanyCandidate::domain_matches_website("acmepm.com", "https://other.com"));
    }

    #[test]
    fn lease_expiry_is_respected() {
        use chrono::Duration;
        let now = Utc::now();
        let candidate = CompanyCandidate {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            name: "Acme".to_string(),
            website: "https://acmepm.com".to_string(),
            domain: "acmepm.com".to_string(),
            state: None,
            description: None,
            discovery_source: "seed:catalog".to_string(),
            pms_detected: None,
            units_estimate: None,
            evidence: None,
            status: CandidateStatus::Validated,
            meets_all_requirements: None,
            rejected_reasons: None,
            idempotency_key: None,
            worker_id: Some(Uuid::new_v4()),
            lease_until: Some(now + Duration::minutes(5)),
            discovered_at: now,
        };
        assert!(candidate.is_leased(now));
        assert!(!candidate.is_leased(now + Duration::minutes(10)));
    }
}
