// [libs/domain/models/src/suppression.rs]
/*!
 * APARATO: SUPPRESSION MODEL
 * RESPONSABILIDAD: REGISTRO DE DOMINIOS EXCLUIDOS DEL DESCUBRIMIENTO
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Procedencia de una supresión, conservada para auditoría y para
/// decidir si una entrada expira (contacto reciente) o es permanente
/// (denylist, cliente existente, supresión CRM).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionSource {
    ExistingCustomer,
    RecentlyContacted,
    Crm,
    Denylist,
}

impl SuppressionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SuppressionSource::ExistingCustomer => "existing_customer",
            SuppressionSource::RecentlyContacted => "recently_contacted",
            SuppressionSource::Crm => "crm",
            SuppressionSource::Denylist => "denylist",
        }
    }
}

/// Dominio suprimido, guardado en su forma normalizada (ver
/// `CompanyCandidate::normalize_domain`) para que la comparación en el
/// Oráculo de Supresión sea insensible a mayúsculas y esquema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressedDomain {
    pub domain: String,
    pub source: SuppressionSource,
    pub recorded_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SuppressedDomain {
    /// Una supresión recientemente-contactada caduca a los 90 días;
    /// el resto de las fuentes no expiran.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => now < expiry,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn permanent_suppression_never_expires() {
        let entry = SuppressedDomain {
            domain: "acme.com".to_string(),
            source: SuppressionSource::Denylist,
            recorded_at: Utc::now() - Duration::days(400),
            expires_at: None,
        };
        assert!(entry.is_active(Utc::now()));
    }

    #[test]
    fn recently_contacted_expires_after_window() {
        let entry = SuppressedDomain {
            domain: "acme.com".to_string(),
            source: SuppressionSource::RecentlyContacted,
            recorded_at: Utc::now() - Duration::days(100),
            expires_at: Some(Utc::now() - Duration::days(10)),
        };
        assert!(!entry.is_active(Utc::now()));
    }
}
