// [libs/domain/models/src/research.rs]
/*!
 * APARATO: COMPANY RESEARCH MODEL
 * RESPONSABILIDAD: HECHOS Y SEÑALES RECOLECTADAS SOBRE UN CANDIDATO PROMOVIDO
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Estado del ciclo de enriquecimiento de una empresa.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStatus {
    Pending,
    Complete,
    Failed,
}

impl ResearchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResearchStatus::Pending => "pending",
            ResearchStatus::Complete => "complete",
            ResearchStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<ResearchStatus> {
        match value {
            "pending" => Some(ResearchStatus::Pending),
            "complete" => Some(ResearchStatus::Complete),
            "failed" => Some(ResearchStatus::Failed),
            _ => None,
        }
    }
}

/// Enriquecimiento recolectado por el Research Worker para un
/// candidato promovido, una fila por `(run_id, company_id)` con
/// semántica de upsert. `facts` y `signals` guardan el objeto
/// estructurado completo que devolvió el Agente (análisis markdown,
/// confirmación de PMS, mezcla de propiedades, estados de operación);
/// `units_under_management` y `pms_detected` se desnormalizan como
/// columnas propias porque el gap de criterio se evalúa contra ellas
/// en cada ciclo del worker sin tener que re-parsear JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResearch {
    pub id: Uuid,
    pub run_id: Uuid,
    pub company_id: Uuid,
    pub status: ResearchStatus,
    pub facts: Option<Value>,
    pub signals: Option<Value>,
    pub confidence: Option<f64>,
    pub units_under_management: Option<u32>,
    pub pms_detected: Option<String>,
    pub meets_all_requirements: Option<bool>,
    pub disqualifier: Option<String>,
    pub researched_at: Option<DateTime<Utc>>,
}

impl CompanyResearch {
    /// Un candidato supera el umbral de unidades si el dato faltante se
    /// trata como "no descalifica" (ver Open Questions): ausencia de
    /// `units_min` en el criterio siempre satisface, ausencia del dato
    /// recolectado NO satisface si se exigió un mínimo.
    pub fn satisfies_units_floor(units_under_management: Option<u32>, units_min: Option<u32>) -> bool {
        match units_min {
            None => true,
            Some(floor) => units_under_management.map(|v| v >= floor).unwrap_or(false),
        }
    }

    /// Un candidato satisface el criterio de PMS si no se pidió uno
    /// específico, o si el detectado coincide sin distinguir mayúsculas.
    pub fn satisfies_pms(pms_detected: &Option<String>, pms_required: &Option<String>) -> bool {
        match pms_required {
            None => true,
            Some(required) => pms_detected
                .as_ref()
                .map(|detected| detected.eq_ignore_ascii_case(required))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_floor_absent_requirement_always_passes() {
        assert!(CompanyResearch::satisfies_units_floor(None, None));
        assert!(CompanyResearch::satisfies_units_floor(Some(10), None));
    }

    #[test]
    fn units_floor_missing_datum_fails_when_required() {
        assert!(!CompanyResearch::satisfies_units_floor(None, Some(50)));
        assert!(CompanyResearch::satisfies_units_floor(Some(50), Some(50)));
        assert!(!CompanyResearch::satisfies_units_floor(Some(49), Some(50)));
    }

    #[test]
    fn pms_match_is_case_insensitive() {
        let detected = Some("AppFolio".to_string());
        let required = Some("appfolio".to_string());
        assert!(CompanyResearch::satisfies_pms(&detected, &required));
    }

    #[test]
    fn pms_requirement_absent_always_passes() {
        assert!(CompanyResearch::satisfies_pms(&None, &None));
    }
}
