// [libs/domain/models/src/decision.rs]
/*!
 * APARATO: NEEDS_USER_DECISION MARKER SCHEMA
 * RESPONSABILIDAD: FORMALIZAR EL BLOQUE ESTRUCTURADO QUE EL CONTACT WORKER
 * APPENDEA A `runs.notes` CUANDO UNA BRECHA NO SE PUEDE CERRAR DENTRO DEL
 * LOOP ACOTADO
 *
 * La especificación deja abierto si estos marcadores tienen un esquema
 * formal o son texto libre para un operador; esta crate resuelve esa
 * pregunta adoptando un pequeño objeto JSON en un bloque de código
 * delimitado (ver DESIGN.md), de forma que `control-api` pueda
 * renderizar UI estructurada sin dejar de ser legible para un humano
 * que lea `notes` directamente.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DECISION_MARKER_FENCE: &str = "```leadgen-decision";

/// Las tres opciones que el endpoint de decisión de usuario ofrece
/// cuando una ejecución se queda corta tras agotar su loop acotado.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOption {
    AcceptPartial,
    ExpandGeography,
    LoosenPms,
}

impl DecisionOption {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionOption::AcceptPartial => "accept_partial",
            DecisionOption::ExpandGeography => "expand_geography",
            DecisionOption::LoosenPms => "loosen_pms",
        }
    }
}

/// Variante del marcador: el resumen inicial de brecha, o el eco de la
/// elección de un operador cuando no fue "accept partial" (esas dos
/// opciones dejan el Run en `needs_user_decision` esperando que la
/// orquestación externa edite el criterio y relance el Run).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionMarker {
    GapSummary {
        companies_gap: u32,
        contacts_min_gap_total: u32,
        options: Vec<DecisionOption>,
        recorded_at: DateTime<Utc>,
    },
    ExpandRequested { recorded_at: DateTime<Utc> },
    LoosenRequested { recorded_at: DateTime<Utc> },
}

impl DecisionMarker {
    /// Serializa el marcador como un bloque de código delimitado que se
    /// puede concatenar de forma segura al final de `runs.notes` sin
    /// romper el texto libre que lo precede.
    pub fn to_fenced_block(&self) -> String {
        let body = serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string());
        format!("\n{DECISION_MARKER_FENCE}\n{body}\n```\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_summary_round_trips_through_json() {
        let marker = DecisionMarker::GapSummary {
            companies_gap: 2,
            contacts_min_gap_total: 3,
            options: vec![
                DecisionOption::AcceptPartial,
                DecisionOption::ExpandGeography,
                DecisionOption::LoosenPms,
            ],
            recorded_at: Utc::now(),
        };
        let block = marker.to_fenced_block();
        assert!(block.contains(DECISION_MARKER_FENCE));
        assert!(block.contains("\"companies_gap\": 2"));
    }

    #[test]
    fn option_strings_are_snake_case() {
        assert_eq!(DecisionOption::AcceptPartial.as_str(), "accept_partial");
        assert_eq!(DecisionOption::ExpandGeography.as_str(), "expand_geography");
        assert_eq!(DecisionOption::LoosenPms.as_str(), "loosen_pms");
    }
}
