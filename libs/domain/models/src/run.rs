// [libs/domain/models/src/run.rs]
/*!
 * =================================================================
 * APARATO: RUN DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DEL CONTRATO SOBERANO DE UNA SOLICITUD
 *
 * Un Run es la solicitud de nivel superior de un operador: "encuentra
 * N empresas que cumplan criterio X, con 1-3 contactos cada una".
 * Su ciclo de vida atraviesa cuatro etapas estrictas y nunca retrocede.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geografía objetivo de la búsqueda. Ambos campos son opcionales porque
/// un criterio puede acotar solo por estado, solo por ciudad, o ninguno.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Geography {
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Cuota por estado usada como pista de ordenamiento durante la
/// selección de candidatos deduplicados (nunca como rechazo duro).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateQuota {
    pub state: String,
    pub quantity: u32,
}

/// Criterio estructurado de un Run: PMS objetivo, geografía, tamaño
/// mínimo de unidades, distribución opcional y el email de notificación.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunCriteria {
    pub pms: Option<String>,
    pub geography: Geography,
    pub units_min: Option<u32>,
    pub target_distribution: Option<Vec<StateQuota>>,
    pub notification_email: String,
}

/// Etapa soberana del pipeline. El orden es estrictamente creciente:
/// ningún worker puede hacer retroceder un Run a una etapa anterior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Discovery,
    Research,
    ContactDiscovery,
    Done,
}

impl Stage {
    /// Índice total para validar monotonicidad (cada transición solo avanza).
    pub fn ordinal(self) -> u8 {
        match self {
            Stage::Discovery => 0,
            Stage::Research => 1,
            Stage::ContactDiscovery => 2,
            Stage::Done => 3,
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Discovery => Some(Stage::Research),
            Stage::Research => Some(Stage::ContactDiscovery),
            Stage::ContactDiscovery => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Discovery => "discovery",
            Stage::Research => "research",
            Stage::ContactDiscovery => "contact_discovery",
            Stage::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Stage> {
        match value {
            "discovery" => Some(Stage::Discovery),
            "research" => Some(Stage::Research),
            "contact_discovery" => Some(Stage::ContactDiscovery),
            "done" => Some(Stage::Done),
            _ => None,
        }
    }
}

/// Estado operativo del Run. `Completed`, `Error` y `Archived` son
/// terminales: ningún worker puede escribir sobre un Run en ese estado.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Active,
    Completed,
    Error,
    NeedsUserDecision,
    Archived,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Error | RunStatus::Archived
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Active => "active",
            RunStatus::Completed => "completed",
            RunStatus::Error => "error",
            RunStatus::NeedsUserDecision => "needs_user_decision",
            RunStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<RunStatus> {
        match value {
            "active" => Some(RunStatus::Active),
            "completed" => Some(RunStatus::Completed),
            "error" => Some(RunStatus::Error),
            "needs_user_decision" => Some(RunStatus::NeedsUserDecision),
            "archived" => Some(RunStatus::Archived),
            _ => None,
        }
    }
}

/// Representación soberana de una solicitud de generación de leads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub criteria: RunCriteria,
    pub target_quantity: u32,
    pub contacts_min: u32,
    pub contacts_max: u32,
    pub stage: Stage,
    pub status: RunStatus,
    pub notes: String,
}

impl Run {
    /// Valida los invariantes de construcción enumerados por la especificación:
    /// `contacts_min <= contacts_max` y `target_quantity >= 1`.
    pub fn validate_bounds(target_quantity: u32, contacts_min: u32, contacts_max: u32) -> Result<(), String> {
        if target_quantity < 1 {
            return Err("target_quantity must be >= 1".to_string());
        }
        if contacts_min > contacts_max {
            return Err("contacts_min must be <= contacts_max".to_string());
        }
        Ok(())
    }

    /// Un Run en etapa `done` solo puede portar un estado terminal.
    pub fn stage_status_consistent(stage: Stage, status: RunStatus) -> bool {
        if stage == Stage::Done {
            status.is_terminal()
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordinals_are_strictly_increasing() {
        assert!(Stage::Discovery.ordinal() < Stage::Research.ordinal());
        assert!(Stage::Research.ordinal() < Stage::ContactDiscovery.ordinal());
        assert!(Stage::ContactDiscovery.ordinal() < Stage::Done.ordinal());
    }

    #[test]
    fn done_requires_terminal_status() {
        assert!(Run::stage_status_consistent(Stage::Done, RunStatus::Completed));
        assert!(!Run::stage_status_consistent(Stage::Done, RunStatus::Active));
        assert!(Run::stage_status_consistent(Stage::Discovery, RunStatus::Active));
    }

    #[test]
    fn bounds_reject_inverted_contact_range() {
        assert!(Run::validate_bounds(5, 3, 1).is_err());
        assert!(Run::validate_bounds(5, 1, 3).is_ok());
        assert!(Run::validate_bounds(0, 1, 1).is_err());
    }

    #[test]
    fn stage_round_trips_through_str() {
        for stage in [Stage::Discovery, Stage::Research, Stage::ContactDiscovery, Stage::Done] {
            assert_eq!(Stage::parse(stage.as_str()), Some(stage));
        }
    }
}
