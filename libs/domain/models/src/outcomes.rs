// [libs/domain/models/src/outcomes.rs]
/*!
 * APARATO: CONTROL-FLOW OUTCOME TYPES
 * RESPONSABILIDAD: REEMPLAZAR EXCEPCIONES POR VARIANTES TIPADAS EXPLÍCITAS
 *
 * El flujo de control del pipeline distingue "no hay trabajo" de "ya
 * existía" de "la etapa avanzó". Modelar esto como variantes de un
 * enum, en lugar de `Option`/`Result` anidados, hace que cada sitio de
 * llamada enumere explícitamente los desenlaces posibles en vez de
 * esconderlos detrás de una excepción.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::run::{RunStatus, Stage};

/// Resultado de intentar reclamar un ítem de trabajo (empresa para
/// investigar, empresa para descubrir contactos) bajo el protocolo de
/// lease atómico `SELECT`-luego-`UPDATE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClaimOutcome<T> {
    /// Se reclamó el ítem exitosamente; el worker es ahora su dueño exclusivo.
    Claimed(T),
    /// No hay ítem elegible: cola vacía, todo en lease, o se perdió la
    /// carrera contra otro worker entre la lectura y la escritura.
    None,
}

impl<T> ClaimOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            ClaimOutcome::Claimed(item) => Some(item),
            ClaimOutcome::None => Option::None,
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed(_))
    }
}

/// Resultado de insertar un candidato (empresa o contacto) contra la
/// restricción de unicidad a nivel de Run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertOutcome {
    /// Fila nueva insertada, con el id asignado.
    Inserted(Uuid),
    /// Ya existía una fila equivalente (mismo dominio, email o
    /// `idempotency_key` normalizado dentro del mismo Run); la
    /// inserción fue un no-op intencional, no un error.
    AlreadyPresent,
}

impl InsertOutcome {
    pub fn was_inserted(self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// Resultado de intentar avanzar la etapa de un Run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// El Run avanzó a la etapa dada.
    Advanced(Stage),
    /// La brecha de trabajo restante en la etapa actual aún no está vacía;
    /// el Run permanece donde está para la siguiente iteración.
    Stay,
    /// El Run alcanzó un estado terminal (completed/error/needs_user_decision).
    Terminal(RunStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_outcome_converts_to_option() {
        let claimed: ClaimOutcome<u32> = ClaimOutcome::Claimed(7);
        assert_eq!(claimed.into_option(), Some(7));
        let none: ClaimOutcome<u32> = ClaimOutcome::None;
        assert_eq!(none.into_option(), Option::None);
    }

    #[test]
    fn insert_outcome_was_inserted() {
        let id = Uuid::new_v4();
        assert!(InsertOutcome::Inserted(id).was_inserted());
        assert!(!InsertOutcome::AlreadyPresent.was_inserted());
    }

    #[test]
    fn transition_variants_carry_expected_payloads() {
        assert_eq!(Transition::Advanced(Stage::Research), Transition::Advanced(Stage::Research));
        assert_eq!(Transition::Stay, Transition::Stay);
        assert_eq!(
            Transition::Terminal(RunStatus::Completed),
            Transition::Terminal(RunStatus::Completed)
        );
    }
}
