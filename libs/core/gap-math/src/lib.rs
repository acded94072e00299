// [libs/core/gap-math/src/lib.rs]
/*!
 * =================================================================
 * APARATO: GAP VIEW ARITHMETIC
 * CLASIFICACIÓN: CORE LAYER (ESTRATO L1, SIN DEPENDENCIAS DE INFRAESTRUCTURA)
 * RESPONSABILIDAD: FORMULAS PURAS DE "TRABAJO RESTANTE" POR ETAPA
 *
 * Estas funciones son la fuente de verdad para decidir cuándo una etapa
 * está satisfecha. El Run Store las ejecuta contra agregados SQL; los
 * workers las ejecutan contra conteos ya materializados. Ambos deben
 * coincidir bit a bit, así que la aritmética vive aquí una sola vez.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Brecha de la etapa de descubrimiento: cuántas empresas listas faltan
/// para alcanzar `target_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyGap {
    pub target_quantity: u32,
    pub companies_ready: u32,
    pub companies_gap: u32,
}

/// Calcula la brecha de empresas. `companies_ready` cuenta candidatos en
/// estado `validated` o `promoted` (ver invariante I1 de la especificación).
pub fn company_gap(target_quantity: u32, companies_ready: u32) -> CompanyGap {
    CompanyGap {
        target_quantity,
        companies_ready,
        companies_gap: target_quantity.saturating_sub(companies_ready),
    }
}

/// Brecha de contactos para una única empresa elegible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactGapPerCompany {
    pub contacts_ready: u32,
    pub contacts_min_gap: u32,
    pub contacts_capacity: u32,
}

/// Calcula la brecha de contactos de una empresa: cuántos contactos
/// adicionales se necesitan para llegar a `contacts_min`, y cuánta
/// capacidad resta antes de tocar `contacts_max`.
pub fn contact_gap_per_company(contacts_ready: u32, contacts_min: u32, contacts_max: u32) -> ContactGapPerCompany {
    ContactGapPerCompany {
        contacts_ready,
        contacts_min_gap: contacts_min.saturating_sub(contacts_ready),
        contacts_capacity: contacts_max.saturating_sub(contacts_ready),
    }
}

/// Brecha agregada de contactos sobre todas las empresas elegibles de un Run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactGap {
    pub contacts_min_gap_total: u32,
    pub contacts_capacity_total: u32,
}

/// Suma las brechas por-empresa de las empresas cuyo estado permite
/// trabajo de contactos (el llamador filtra esa elegibilidad antes de
/// construir `per_company`; ver invariante I2).
pub fn contact_gap(per_company: &[ContactGapPerCompany]) -> ContactGap {
    per_company.iter().fold(
        ContactGap {
            contacts_min_gap_total: 0,
            contacts_capacity_total: 0,
        },
        |mut acc, gap| {
            acc.contacts_min_gap_total += gap.contacts_min_gap;
            acc.contacts_capacity_total += gap.contacts_capacity;
            acc
        },
    )
}

/// Objetivo de descubrimiento ajustado por sobremuestreo: redondea hacia
/// arriba `target_quantity * oversample_factor` para compensar la
/// atrición aguas abajo en investigación y descubrimiento de contactos.
pub fn discovery_target(target_quantity: u32, oversample_factor: f64) -> u32 {
    let raw = target_quantity as f64 * oversample_factor;
    raw.ceil() as u32
}

/// Resumen combinado de una etapa, usado para reconstruir el plan de
/// reanudación de un Run tras un reinicio: la etapa y el estado
/// persistidos más los agregados de brecha derivados, sin ningún
/// estado en memoria adicional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumePlan {
    pub company_gap: CompanyGap,
    pub contact_gap: ContactGap,
}

pub fn resume_plan(company_gap: CompanyGap, contact_gap: ContactGap) -> ResumePlan {
    ResumePlan {
        company_gap,
        contact_gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn company_gap_saturates_at_zero() {
        let gap = company_gap(5, 8);
        assert_eq!(gap.companies_gap, 0);
    }

    #[test]
    fn company_gap_computes_shortfall() {
        let gap = company_gap(10, 4);
        assert_eq!(gap.companies_gap, 6);
    }

    #[test]
    fn discovery_target_rounds_up() {
        assert_eq!(discovery_target(1, 2.0), 2);
        assert_eq!(discovery_target(5, 2.0), 10);
        assert_eq!(discovery_target(3, 1.5), 5);
    }

    #[test]
    fn contact_gap_aggregates_across_companies() {
        let per_company = vec![
            contact_gap_per_company(0, 1, 2),
            contact_gap_per_company(1, 1, 2),
            contact_gap_per_company(2, 1, 2),
        ];
        let total = contact_gap(&per_company);
        assert_eq!(total.contacts_min_gap_total, 1);
        assert_eq!(total.contacts_capacity_total, 1 + 1 + 0);
    }

    #[test]
    fn contact_gap_per_company_never_negative() {
        let gap = contact_gap_per_company(5, 1, 2);
        assert_eq!(gap.contacts_min_gap, 0);
        assert_eq!(gap.contacts_capacity, 0);
    }

    proptest! {
        #[test]
        fn company_gap_is_never_negative_and_monotone(target in 0u32..1000, ready in 0u32..1000) {
            let gap = company_gap(target, ready);
            prop_assert!(gap.companies_gap <= target);
            if ready >= target {
                prop_assert_eq!(gap.companies_gap, 0);
            } else {
                prop_assert_eq!(gap.companies_gap, target - ready);
            }
        }

        #[test]
        fn discovery_target_always_meets_or_exceeds_base(target in 1u32..1000, factor in 1.0f64..5.0) {
            let derived = discovery_target(target, factor);
            prop_assert!(derived >= target);
        }
    }
}
