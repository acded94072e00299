// [apps/discovery-worker/src/regions.rs]
/*!
 * APARATO: PARTICIONADOR DE GEOGRAFÍA
 * RESPONSABILIDAD: DIVIDIR EL CRITERIO DE UN RUN EN REGIONES PARA EL
 * ABANICO PARALELO DE LLAMADAS AL AGENTE
 *
 * Una ciudad única produce una región (o cuadrantes cuando `region_count`
 * > 1); un estado sin ciudad produce sub-regiones nombradas dentro de
 * ese estado; varios estados (vía `target_distribution`) producen una
 * región por estado. Sin geografía alguna, todo el objetivo cae en una
 * única región nacional.
 */

use leadgen_domain_models::RunCriteria;

#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub narrative_focus: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub per_region_target: u32,
}

pub fn partition_geography(criteria: &RunCriteria, region_count: u32, discovery_target: u32) -> Vec<Region> {
    let region_count = region_count.max(1);
    let per_region_target = (discovery_target as f64 / region_count as f64).ceil() as u32;

    let regions = match (&criteria.geography.city, &criteria.geography.state, &criteria.target_distribution) {
        (Some(city), state, _) => quadrants(city, state.clone(), region_count),
        (None, Some(state), Some(distribution)) if distribution.len() > 1 => {
            state_distribution_regions(distribution)
        }
        (None, Some(state), _) => top_cities_in_state(state, region_count),
        (None, None, Some(distribution)) if !distribution.is_empty() => state_distribution_regions(distribution),
        (None, None, _) => vec![Region {
            name: "nationwide".to_string(),
            narrative_focus: "no geography constraint; search broadly".to_string(),
            state: None,
            city: None,
            per_region_target,
        }],
    };

    regions
        .into_iter()
        .map(|mut region| {
            region.per_region_target = per_region_target;
            region
        })
        .collect()
}

fn quadrants(city: &str, state: Option<String>, region_count: u32) -> Vec<Region> {
    if region_count <= 1 {
        return vec![Region {
            name: city.to_string(),
            narrative_focus: format!("companies headquartered in or near {city}"),
            state,
            city: Some(city.to_string()),
            per_region_target: 0,
        }];
    }

    (1..=region_count)
        .map(|quadrant| Region {
            name: format!("{city} quadrant {quadrant}"),
            narrative_focus: format!("companies in the {quadrant} quadrant of {city}"),
            state: state.clone(),
            city: Some(city.to_string()),
            per_region_target: 0,
        })
        .collect()
}

fn top_cities_in_state(state: &str, region_count: u32) -> Vec<Region> {
    (1..=region_count)
        .map(|rank| Region {
            name: format!("{state} top city #{rank}"),
            narrative_focus: format!("companies among the top {rank}-ranked metro areas of {state}"),
            state: Some(state.to_string()),
            city: None,
            per_region_target: 0,
        })
        .collect()
}

fn state_distribution_regions(distribution: &[leadgen_domain_models::StateQuota]) -> Vec<Region> {
    distribution
        .iter()
        .map(|quota| Region {
            name: quota.state.clone(),
            narrative_focus: format!("companies in {}, targeting roughly {} of the final count", quota.state, quota.quantity),
            state: Some(quota.state.clone()),
            city: None,
            per_region_target: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_domain_models::{Geography, StateQuota};

    fn criteria(geography: Geography, target_distribution: Option<Vec<StateQuota>>) -> RunCriteria {
        RunCriteria {
            pms: None,
            geography,
            units_min: None,
            target_distribution,
            notification_email: "ops@example.com".to_string(),
        }
    }

    #[test]
    fn single_city_yields_one_region_by_default() {
        let criteria = criteria(
            Geography {
                city: Some("Boulder".to_string()),
                state: Some("CO".to_string()),
            },
            None,
        );
        let regions = partition_geography(&criteria, 1, 10);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].city.as_deref(), Some("Boulder"));
    }

    #[test]
    fn single_city_splits_into_quadrants_when_region_count_raised() {
        let criteria = criteria(
            Geography {
                city: Some("Denver".to_string()),
                state: None,
            },
            None,
        );
        let regions = partition_geography(&criteria, 4, 20);
        assert_eq!(regions.len(), 4);
        assert!(regions[0].name.contains("quadrant"));
    }

    #[test]
    fn multi_state_distribution_yields_one_region_per_state() {
        let distribution = vec![
            StateQuota { state: "CO".to_string(), quantity: 6 },
            StateQuota { state: "TX".to_string(), quantity: 4 },
        ];
        let criteria = criteria(Geography::default(), Some(distribution));
        let regions = partition_geography(&criteria, 1, 10);
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn no_geography_falls_back_to_nationwide() {
        let criteria = criteria(Geography::default(), None);
        let regions = partition_geography(&criteria, 1, 10);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "nationwide");
    }
}
