// [libs/domain/delivery/src/company_table.rs]
/*!
 * APARATO: COMPANY EXPORT PROJECTION
 * RESPONSABILIDAD: PROYECTAR CompanyCandidate + CompanyResearch EN LAS
 * 17 COLUMNAS FIJAS DE LA TABLA DE EMPRESAS DE ENTREGA
 *
 * El orden de los campos de `CompanyExportRow` ES el orden de columnas
 * del CSV: `csv::Writer` serializa structs respetando el orden de
 * declaración, así que esta proyección es la única fuente de verdad
 * del esquema de salida.
 */

use chrono::{DateTime, Utc};
use leadgen_domain_agent_contract::ResearchFacts;
use leadgen_domain_models::{CompanyCandidate, CompanyResearch};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::DeliveryError;

#[derive(Debug, Clone, Serialize)]
pub struct CompanyExportRow {
    pub company_id: Uuid,
    pub name: String,
    pub website: String,
    pub domain: String,
    pub state: Option<String>,
    pub pms_detected: Option<String>,
    pub units_estimate: Option<u32>,
    pub discovery_source: String,
    pub status: String,
    pub meets_all_requirements: Option<bool>,
    pub agent_summary: Option<String>,
    pub confidence: Option<f64>,
    pub icp_tier: Option<String>,
    pub contacts_found: u32,
    pub created_at: DateTime<Utc>,
    pub research_completed_at: Option<DateTime<Utc>>,
    pub rejected_reasons: Option<String>,
}

/// Compone una fila de exportación a partir de un candidato, su
/// investigación opcional (puede faltar si el worker aún no la
/// completó al momento del corte) y el conteo de contactos ya listos.
pub fn project_company_row(candidate: &CompanyCandidate, research: Option<&CompanyResearch>, contacts_found: u32) -> CompanyExportRow {
    let agent_summary = research
        .and_then(|r| r.facts.clone())
        .and_then(|facts| serde_json::from_value::<ResearchFacts>(facts).ok())
        .and_then(|facts| facts.analysis_markdown);

    let icp_tier = research
        .and_then(|r| r.signals.clone())
        .and_then(|signals| signals.get("icp_tier").cloned())
        .and_then(|value| value.as_str().map(str::to_string));

    CompanyExportRow {
        company_id: candidate.id,
        name: candidate.name.clone(),
        website: candidate.website.clone(),
        domain: candidate.domain.clone(),
        state: candidate.state.clone(),
        pms_detected: candidate.pms_detected.clone(),
        units_estimate: candidate.units_estimate,
        discovery_source: candidate.discovery_source.clone(),
        status: candidate.status.as_str().to_string(),
        meets_all_requirements: candidate.meets_all_requirements,
        agent_summary,
        confidence: research.and_then(|r| r.confidence),
        icp_tier,
        contacts_found,
        created_at: candidate.discovered_at,
        research_completed_at: research.and_then(|r| r.researched_at),
        rejected_reasons: candidate.rejected_reasons.clone(),
    }
}

/// Serializa el conjunto de filas a un buffer CSV en memoria (UTF-8).
pub fn write_company_csv(rows: &[CompanyExportRow]) -> Result<String, DeliveryError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| DeliveryError::CsvWriteFault(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgen_domain_models::CandidateStatus;

    fn sample_candidate() -> CompanyCandidate {
        CompanyCandidate {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            name: "Acme Property Management".to_string(),
            website: "https://acmepm.com".to_string(),
            domain: "acmepm.com".to_string(),
            state: Some("CO".to_string()),
            description: None,
            discovery_source: "seed:catalog".to_string(),
            pms_detected: Some("Buildium".to_string()),
            units_estimate: Some(220),
            evidence: None,
            status: CandidateStatus::Promoted,
            meets_all_requirements: Some(true),
            rejected_reasons: None,
            idempotency_key: Some("acmepm.com".to_string()),
            worker_id: None,
            lease_until: None,
            discovered_at: Utc::now(),
        }
    }

    #[test]
    fn projection_extracts_analysis_markdown_as_summary() {
        let candidate = sample_candidate();
        let facts = serde_json::to_value(ResearchFacts {
            analysis_markdown: Some("Strong ICP fit.".to_string()),
            ..Default::default()
        })
        .unwrap();
        let research = CompanyResearch {
            id: Uuid::new_v4(),
            run_id: candidate.run_id,
            company_id: candidate.id,
            status: leadgen_domain_models::ResearchStatus::Complete,
            facts: Some(facts),
            signals: Some(serde_json::json!({"icp_tier": "A"})),
            confidence: Some(0.9),
            units_under_management: Some(220),
            pms_detected: Some("Buildium".to_string()),
            meets_all_requirements: Some(true),
            disqualifier: None,
            researched_at: Some(Utc::now()),
        };

        let row = project_company_row(&candidate, Some(&research), 2);
        assert_eq!(row.agent_summary.as_deref(), Some("Strong ICP fit."));
        assert_eq!(row.icp_tier.as_deref(), Some("A"));
        assert_eq!(row.contacts_found, 2);
    }

    #[test]
    fn projection_tolerates_missing_research() {
        let candidate = sample_candidate();
        let row = project_company_row(&candidate, None, 0);
        assert!(row.agent_summary.is_none());
        assert!(row.confidence.is_none());
    }

    #[test]
    fn csv_serialization_round_trips_header_and_rows() {
        let row = project_company_row(&sample_candidate(), None, 1);
        let csv_text = write_company_csv(&[row]).unwrap();
        assert!(csv_text.starts_with("company_id,name,website"));
        assert_eq!(csv_text.lines().count(), 2);
    }
}
