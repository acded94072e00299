// [libs/infra/store/src/repositories/research/mod.rs]
/*!
 * APARATO: COMPANY RESEARCH REPOSITORY
 * RESPONSABILIDAD: UPSERT DE ENRIQUECIMIENTO POR (RUN, COMPANY)
 */

pub mod queries;

use chrono::{DateTime, Utc};
use leadgen_domain_models::{CompanyResearch, ResearchStatus};
use libsql::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use self::queries as sql;
use crate::errors::StoreError;

pub struct ResearchRepository {
    connection: Connection,
}

impl ResearchRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, research))]
    pub async fn upsert_research(&self, research: &CompanyResearch) -> Result<(), StoreError> {
        let facts_json = research
            .facts
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?;
        let signals_json = research
            .signals
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?;

        self.connection
            .execute(
                sql::UPSERT_RESEARCH,
                params![
                    research.id.to_string(),
                    research.run_id.to_string(),
                    research.company_id.to_string(),
                    research.status.as_str(),
                    facts_json,
                    signals_json,
                    research.confidence,
                    research.units_under_management,
                    research.pms_detected.clone(),
                    research.meets_all_requirements,
                    research.disqualifier.clone(),
                    research.researched_at.map(|ts| ts.to_rfc3339()),
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn get_research(&self, run_id: Uuid, company_id: Uuid) -> Result<Option<CompanyResearch>, StoreError> {
        let mut rows = self
            .connection
            .query(sql::GET_RESEARCH, params![run_id.to_string(), company_id.to_string()])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_research(&row)?)),
            None => Ok(None),
        }
    }

    /// El research queue de un Run está vacío cuando ninguna empresa
    /// validada/promovida carece de fila de investigación; condición
    /// usada para decidir la transición a `contact_discovery`.
    pub async fn has_pending_research(&self, run_id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self
            .connection
            .query(sql::HAS_PENDING_RESEARCH, params![run_id.to_string()])
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::MappingError("count query returned no row".into()))?;
        let count: i64 = row.get(0)?;
        Ok(count > 0)
    }
}

fn row_to_research(row: &Row) -> Result<CompanyResearch, StoreError> {
    let id: String = row.get(0)?;
    let run_id: String = row.get(1)?;
    let company_id: String = row.get(2)?;
    let status: String = row.get(3)?;
    let facts_json: Option<String> = row.get(4)?;
    let signals_json: Option<String> = row.get(5)?;
    let confidence: Option<f64> = row.get(6)?;
    let units_under_management: Option<i64> = row.get(7)?;
    let pms_detected: Option<String> = row.get(8)?;
    let meets_all_requirements: Option<bool> = row.get(9)?;
    let disqualifier: Option<String> = row.get(10)?;
    let researched_at: Option<String> = row.get(11)?;

    Ok(CompanyResearch {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        run_id: Uuid::parse_str(&run_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        company_id: Uuid::parse_str(&company_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        status: ResearchStatus::parse(&status).ok_or_else(|| StoreError::MappingError(format!("unknown status {status}")))?,
        facts: facts_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        signals: signals_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        confidence,
        units_under_management: units_under_management.map(|v| v as u32),
        pms_detected,
        meets_all_requirements,
        disqualifier,
        researched_at: researched_at
            .map(|raw| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc)))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
    })
}
