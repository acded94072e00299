// [libs/infra/store/src/repositories/company/mod.rs]
/*!
 * APARATO: COMPANY CANDIDATE REPOSITORY
 * RESPONSABILIDAD: INSERCIÓN IDEMPOTENTE Y PROTOCOLO DE LEASE ATÓMICO
 */

pub mod queries;

use chrono::{DateTime, Duration, Utc};
use leadgen_domain_models::{CandidateStatus, ClaimOutcome, CompanyCandidate, InsertOutcome};
use libsql::{params, Connection, Row};
use tracing::{info, instrument};
use uuid::Uuid;

use self::queries as sql;
use crate::errors::StoreError;

pub struct CompanyRepository {
    connection: Connection,
}

impl CompanyRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, candidate))]
    pub async fn insert_candidate(&self, candidate: &CompanyCandidate) -> Result<InsertOutcome, StoreError> {
        let evidence_json = candidate
            .evidence
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?;

        let normalized_domain = CompanyCandidate::normalize_domain(&candidate.domain);

        let affected = self
            .connection
            .execute(
                sql::INSERT_CANDIDATE,
                params![
                    candidate.id.to_string(),
                    candidate.run_id.to_string(),
                    candidate.name.clone(),
                    candidate.website.clone(),
                    normalized_domain,
                    candidate.state.clone(),
                    candidate.description.clone(),
                    candidate.discovery_source.clone(),
                    candidate.pms_detected.clone(),
                    candidate.units_estimate,
                    evidence_json,
                    candidate.status.as_str(),
                    candidate.meets_all_requirements,
                    candidate.rejected_reasons.clone(),
                    candidate.idempotency_key.clone(),
                    candidate.discovered_at.to_rfc3339(),
                ],
            )
            .await?;

        if affected == 0 {
            info!(run_id = %candidate.run_id, domain = %normalized_domain, "candidate already present, ignored");
            Ok(InsertOutcome::AlreadyPresent)
        } else {
            Ok(InsertOutcome::Inserted(candidate.id))
        }
    }

    pub async fn count_ready(&self, run_id: Uuid) -> Result<u32, StoreError> {
        let mut rows = self.connection.query(sql::COUNT_READY, params![run_id.to_string()]).await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::MappingError("count query returned no row".into()))?;
        let count: i64 = row.get(0)?;
        Ok(count as u32)
    }

    pub async fn get_candidate(&self, company_id: Uuid) -> Result<CompanyCandidate, StoreError> {
        let mut rows = self
            .connection
            .query(sql::GET_CANDIDATE, params![company_id.to_string()])
            .await?;
        match rows.next().await? {
            Some(row) => row_to_candidate(&row),
            None => Err(StoreError::MappingError(format!("company {company_id} not found"))),
        }
    }

    /// Todas las candidatas `validated`/`promoted` de un Run, usadas por
    /// la entrega final para proyectar la tabla de empresas completa.
    pub async fn list_ready(&self, run_id: Uuid) -> Result<Vec<CompanyCandidate>, StoreError> {
        let mut rows = self.connection.query(sql::LIST_READY, params![run_id.to_string()]).await?;
        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            candidates.push(row_to_candidate(&row)?);
        }
        Ok(candidates)
    }

    /// Reclama atómicamente una empresa elegible para investigación bajo
    /// un lease. `SELECT` encuentra una candidata sin fila de research y
    /// sin lease activo; el `UPDATE` subsiguiente solo tiene éxito si el
    /// lease sigue libre en ese instante, lo que descarta la carrera
    /// contra otro worker sin necesitar bloqueo explícito de fila.
    #[instrument(skip(self))]
    pub async fn claim_for_research(
        &self,
        run_id: Uuid,
        worker_id: Uuid,
        lease_seconds: i64,
    ) -> Result<ClaimOutcome<CompanyCandidate>, StoreError> {
        let now = Utc::now();
        let mut rows = self
            .connection
            .query(sql::FIND_CLAIMABLE_FOR_RESEARCH, params![run_id.to_string(), now.to_rfc3339()])
            .await?;

        let Some(row) = rows.next().await? else {
            return Ok(ClaimOutcome::None);
        };
        let candidate = row_to_candidate(&row)?;

        let lease_until = now + Duration::seconds(lease_seconds);
        let affected = self
            .connection
            .execute(
                sql::CLAIM_COMPANY,
                params![worker_id.to_string(), lease_until.to_rfc3339(), candidate.id.to_string(), now.to_rfc3339()],
            )
            .await?;

        if affected == 0 {
            return Ok(ClaimOutcome::None);
        }

        info!(run_id = %run_id, company_id = %candidate.id, worker_id = %worker_id, "company claimed for research");
        Ok(ClaimOutcome::Claimed(CompanyCandidate {
            worker_id: Some(worker_id),
            lease_until: Some(lease_until),
            ..candidate
        }))
    }

    /// Reclama una empresa con `contacts_min_gap > 0`, devolviendo la
    /// empresa junto con el número de contactos aún necesarios.
    #[instrument(skip(self))]
    pub async fn claim_for_contacts(
        &self,
        run_id: Uuid,
        worker_id: Uuid,
        lease_seconds: i64,
    ) -> Result<ClaimOutcome<(CompanyCandidate, u32)>, StoreError> {
        let now = Utc::now();
        let mut rows = self
            .connection
            .query(sql::FIND_CLAIMABLE_FOR_CONTACTS, params![run_id.to_string(), now.to_rfc3339()])
            .await?;

        let Some(row) = rows.next().await? else {
            return Ok(ClaimOutcome::None);
        };
        let candidate = row_to_candidate(&row)?;
        let needed: i64 = row.get(18)?;

        let lease_until = now + Duration::seconds(lease_seconds);
        let affected = self
            .connection
            .execute(
                sql::CLAIM_COMPANY,
                params![worker_id.to_string(), lease_until.to_rfc3339(), candidate.id.to_string(), now.to_rfc3339()],
            )
            .await?;

        if affected == 0 {
            return Ok(ClaimOutcome::None);
        }

        info!(run_id = %run_id, company_id = %candidate.id, needed, "company claimed for contact discovery");
        Ok(ClaimOutcome::Claimed((
            CompanyCandidate {
                worker_id: Some(worker_id),
                lease_until: Some(lease_until),
                ..candidate
            },
            needed.max(0) as u32,
        )))
    }

    pub async fn release_lease(&self, company_id: Uuid) -> Result<(), StoreError> {
        self.connection
            .execute(sql::RELEASE_LEASE, params![company_id.to_string()])
            .await?;
        Ok(())
    }

    pub async fn reject_candidate(&self, company_id: Uuid, reason: &str) -> Result<(), StoreError> {
        self.connection
            .execute(sql::REJECT_CANDIDATE, params![reason, company_id.to_string()])
            .await?;
        Ok(())
    }
}

fn row_to_candidate(row: &Row) -> Result<CompanyCandidate, StoreError> {
    let id: String = row.get(0)?;
    let run_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let website: String = row.get(3)?;
    let domain: String = row.get(4)?;
    let state: Option<String> = row.get(5)?;
    let description: Option<String> = row.get(6)?;
    let discovery_source: String = row.get(7)?;
    let pms_detected: Option<String> = row.get(8)?;
    let units_estimate: Option<i64> = row.get(9)?;
    let evidence_json: Option<String> = row.get(10)?;
    let status: String = row.get(11)?;
    let meets_all_requirements: Option<bool> = row.get(12)?;
    let rejected_reasons: Option<String> = row.get(13)?;
    let idempotency_key: Option<String> = row.get(14)?;
    let worker_id: Option<String> = row.get(15)?;
    let lease_until: Option<String> = row.get(16)?;
    let discovered_at: String = row.get(17)?;

    Ok(CompanyCandidate {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        run_id: Uuid::parse_str(&run_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        name,
        website,
        domain,
        state,
        description,
        discovery_source,
        pms_detected,
        units_estimate: units_estimate.map(|v| v as u32),
        evidence: evidence_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        status: CandidateStatus::parse(&status).ok_or_else(|| StoreError::MappingError(format!("unknown status {status}")))?,
        meets_all_requirements,
        rejected_reasons,
        idempotency_key,
        worker_id: worker_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        lease_until: parse_optional_rfc3339(lease_until)?,
        discovered_at: DateTime::parse_from_rfc3339(&discovered_at)
            .map_err(|e| StoreError::MappingError(e.to_string()))?
            .with_timezone(&Utc),
    })
}

fn parse_optional_rfc3339(value: Option<String>) -> Result<Option<DateTime<Utc>>, StoreError> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::MappingError(e.to_string()))
        })
        .transpose()
}
