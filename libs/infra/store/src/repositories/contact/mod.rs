// [libs/infra/store/src/repositories/contact/mod.rs]
/*!
 * APARATO: CONTACT CANDIDATE REPOSITORY
 * RESPONSABILIDAD: INSERCIÓN IDEMPOTENTE Y LECTURA PARA PROYECCIÓN DE ENTREGA
 */

pub mod queries;

use chrono::{DateTime, Utc};
use leadgen_domain_models::{CandidateStatus, ContactCandidate, InsertOutcome};
use libsql::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use self::queries as sql;
use crate::errors::StoreError;

pub struct ContactRepository {
    connection: Connection,
}

impl ContactRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, contact))]
    pub async fn insert_candidate(&self, contact: &ContactCandidate) -> Result<InsertOutcome, StoreError> {
        let signals_json = contact
            .signals
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?;
        let evidence_json = contact
            .evidence
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?;

        let affected = self
            .connection
            .execute(
                sql::INSERT_CANDIDATE,
                params![
                    contact.id.to_string(),
                    contact.run_id.to_string(),
                    contact.company_id.to_string(),
                    contact.full_name.clone(),
                    contact.title.clone(),
                    contact.email.clone(),
                    contact.linkedin_url.clone(),
                    contact.department.clone(),
                    contact.seniority.clone(),
                    contact.quality_score,
                    signals_json,
                    evidence_json,
                    contact.status.as_str(),
                    contact.idempotency_key.clone(),
                    contact.discovered_at.to_rfc3339(),
                ],
            )
            .await?;

        if affected == 0 {
            Ok(InsertOutcome::AlreadyPresent)
        } else {
            Ok(InsertOutcome::Inserted(contact.id))
        }
    }

    pub async fn count_ready_for_company(&self, run_id: Uuid, company_id: Uuid) -> Result<u32, StoreError> {
        let mut rows = self
            .connection
            .query(sql::COUNT_READY_FOR_COMPANY, params![run_id.to_string(), company_id.to_string()])
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::MappingError("count query returned no row".into()))?;
        let count: i64 = row.get(0)?;
        Ok(count as u32)
    }

    pub async fn list_for_company(&self, run_id: Uuid, company_id: Uuid) -> Result<Vec<ContactCandidate>, StoreError> {
        let mut rows = self
            .connection
            .query(sql::LIST_FOR_COMPANY, params![run_id.to_string(), company_id.to_string()])
            .await?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next().await? {
            contacts.push(row_to_contact(&row)?);
        }
        Ok(contacts)
    }

    pub async fn list_ready_for_run(&self, run_id: Uuid) -> Result<Vec<ContactCandidate>, StoreError> {
        let mut rows = self.connection.query(sql::LIST_READY_FOR_RUN, params![run_id.to_string()]).await?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next().await? {
            contacts.push(row_to_contact(&row)?);
        }
        Ok(contacts)
    }

    /// Cuenta de contactos listos por empresa elegible, insumo directo
    /// de `leadgen_core_gap_math::contact_gap_per_company`.
    pub async fn contacts_ready_per_company(&self, run_id: Uuid) -> Result<Vec<(Uuid, u32)>, StoreError> {
        let mut rows = self
            .connection
            .query(sql::CONTACTS_MIN_GAP_PER_COMPANY, params![run_id.to_string()])
            .await?;
        let mut pairs = Vec::new();
        while let Some(row) = rows.next().await? {
            let id: String = row.get(0)?;
            let ready: i64 = row.get(1)?;
            pairs.push((Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?, ready as u32));
        }
        Ok(pairs)
    }
}

fn row_to_contact(row: &Row) -> Result<ContactCandidate, StoreError> {
    let id: String = row.get(0)?;
    let run_id: String = row.get(1)?;
    let company_id: String = row.get(2)?;
    let full_name: String = row.get(3)?;
    let title: Option<String> = row.get(4)?;
    let email: Option<String> = row.get(5)?;
    let linkedin_url: Option<String> = row.get(6)?;
    let department: Option<String> = row.get(7)?;
    let seniority: Option<String> = row.get(8)?;
    let quality_score: Option<f64> = row.get(9)?;
    let signals_json: Option<String> = row.get(10)?;
    let evidence_json: Option<String> = row.get(11)?;
    let status: String = row.get(12)?;
    let idempotency_key: Option<String> = row.get(13)?;
    let worker_id: Option<String> = row.get(14)?;
    let lease_until: Option<String> = row.get(15)?;
    let discovered_at: String = row.get(16)?;

    Ok(ContactCandidate {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        run_id: Uuid::parse_str(&run_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        company_id: Uuid::parse_str(&company_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        full_name,
        title,
        email,
        linkedin_url,
        department,
        seniority,
        quality_score,
        signals: signals_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        evidence: evidence_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        status: CandidateStatus::parse(&status).ok_or_else(|| StoreError::MappingError(format!("unknown status {status}")))?,
        idempotency_key,
        worker_id: worker_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        lease_until: lease_until
            .map(|raw| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc)))
            .transpose()
            .map_err(|e| StoreError::MappingError(e.to_string()))?,
        discovered_at: DateTime::parse_from_rfc3339(&discovered_at)
            .map_err(|e| StoreError::MappingError(e.to_string()))?
            .with_timezone(&Utc),
    })
}
