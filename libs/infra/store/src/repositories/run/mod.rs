// [libs/infra/store/src/repositories/run/mod.rs]
/*!
 * APARATO: RUN REPOSITORY
 * RESPONSABILIDAD: CICLO DE VIDA DEL RUN Y SUS TRANSICIONES DE ETAPA/ESTADO
 */

pub mod queries;

use chrono::Utc;
use leadgen_domain_models::{Run, RunCriteria, RunStatus, Stage};
use libsql::{params, Connection, Row};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use self::queries as sql;
use crate::errors::StoreError;

pub struct RunRepository {
    connection: Connection,
}

impl RunRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, criteria))]
    pub async fn create_run(
        &self,
        criteria: &RunCriteria,
        target_quantity: u32,
        contacts_min: u32,
        contacts_max: u32,
    ) -> Result<Uuid, StoreError> {
        Run::validate_bounds(target_quantity, contacts_min, contacts_max)
            .map_err(StoreError::InvalidTransition)?;

        let run_id = Uuid::new_v4();
        let criteria_json = serde_json::to_string(criteria)
            .map_err(|e| StoreError::MappingError(e.to_string()))?;

        self.connection
            .execute(
                sql::CREATE_RUN,
                params![
                    run_id.to_string(),
                    Utc::now().to_rfc3339(),
                    criteria_json,
                    target_quantity,
                    contacts_min,
                    contacts_max
                ],
            )
            .await?;

        info!(run_id = %run_id, "run created");
        Ok(run_id)
    }

    pub async fn get_run(&self, run_id: Uuid) -> Result<Run, StoreError> {
        let mut rows = self.connection.query(sql::GET_RUN, params![run_id.to_string()]).await?;
        match rows.next().await? {
            Some(row) => row_to_run(&row),
            None => Err(StoreError::RunNotFound),
        }
    }

    pub async fn list_active_runs(&self, stage_filter: Option<Stage>) -> Result<Vec<Run>, StoreError> {
        let mut rows = match stage_filter {
            Some(stage) => {
                self.connection
                    .query(sql::LIST_ACTIVE_RUNS_BY_STAGE, params![stage.as_str()])
                    .await?
            }
            None => self.connection.query(sql::LIST_ACTIVE_RUNS, ()).await?,
        };

        let mut runs = Vec::new();
        while let Some(row) = rows.next().await? {
            runs.push(row_to_run(&row)?);
        }
        Ok(runs)
    }

    /// Avanza la etapa de un Run. Rechaza un retroceso o un salto a una
    /// etapa anterior a la actual (monotonicidad, ver `Stage::ordinal`).
    #[instrument(skip(self))]
    pub async fn set_stage(&self, run_id: Uuid, new_stage: Stage) -> Result<(), StoreError> {
        let run = self.get_run(run_id).await?;
        if run.status.is_terminal() {
            return Err(StoreError::InvalidTransition(
                "cannot change stage of a run with terminal status".to_string(),
            ));
        }
        if new_stage.ordinal() < run.stage.ordinal() {
            return Err(StoreError::InvalidTransition(format!(
                "stage would regress from {} to {}",
                run.stage.as_str(),
                new_stage.as_str()
            )));
        }

        let affected = self
            .connection
            .execute(sql::SET_STAGE, params![new_stage.as_str(), run_id.to_string()])
            .await?;
        if affected == 0 {
            return Err(StoreError::RunNotFound);
        }
        info!(run_id = %run_id, stage = new_stage.as_str(), "stage advanced");
        Ok(())
    }

    /// Cambia el estado de un Run. Una vez terminal, ningún worker puede
    /// sobrescribirlo (solo el endpoint de decisión de usuario puede,
    /// vía una llamada separada que no pasa por esta validación).
    #[instrument(skip(self, notes))]
    pub async fn set_status(&self, run_id: Uuid, new_status: RunStatus, notes: Option<&str>) -> Result<(), StoreError> {
        let run = self.get_run(run_id).await?;
        if run.status.is_terminal() {
            warn!(run_id = %run_id, "attempted to mutate a run with terminal status");
            return Err(StoreError::InvalidTransition(
                "run status is already terminal".to_string(),
            ));
        }

        let affected = match notes {
            Some(notes) => {
                self.connection
                    .execute(sql::SET_STATUS_WITH_NOTES, params![new_status.as_str(), notes, run_id.to_string()])
                    .await?
            }
            None => {
                self.connection
                    .execute(sql::SET_STATUS, params![new_status.as_str(), run_id.to_string()])
                    .await?
            }
        };
        if affected == 0 {
            return Err(StoreError::RunNotFound);
        }
        info!(run_id = %run_id, status = new_status.as_str(), "status updated");
        Ok(())
    }

    /// Agrega texto a `notes` sin reemplazar el historial existente; usado
    /// por el fallback de brecha acotada y por fallas parciales de región.
    pub async fn append_notes(&self, run_id: Uuid, marker: &str) -> Result<(), StoreError> {
        let affected = self
            .connection
            .execute(sql::APPEND_NOTES, params![marker, run_id.to_string()])
            .await?;
        if affected == 0 {
            return Err(StoreError::RunNotFound);
        }
        Ok(())
    }

    /// Archiva un Run sin importar su estado actual — incluyendo uno ya
    /// terminal (`completed`/`error`), que es precisamente el caso de uso:
    /// retirar de la vista de runs activos algo que ya concluyó. Esta es
    /// la única operación que la especificación permite fuera de
    /// `set_status` para mutar un estado terminal.
    #[instrument(skip(self))]
    pub async fn archive_run(&self, run_id: Uuid) -> Result<(), StoreError> {
        let affected = self
            .connection
            .execute(sql::ARCHIVE_RUN, params![Utc::now().to_rfc3339(), run_id.to_string()])
            .await?;
        if affected == 0 {
            return Err(StoreError::RunNotFound);
        }
        info!(run_id = %run_id, "run archived administratively");
        Ok(())
    }

    /// Restaura un Run archivado al estado dado por el operador
    /// (típicamente `active`, para relanzar el pipeline tras editar
    /// criterio). Falla si el Run no está actualmente archivado, para
    /// que la operación siga siendo explícita y no un `set_status` disfrazado.
    #[instrument(skip(self))]
    pub async fn unarchive_run(&self, run_id: Uuid, restored_status: RunStatus) -> Result<(), StoreError> {
        let affected = self
            .connection
            .execute(sql::UNARCHIVE_RUN, params![restored_status.as_str(), run_id.to_string()])
            .await?;
        if affected == 0 {
            return Err(StoreError::InvalidTransition(
                "run is not currently archived".to_string(),
            ));
        }
        info!(run_id = %run_id, status = restored_status.as_str(), "run unarchived administratively");
        Ok(())
    }
}

fn row_to_run(row: &Row) -> Result<Run, StoreError> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(1)?;
    let criteria_json: String = row.get(2)?;
    let target_quantity: i64 = row.get(3)?;
    let contacts_min: i64 = row.get(4)?;
    let contacts_max: i64 = row.get(5)?;
    let stage: String = row.get(6)?;
    let status: String = row.get(7)?;
    let notes: String = row.get(8)?;

    Ok(Run {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::MappingError(e.to_string()))?
            .with_timezone(&Utc),
        criteria: serde_json::from_str(&criteria_json).map_err(|e| StoreError::MappingError(e.to_string()))?,
        target_quantity: target_quantity as u32,
        contacts_min: contacts_min as u32,
        contacts_max: contacts_max as u32,
        stage: Stage::parse(&stage).ok_or_else(|| StoreError::MappingError(format!("unknown stage {stage}")))?,
        status: RunStatus::parse(&status).ok_or_else(|| StoreError::MappingError(format!("unknown status {status}")))?,
        notes,
    })
}
