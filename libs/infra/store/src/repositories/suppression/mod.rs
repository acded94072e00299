// [libs/infra/store/src/repositories/suppression/mod.rs]
/*!
 * APARATO: SUPPRESSED DOMAIN REPOSITORY
 * RESPONSABILIDAD: ALMACÉN LOCAL DE LA UNIÓN DE DOMINIOS EXCLUIDOS
 *
 * Esta tabla guarda la porción "interna" del Oráculo de Supresión
 * (clientes existentes, contacto reciente, denylist explícito). La
 * porción CRM externa vive en `libs/infra/agent-client` y se fusiona
 * con este conjunto en el sitio de llamada, nunca aquí.
 */

pub mod queries;

use std::collections::HashSet;

use chrono::Utc;
use leadgen_domain_models::{CompanyCandidate, SuppressedDomain};
use libsql::{params, Connection, Row};
use tracing::instrument;

use self::queries as sql;
use crate::errors::StoreError;

pub struct SuppressionRepository {
    connection: Connection,
}

impl SuppressionRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self))]
    pub async fn record_suppression(&self, entry: &SuppressedDomain) -> Result<(), StoreError> {
        let normalized = CompanyCandidate::normalize_domain(&entry.domain);
        self.connection
            .execute(
                sql::RECORD_SUPPRESSION,
                params![
                    normalized,
                    entry.source.as_str(),
                    entry.recorded_at.to_rfc3339(),
                    entry.expires_at.map(|ts| ts.to_rfc3339()),
                ],
            )
            .await?;
        Ok(())
    }

    /// Unión, en minúsculas, de todos los dominios suprimidos cuya
    /// entrada aún está vigente. Insensible a mayúsculas por
    /// construcción: toda entrada se normaliza al escribir.
    pub async fn list_suppressed_domains(&self) -> Result<HashSet<String>, StoreError> {
        let now = Utc::now();
        let mut rows = self.connection.query(sql::LIST_ACTIVE_DOMAINS, params![now.to_rfc3339()]).await?;
        let mut domains = HashSet::new();
        while let Some(row) = rows.next().await? {
            domains.insert(row_domain(&row)?);
        }
        Ok(domains)
    }
}

fn row_domain(row: &Row) -> Result<String, StoreError> {
    let domain: String = row.get(0)?;
    Ok(domain)
}
