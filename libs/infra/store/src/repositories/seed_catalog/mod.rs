// [libs/infra/store/src/repositories/seed_catalog/mod.rs]
/*!
 * APARATO: SEED CATALOG REPOSITORY
 * RESPONSABILIDAD: LECTURA DE COMPAÑÍAS PRE-CATALOGADAS PARA ARRANQUE BARATO
 *
 * El catálogo es de solo lectura desde la perspectiva del worker: se
 * puebla fuera de banda (importación, fixture de pruebas) y el
 * Discovery Worker solo lo consulta para llenar el objetivo sin
 * invocar al Agente cuando la combinación PMS/geografía ya está
 * bien cubierta.
 */

pub mod queries;

use libsql::{params, Connection, Row};
use tracing::instrument;

use self::queries as sql;
use crate::errors::StoreError;

#[derive(Debug, Clone)]
pub struct SeedCompany {
    pub id: String,
    pub pms: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub name: String,
    pub website: String,
    pub domain: String,
    pub units_estimate: Option<u32>,
}

pub struct SeedCatalogRepository {
    connection: Connection,
}

impl SeedCatalogRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Empresas del catálogo que coinciden con el PMS y, cuando están
    /// presentes, el estado y la ciudad del criterio. Las columnas de
    /// geografía ausentes en el criterio no restringen la búsqueda.
    #[instrument(skip(self))]
    pub async fn matching(&self, pms: &str, state: Option<&str>, city: Option<&str>) -> Result<Vec<SeedCompany>, StoreError> {
        let mut rows = match (state, city) {
            (Some(state), Some(city)) => {
                self.connection.query(sql::MATCH_ALL_FILTERS, params![pms, state, city]).await?
            }
            (Some(state), None) => self.connection.query(sql::MATCH_PMS_AND_STATE, params![pms, state]).await?,
            _ => self.connection.query(sql::MATCH_PMS_ONLY, params![pms]).await?,
        };

        let mut seeds = Vec::new();
        while let Some(row) = rows.next().await? {
            seeds.push(row_to_seed(&row)?);
        }
        Ok(seeds)
    }
}

fn row_to_seed(row: &Row) -> Result<SeedCompany, StoreError> {
    let id: String = row.get(0)?;
    let pms: String = row.get(1)?;
    let state: Option<String> = row.get(2)?;
    let city: Option<String> = row.get(3)?;
    let name: String = row.get(4)?;
    let website: String = row.get(5)?;
    let domain: String = row.get(6)?;
    let units_estimate: Option<i64> = row.get(7)?;

    Ok(SeedCompany {
        id,
        pms,
        state,
        city,
        name,
        website,
        domain,
        units_estimate: units_estimate.map(|v| v as u32),
    })
}
