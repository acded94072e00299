// [libs/infra/store/src/client.rs]
/*!
 * APARATO: RUN STORE CONNECTION CLIENT
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DE ENLACES Y PERSISTENCIA ACID
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::{error, info, instrument};

use crate::errors::StoreError;
use crate::schema::apply_schema;

#[derive(Clone)]
pub struct StoreClient {
    driver: Arc<Database>,
    /// Mantiene viva la base en memoria: sin esta ancla, SQLite purga el
    /// segmento de RAM en cuanto la primera conexión se cierra.
    _memory_anchor: Option<Arc<Connection>>,
}

impl StoreClient {
    #[instrument(skip(access_token))]
    pub async fn connect(connection_url: &str, access_token: Option<String>) -> Result<Self, StoreError> {
        if connection_url.is_empty() {
            return Err(StoreError::ConfigurationError("STORE_DATABASE_URL is empty".into()));
        }

        info!(url = connection_url, "connecting to run store");

        let is_remote = connection_url.starts_with("libsql://") || connection_url.starts_with("https://");
        let is_memory = connection_url.contains(":memory:");

        let driver = if is_remote {
            let token = access_token
                .ok_or_else(|| StoreError::ConfigurationError("remote connection requires an access token".into()))?;
            Builder::new_remote(connection_url.to_string(), token).build().await
        } else {
            Builder::new_local(connection_url).build().await
        }
        .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

        let shared_driver = Arc::new(driver);
        let mut anchor = None;

        if is_memory {
            let anchor_conn = shared_driver
                .connect()
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
            apply_schema(&anchor_conn)
                .await
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
            anchor = Some(Arc::new(anchor_conn));
        } else {
            let bootstrap_conn = shared_driver
                .connect()
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
            apply_schema(&bootstrap_conn)
                .await
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        }

        Ok(Self {
            driver: shared_driver,
            _memory_anchor: anchor,
        })
    }

    pub fn connection(&self) -> Result<Connection, StoreError> {
        self.driver.connect().map_err(|e| {
            error!(error = %e, "failed to open a connection from the pool");
            StoreError::ConnectionError(e.to_string())
        })
    }
}
