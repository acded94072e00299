// [apps/control-api/src/state.rs]
/*!
 * APARATO: ESTADO COMPARTIDO DE CONTROL-API
 * RESPONSABILIDAD: EL ÚNICO PUNTO DONDE LOS HANDLERS ACCEDEN AL RUN
 * STORE Y AL MAILER; NINGÚN HANDLER ABRE SU PROPIA CONEXIÓN
 */

use std::sync::Arc;

use leadgen_infra_mailer::Mailer;
use leadgen_infra_store::StoreClient;

#[derive(Clone)]
pub struct AppState {
    pub store: StoreClient,
    pub mailer: Arc<Mailer>,
}
