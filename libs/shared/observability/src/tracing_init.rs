// [libs/shared/observability/src/tracing_init.rs]
/*!
 * APARATO: TRACING BOOTSTRAP
 * RESPONSABILIDAD: INICIALIZACIÓN DUAL DEV/PROD DEL SUSCRIPTOR GLOBAL
 *
 * En desarrollo (`debug_assertions`) emite texto compacto y legible;
 * en producción emite JSON aplanado, consumible por cualquier
 * agregador de logs. El filtro por defecto sube a `debug` solo para
 * el propio servicio y mantiene `warn` para las dependencias de
 * transporte ruidosas (grounded on the teacher's heimdall layering).
 */

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa el suscriptor global de `tracing` para un binario dado.
/// Llamar más de una vez en el mismo proceso entra en pánico (comportamiento
/// de `tracing_subscriber`, no ampliado aquí).
pub fn init_tracing(service_name: &str) {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{service_name}={default_level},tower_http=warn,hyper=warn,libsql=warn").into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    }

    tracing::info!(service = service_name, "tracing initialized");
}
