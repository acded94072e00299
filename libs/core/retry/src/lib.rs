// [libs/core/retry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: RETRY HARNESS
 * CLASIFICACIÓN: CORE LAYER (ESTRATO L1)
 * RESPONSABILIDAD: BACKOFF EXPONENCIAL ACOTADO PARA TODA LLAMADA TRANSITORIA
 *
 * Envuelve cada llamada al Agente, a la base de datos y a herramientas
 * externas con la misma política: primer intento inmediato, espera
 * `base_delay * exponential_base^(k-1)` acotada por `max_delay_cap`
 * entre intentos subsecuentes, sin clasificar errores como
 * reintentables o no — distinguirlos de forma confiable entre
 * backends heterogéneos de herramientas no es viable, así que la
 * capa superior decide si vale la pena envolver la llamada.
 * =================================================================
 */

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Política de reintentos. Los tres constructores nombrados reflejan los
/// tres perfiles de llamada transitoria que el pipeline envuelve.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub exponential_base: f64,
    pub max_delay_cap: Duration,
}

impl RetryPolicy {
    /// Llamadas al Agente de razonamiento: 3 intentos, base de 1s.
    pub fn for_agent() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            exponential_base: 2.0,
            max_delay_cap: Duration::from_secs(60),
        }
    }

    /// Operaciones contra el almacén: 5 intentos, base más corta porque
    /// las fallas transitorias de conexión suelen resolverse rápido.
    pub fn for_database() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(200),
            exponential_base: 2.0,
            max_delay_cap: Duration::from_secs(60),
        }
    }

    /// Llamadas a herramientas externas (gateway de búsqueda, CRM): 3
    /// intentos, misma base que el Agente.
    pub fn for_tool_call() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            exponential_base: 2.0,
            max_delay_cap: Duration::from_secs(60),
        }
    }

    /// Retardo antes del intento `attempt_index + 1` dado que el intento
    /// `attempt_index` (1-based) acaba de fallar.
    fn delay_for(&self, attempt_index: u32) -> Duration {
        let exponent = (attempt_index.saturating_sub(1)) as i32;
        let scaled = self.base_delay.as_secs_f64() * self.exponential_base.powi(exponent);
        let capped = scaled.min(self.max_delay_cap.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }
}

/// Ejecuta `operation` bajo la política dada. El primer intento es
/// inmediato; cada fallo subsecuente emite un log estructurado con el
/// índice de intento y la causa, y duerme el retardo acotado antes de
/// reintentar. Tras agotar `max_attempts`, el error original del último
/// intento se propaga sin envolver.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, operation_name: &str, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= policy.max_attempts {
                    return Err(error);
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    cause = %error,
                    "retry attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn delay_grows_exponentially_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            exponential_base: 2.0,
            max_delay_cap: Duration::from_secs(8),
        };
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
        assert_eq!(policy.delay_for(5), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn retry_returns_first_success_without_sleeping() {
        let policy = RetryPolicy::for_database();
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry(policy, "probe", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(42)
        })
        .await;
        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_exhausts_attempts_and_propagates_last_error() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            exponential_base: 1.0,
            max_delay_cap: Duration::from_millis(2),
        };
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry(policy, "probe", || async {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(format!("fault on attempt {attempt}"))
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result, Err("fault on attempt 3".to_string()));
    }

    #[tokio::test]
    async fn retry_recovers_after_transient_failure() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(1),
            exponential_base: 1.0,
            max_delay_cap: Duration::from_millis(2),
        };
        let calls = AtomicU32::new(0);
        let result: Result<&str, String> = retry(policy, "probe", || async {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 3 {
                Err("transient".to_string())
            } else {
                Ok("recovered")
            }
        })
        .await;
        assert_eq!(result, Ok("recovered"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
