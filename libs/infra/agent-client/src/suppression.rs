// [libs/infra/agent-client/src/suppression.rs]
/*!
 * APARATO: CRM SUPPRESSION SOURCE
 * RESPONSABILIDAD: PORCIÓN EXTERNA DEL ORÁCULO DE SUPRESIÓN
 *
 * El Oráculo de Supresión es la unión del conjunto interno (persistido
 * en `leadgen-infra-store::SuppressionRepository`) con este contrato
 * externo, consultado contra el CRM de la organización. Ninguna de las
 * dos partes conoce a la otra: el sitio de llamada hace la unión.
 */

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AgentClientError;

#[async_trait]
pub trait CrmSuppressionSource: Send + Sync {
    async fn suppressed_domains(&self) -> Result<HashSet<String>, AgentClientError>;
}

#[derive(Deserialize)]
struct CrmSuppressionListResponse {
    domains: Vec<String>,
}

/// Implementación de producción: consulta el endpoint de supresión del
/// CRM de la organización a través del mismo gateway HTTP que el
/// Agente, pero bajo una ruta distinta y sin el contrato de rol/esquema.
pub struct HttpCrmSuppressionSource {
    session: Client,
    crm_base_url: String,
}

impl HttpCrmSuppressionSource {
    pub fn new(crm_base_url: String, crm_token: String) -> Result<Self, AgentClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = reqwest::header::HeaderValue::from_str(&format!("Bearer {crm_token}"))
            .map_err(|e| AgentClientError::ConfigurationError(e.to_string()))?;
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let session = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(20))
            .build()?;

        Ok(Self {
            session,
            crm_base_url: crm_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CrmSuppressionSource for HttpCrmSuppressionSource {
    #[instrument(skip(self))]
    async fn suppressed_domains(&self) -> Result<HashSet<String>, AgentClientError> {
        let url = format!("{}/api/v1/crm/suppressed-domains", self.crm_base_url);
        let response = self.session.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(AgentClientError::GatewayRejection(format!("HTTP_{}", response.status())));
        }

        let parsed: CrmSuppressionListResponse = response.json().await?;
        Ok(parsed.domains.into_iter().map(|d| d.to_lowercase()).collect())
    }
}

/// Implementación estática usada en pruebas y en despliegues sin un CRM
/// configurado: devuelve siempre el mismo conjunto fijo.
pub struct StaticCrmSuppressionSource {
    domains: HashSet<String>,
}

impl StaticCrmSuppressionSource {
    pub fn new(domains: HashSet<String>) -> Self {
        Self { domains }
    }

    pub fn empty() -> Self {
        Self { domains: HashSet::new() }
    }
}

#[async_trait]
impl CrmSuppressionSource for StaticCrmSuppressionSource {
    async fn suppressed_domains(&self) -> Result<HashSet<String>, AgentClientError> {
        Ok(self.domains.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_returns_fixed_set() {
        let mut domains = HashSet::new();
        domains.insert("suppressed.example.com".to_string());
        let source = StaticCrmSuppressionSource::new(domains);

        let result = source.suppressed_domains().await.unwrap();
        assert!(result.contains("suppressed.example.com"));
    }

    #[tokio::test]
    async fn empty_source_returns_nothing() {
        let source = StaticCrmSuppressionSource::empty();
        assert!(source.suppressed_domains().await.unwrap().is_empty());
    }
}
