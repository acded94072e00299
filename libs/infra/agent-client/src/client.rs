// [libs/infra/agent-client/src/client.rs]
/*!
 * APARATO: AGENT GATEWAY UPLINK
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TRANSPORTE HTTP HACIA EL AGENTE DE RAZONAMIENTO
 *
 * El cliente no reintenta nada por su cuenta: el sitio de llamada (cada
 * worker) decide si envuelve una invocación bajo el arnés de
 * reintentos. Esto mantiene la política de reintentos en un único
 * lugar en vez de duplicarla dentro de cada adaptador de transporte.
 */

use leadgen_domain_agent_contract::{AgentRequest, AgentResponse};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::errors::AgentClientError;

pub struct AgentClient {
    session: Client,
    gateway_base_url: String,
}

impl AgentClient {
    pub fn new(gateway_base_url: String, gateway_token: String) -> Result<Self, AgentClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = reqwest::header::HeaderValue::from_str(&format!("Bearer {gateway_token}"))
            .map_err(|e| AgentClientError::ConfigurationError(e.to_string()))?;
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let session = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(20))
            .build()?;

        Ok(Self {
            session,
            gateway_base_url: gateway_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Invoca al Agente bajo un rol dado y decodifica la respuesta contra
    /// el tipo estructurado que el llamador solicita. El timeout de ~20s
    /// del cliente HTTP es el único control de tiempo aquí: el
    /// presupuesto total de una región lo gobierna el worker, no este
    /// transporte.
    #[instrument(skip(self, request), fields(role = ?request.role, schema = request.schema_name))]
    pub async fn invoke<T: DeserializeOwned>(&self, request: &AgentRequest) -> Result<AgentResponse<T>, AgentClientError> {
        let url = format!("{}/api/v1/agent/invoke", self.gateway_base_url);
        let response = self.session.post(&url).json(request).send().await?;

        if response.status() != StatusCode::OK {
            return Err(AgentClientError::GatewayRejection(format!("HTTP_{}", response.status())));
        }

        let body = response.text().await?;
        let parsed: AgentResponse<T> = serde_json::from_str(&body)?;
        info!(schema = request.schema_name, "agent invocation decoded");
        Ok(parsed)
    }
}
