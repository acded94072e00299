// [apps/discovery-worker/src/agent_port.rs]
/*!
 * APARATO: PUERTO DEL LIST-AGENT
 * RESPONSABILIDAD: LÍMITE ANGOSTO QUE EL MOTOR DE DESCUBRIMIENTO USA
 * PARA INVOCAR AL AGENTE, DESACOPLADO DEL TRANSPORTE HTTP CONCRETO
 *
 * El motor del worker solo conoce este trait; las pruebas lo implementan
 * con un agente en memoria, la producción con `AgentClient`.
 */

use async_trait::async_trait;
use leadgen_domain_agent_contract::{AgentRequest, AgentResponse, DiscoveryAgentOutput};
use leadgen_infra_agent_client::{AgentClient, AgentClientError};

#[async_trait]
pub trait DiscoveryAgentPort: Send + Sync {
    async fn discover(&self, request: AgentRequest) -> Result<AgentResponse<DiscoveryAgentOutput>, AgentClientError>;
}

#[async_trait]
impl DiscoveryAgentPort for AgentClient {
    async fn discover(&self, request: AgentRequest) -> Result<AgentResponse<DiscoveryAgentOutput>, AgentClientError> {
        self.invoke(&request).await
    }
}
