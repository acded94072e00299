// [apps/research-worker/src/agent_port.rs]
/*!
 * APARATO: PUERTO DEL RESEARCH-AGENT
 * RESPONSABILIDAD: LÍMITE ANGOSTO QUE EL MOTOR DE INVESTIGACIÓN USA
 * PARA INVOCAR AL AGENTE, DESACOPLADO DEL TRANSPORTE HTTP CONCRETO
 */

use async_trait::async_trait;
use leadgen_domain_agent_contract::{AgentRequest, AgentResponse, ResearchAgentOutput};
use leadgen_infra_agent_client::{AgentClient, AgentClientError};

#[async_trait]
pub trait ResearchAgentPort: Send + Sync {
    async fn research(&self, request: AgentRequest) -> Result<AgentResponse<ResearchAgentOutput>, AgentClientError>;
}

#[async_trait]
impl ResearchAgentPort for AgentClient {
    async fn research(&self, request: AgentRequest) -> Result<AgentResponse<ResearchAgentOutput>, AgentClientError> {
        self.invoke(&request).await
    }
}
