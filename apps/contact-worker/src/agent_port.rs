// [apps/contact-worker/src/agent_port.rs]
/*!
 * APARATO: PUERTO DEL CONTACT-AGENT
 * RESPONSABILIDAD: LÍMITE ANGOSTO QUE EL MOTOR DE CONTACTOS USA PARA
 * INVOCAR AL AGENTE, DESACOPLADO DEL TRANSPORTE HTTP CONCRETO
 */

use async_trait::async_trait;
use leadgen_domain_agent_contract::{AgentRequest, AgentResponse, ContactAgentOutput};
use leadgen_infra_agent_client::{AgentClient, AgentClientError};

#[async_trait]
pub trait ContactAgentPort: Send + Sync {
    async fn find_contacts(&self, request: AgentRequest) -> Result<AgentResponse<ContactAgentOutput>, AgentClientError>;
}

#[async_trait]
impl ContactAgentPort for AgentClient {
    async fn find_contacts(&self, request: AgentRequest) -> Result<AgentResponse<ContactAgentOutput>, AgentClientError> {
        self.invoke(&request).await
    }
}
