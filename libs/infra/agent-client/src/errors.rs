// [libs/infra/agent-client/src/errors.rs]
/*!
 * APARATO: AGENT CLIENT ERROR CATALOG
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE LA VÍA HACIA EL GATEWAY
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentClientError {
    #[error("[L3_AGENT_NET_FAULT]: GATEWAY_UPLINK_UNREACHABLE -> {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("[L3_AGENT_DECODE_FAULT]: STRUCTURED_OUTPUT_MALFORMED -> {0}")]
    DecodingFault(#[from] serde_json::Error),

    #[error("[L3_AGENT_REJECT_FAULT]: GATEWAY_REJECTED_REQUEST -> status {0}")]
    GatewayRejection(String),

    #[error("[L3_AGENT_CONFIG_FAULT]: GATEWAY_CREDENTIALS_ABSENT -> {0}")]
    ConfigurationError(String),
}
