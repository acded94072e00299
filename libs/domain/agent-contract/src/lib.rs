// [libs/domain/agent-contract/src/lib.rs]
/*!
 * =================================================================
 * APARATO: AGENT INVOCATION CONTRACT
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: TIPOS DE ENTRADA/SALIDA DEL AGENTE DE RAZONAMIENTO
 *
 * El núcleo del pipeline no enumera qué herramientas usa el Agente
 * (búsqueda, fetch de páginas, analizador de PMS, lookup de contactos):
 * asume que el propio Agente las gobierna y devuelve el mejor
 * resultado posible bajo el esquema tipado solicitado.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Rol bajo el cual se invoca al Agente. Cada rol acarrea su propio
/// esquema de salida y sus propias restricciones de prompt (el
/// list-agent tiene explícitamente prohibido obtener contactos).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    ListAgent,
    ResearchAgent,
    ContactAgent,
}

/// Solicitud enviada al Agente: un prompt de texto más el nombre del
/// esquema de salida tipado que debe honrar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub prompt: String,
    pub role: AgentRole,
    pub schema_name: &'static str,
}

/// Respuesta del Agente: el objeto tipado validado contra el esquema
/// solicitado, más el artefacto narrativo/markdown crudo que lo
/// acompaña (preservado para auditoría, nunca parseado de vuelta).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse<T> {
    pub structured: T,
    pub artifact_markdown: String,
}

/// Una empresa candidata tal como la reporta el list-agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredCompany {
    pub name: String,
    pub domain: String,
    pub website: String,
    pub state: Option<String>,
    pub pms: Option<String>,
    pub units: Option<u32>,
    pub evidence: Option<String>,
    pub quality_score: Option<f64>,
}

/// Metadatos que acompañan la lista de empresas descubiertas en una
/// región: la región misma y cualquier aviso que el Agente quiera
/// levantar (p. ej. "región agotada", "suppression list aplicada").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryMetadata {
    pub region_name: String,
    pub notes: Option<String>,
}

/// Esquema de salida del list-agent: debe incluir `companies` y nunca
/// contactos (hard constraint del prompt de descubrimiento).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryAgentOutput {
    pub companies: Vec<DiscoveredCompany>,
    pub metadata: DiscoveryMetadata,
}

/// Hechos estructurados recolectados por el research-agent. `analysis_markdown`
/// es la sección narrativa que la proyección de entrega extrae como
/// `agent_summary`; el resto son los campos desnormalizados que el
/// worker compara directamente contra el criterio del Run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResearchFacts {
    pub units_under_management: Option<u32>,
    pub pms_detected: Option<String>,
    pub headquarters_city: Option<String>,
    pub headquarters_state: Option<String>,
    pub founded_year: Option<u32>,
    pub property_mix: Option<String>,
    pub states_of_operation: Option<Vec<String>>,
    pub analysis_markdown: Option<String>,
}

/// Señales cualitativas que acompañan los hechos, usadas para ajustar
/// confianza pero nunca para decidir solas el cumplimiento de criterio.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResearchSignals {
    pub growth_trend: Option<String>,
    pub recent_news: Option<String>,
    pub technology_stack_notes: Option<String>,
    pub icp_tier: Option<String>,
    pub icp_fit_score: Option<f64>,
}

/// Esquema de salida del research-agent por entidad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAgentOutput {
    pub facts: ResearchFacts,
    pub signals: ResearchSignals,
    pub confidence: f64,
    pub meets_all_requirements: bool,
    pub disqualifier: Option<String>,
}

/// Un decisor encontrado por el contact-agent, con las cinco secciones
/// Markdown requeridas como campos nombrados además de los campos
/// estructurados de contacto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredContact {
    pub full_name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub professional_summary: Option<String>,
    pub personal_anecdotes: Option<String>,
    pub professional_anecdotes: Option<String>,
    pub sources: Option<String>,
    pub gaps: Option<String>,
}

/// Esquema de salida del contact-agent por empresa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAgentOutput {
    pub contacts: Vec<DiscoveredContact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_output_round_trips_through_json() {
        let output = DiscoveryAgentOutput {
            companies: vec![DiscoveredCompany {
                name: "Acme Property Management".to_string(),
                domain: "acmepm.com".to_string(),
                website: "https://acmepm.com".to_string(),
                state: Some("CO".to_string()),
                pms: Some("Buildium".to_string()),
                units: Some(120),
                evidence: None,
                quality_score: Some(0.92),
            }],
            metadata: DiscoveryMetadata {
                region_name: "Boulder".to_string(),
                notes: None,
            },
        };
        let json = serde_json::to_string(&output).expect("serialize");
        let parsed: DiscoveryAgentOutput = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.companies.len(), 1);
        assert_eq!(parsed.companies[0].domain, "acmepm.com");
    }

    #[test]
    fn agent_role_serializes_snake_case() {
        let value = serde_json::to_value(AgentRole::ListAgent).unwrap();
        assert_eq!(value, serde_json::json!("list_agent"));
    }
}
