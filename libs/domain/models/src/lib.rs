// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS CRATE
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: TIPOS COMPARTIDOS POR TODO EL PIPELINE
 *
 * Ningún tipo en esta crate depende de libsql, reqwest ni de ninguna
 * otra dependencia de infraestructura: es el vocabulario puro que
 * workers, repositorios y la API de control comparten.
 * =================================================================
 */

pub mod company;
pub mod contact;
pub mod decision;
pub mod outcomes;
pub mod research;
pub mod run;
pub mod suppression;
pub mod worker;

pub use company::{CandidateStatus, CompanyCandidate};
pub use contact::ContactCandidate;
pub use decision::{DecisionMarker, DecisionOption, DECISION_MARKER_FENCE};
pub use outcomes::{ClaimOutcome, InsertOutcome, Transition};
pub use research::{CompanyResearch, ResearchStatus};
pub use run::{Geography, Run, RunCriteria, RunStatus, Stage, StateQuota};
pub use suppression::{SuppressedDomain, SuppressionSource};
pub use worker::{WorkerHeartbeat, WorkerRole, WorkerStatus};
