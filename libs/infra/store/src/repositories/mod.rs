// [libs/infra/store/src/repositories/mod.rs]
//! Un módulo por tabla, cada uno con su propio `queries.rs` de
//! sentencias SQL nombradas y un repositorio que las ejecuta.

pub mod company;
pub mod contact;
pub mod research;
pub mod run;
pub mod seed_catalog;
pub mod suppression;
pub mod worker;

pub use company::CompanyRepository;
pub use contact::ContactRepository;
pub use research::ResearchRepository;
pub use run::RunRepository;
pub use seed_catalog::{SeedCatalogRepository, SeedCompany};
pub use suppression::SuppressionRepository;
pub use worker::WorkerRepository;
