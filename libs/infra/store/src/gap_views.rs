// [libs/infra/store/src/gap_views.rs]
/*!
 * APARATO: GAP VIEWS
 * RESPONSABILIDAD: COMPONER CONTEOS MATERIALIZADOS CON LA ARITMÉTICA PURA
 *
 * `leadgen_core_gap_math` no sabe nada de SQL; este módulo es el único
 * punto donde sus fórmulas se alimentan con los agregados reales de un
 * Run concreto. Ningún worker debería recomputar estas brechas con sus
 * propias consultas: todos pasan por aquí para que la noción de "listo"
 * sea idéntica en descubrimiento, investigación y contactos.
 */

use leadgen_core_gap_math::{
    company_gap, contact_gap, contact_gap_per_company, discovery_target, resume_plan, CompanyGap, ContactGap,
    ContactGapPerCompany, ResumePlan,
};
use libsql::Connection;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::repositories::{CompanyRepository, ContactRepository, RunRepository};

pub struct GapViews {
    connection: Connection,
}

impl GapViews {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Brecha de la etapa de descubrimiento para un Run: cuántas
    /// empresas `validated`/`promoted` faltan para `target_quantity`.
    pub async fn company_gap(&self, run_id: Uuid) -> Result<CompanyGap, StoreError> {
        let runs = RunRepository::new(self.connection.clone());
        let companies = CompanyRepository::new(self.connection.clone());

        let run = runs.get_run(run_id).await?;
        let ready = companies.count_ready(run_id).await?;
        Ok(company_gap(run.target_quantity, ready))
    }

    /// Objetivo de descubrimiento sobremuestreado para un Run, derivado
    /// de su `target_quantity` y del factor de sobremuestreo configurado.
    pub async fn discovery_target(&self, run_id: Uuid, oversample_factor: f64) -> Result<u32, StoreError> {
        let runs = RunRepository::new(self.connection.clone());
        let run = runs.get_run(run_id).await?;
        Ok(discovery_target(run.target_quantity, oversample_factor))
    }

    /// Brecha de contactos de una única empresa elegible.
    pub async fn contact_gap_for_company(&self, run_id: Uuid, company_id: Uuid) -> Result<ContactGapPerCompany, StoreError> {
        let runs = RunRepository::new(self.connection.clone());
        let contacts = ContactRepository::new(self.connection.clone());

        let run = runs.get_run(run_id).await?;
        let ready = contacts.count_ready_for_company(run_id, company_id).await?;
        Ok(contact_gap_per_company(ready, run.contacts_min, run.contacts_max))
    }

    /// Brecha de contactos agregada sobre todas las empresas elegibles
    /// del Run: suma de los faltantes para `contacts_min` y de la
    /// capacidad restante hasta `contacts_max`.
    pub async fn contact_gap(&self, run_id: Uuid) -> Result<ContactGap, StoreError> {
        let runs = RunRepository::new(self.connection.clone());
        let contacts = ContactRepository::new(self.connection.clone());

        let run = runs.get_run(run_id).await?;
        let per_company: Vec<ContactGapPerCompany> = contacts
            .contacts_ready_per_company(run_id)
            .await?
            .into_iter()
            .map(|(_, ready)| contact_gap_per_company(ready, run.contacts_min, run.contacts_max))
            .collect();
        Ok(contact_gap(&per_company))
    }

    /// Reconstruye el plan de reanudación de un Run a partir únicamente
    /// de lo persistido: ningún worker necesita estado en memoria para
    /// retomar un Run tras un reinicio.
    pub async fn resume_plan(&self, run_id: Uuid) -> Result<ResumePlan, StoreError> {
        let companies = self.company_gap(run_id).await?;
        let contacts = self.contact_gap(run_id).await?;
        Ok(resume_plan(companies, contacts))
    }
}
