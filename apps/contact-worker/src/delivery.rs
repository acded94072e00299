// [apps/contact-worker/src/delivery.rs]
/*!
 * APARATO: ENSAMBLADOR DE ENTREGA
 * RESPONSABILIDAD: PROYECTAR LAS FILAS FINALES DE UN RUN COMPLETADO Y
 * ENVIARLAS POR CORREO
 *
 * Puro ensamblaje de las proyecciones de `leadgen-domain-delivery`
 * sobre los repositorios; el transporte SMTP vive enteramente en
 * `leadgen-infra-mailer`.
 */

use leadgen_domain_delivery::{project_company_row, project_contact_row, write_company_csv, write_contact_csv, DeliverySummary};
use leadgen_infra_mailer::Mailer;
use leadgen_infra_store::{CompanyRepository, ContactRepository, ResearchRepository};
use uuid::Uuid;

use crate::errors::WorkerError;

pub async fn send_completion_export(
    companies: &CompanyRepository,
    contacts: &ContactRepository,
    research: &ResearchRepository,
    mailer: &Mailer,
    run_id: Uuid,
    notification_email: &str,
) -> anyhow::Result<()> {
    let ready_companies = companies.list_ready(run_id).await.map_err(WorkerError::from)?;
    let ready_contacts = contacts.list_ready_for_run(run_id).await.map_err(WorkerError::from)?;

    let mut company_rows = Vec::with_capacity(ready_companies.len());
    for company in &ready_companies {
        let company_research = research.get_research(run_id, company.id).await.map_err(WorkerError::from)?;
        let contacts_found = contacts.count_ready_for_company(run_id, company.id).await.map_err(WorkerError::from)?;
        company_rows.push(project_company_row(company, company_research.as_ref(), contacts_found));
    }

    let company_by_id: std::collections::HashMap<Uuid, &leadgen_domain_models::CompanyCandidate> =
        ready_companies.iter().map(|c| (c.id, c)).collect();

    let mut contact_rows = Vec::with_capacity(ready_contacts.len());
    for contact in &ready_contacts {
        let Some(company) = company_by_id.get(&contact.company_id) else {
            continue;
        };
        contact_rows.push(project_contact_row(contact, &company.name, &company.domain));
    }

    let company_csv = write_company_csv(&company_rows)?;
    let contact_csv = write_contact_csv(&contact_rows)?;

    let summary = DeliverySummary {
        run_id,
        companies_delivered: company_rows.len() as u32,
        contacts_delivered: contact_rows.len() as u32,
    };

    mailer
        .send_completion_export(notification_email, &summary, company_csv, contact_csv)
        .await?;
    Ok(())
}
