// [apps/control-api/src/delivery.rs]
/*!
 * APARATO: ENSAMBLADOR DE ENTREGA DE CONTROL-API
 * RESPONSABILIDAD: PROYECTAR LAS FILAS FINALES DE UN RUN Y ENVIARLAS
 * POR CORREO CUANDO EL ENDPOINT DE DECISIÓN RESUELVE "accept partial"
 *
 * Espejo de `apps/contact-worker/src/delivery.rs`: el Contact Worker
 * dispara esta misma proyección cuando la brecha cierra sola; este
 * binario la dispara cuando un operador decide cerrar el run a mano
 * con la brecha aún abierta. Ambos caminos convergen en las mismas
 * funciones puras de `leadgen-domain-delivery`.
 */

use std::collections::HashMap;

use leadgen_domain_delivery::{project_company_row, project_contact_row, write_company_csv, write_contact_csv, DeliverySummary};
use leadgen_infra_mailer::Mailer;
use leadgen_infra_store::{CompanyRepository, ContactRepository, ResearchRepository};
use uuid::Uuid;

use crate::errors::ApiError;

pub async fn send_completion_export(
    companies: &CompanyRepository,
    contacts: &ContactRepository,
    research: &ResearchRepository,
    mailer: &Mailer,
    run_id: Uuid,
    notification_email: &str,
) -> Result<(), ApiError> {
    let ready_companies = companies.list_ready(run_id).await?;
    let ready_contacts = contacts.list_ready_for_run(run_id).await?;

    let mut company_rows = Vec::with_capacity(ready_companies.len());
    for company in &ready_companies {
        let company_research = research.get_research(run_id, company.id).await?;
        let contacts_found = contacts.count_ready_for_company(run_id, company.id).await?;
        company_rows.push(project_company_row(company, company_research.as_ref(), contacts_found));
    }

    let company_by_id: HashMap<Uuid, &leadgen_domain_models::CompanyCandidate> = ready_companies.iter().map(|c| (c.id, c)).collect();

    let mut contact_rows = Vec::with_capacity(ready_contacts.len());
    for contact in &ready_contacts {
        let Some(company) = company_by_id.get(&contact.company_id) else {
            continue;
        };
        contact_rows.push(project_contact_row(contact, &company.name, &company.domain));
    }

    let company_csv = write_company_csv(&company_rows).map_err(|e| ApiError::Store(e.to_string()))?;
    let contact_csv = write_contact_csv(&contact_rows).map_err(|e| ApiError::Store(e.to_string()))?;

    let summary = DeliverySummary {
        run_id,
        companies_delivered: company_rows.len() as u32,
        contacts_delivered: contact_rows.len() as u32,
    };

    mailer.send_completion_export(notification_email, &summary, company_csv, contact_csv).await?;
    Ok(())
}
