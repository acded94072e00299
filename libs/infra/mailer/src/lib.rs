// [libs/infra/mailer/src/lib.rs]
/*!
 * =================================================================
 * CRATE: leadgen-infra-mailer
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ENTREGA POR CORREO DEL EXPORT FINAL DE UN RUN
 *
 * Compone un mensaje MIME multipart con los dos CSV adjuntos (empresas
 * y contactos) y lo envía por SMTP. La entrega es "best-effort": quien
 * llama decide qué hacer con un `MailerError` — normalmente anotarlo en
 * `runs.notes` y seguir adelante, nunca fallar un run ya completado por
 * esto (§4.6).
 * =================================================================
 */

mod errors;

pub use errors::MailerError;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use leadgen_domain_delivery::DeliverySummary;

/// Credenciales SMTP cargadas por el binario desde el entorno
/// (`SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`).
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let creds = Credentials::new(config.username, config.password);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address,
        })
    }

    /// Envía el export de un run completado a un destinatario, adjuntando
    /// los dos CSV ya renderizados como texto por `leadgen-domain-delivery`.
    pub async fn send_completion_export(
        &self,
        to_address: &str,
        summary: &DeliverySummary,
        company_csv: String,
        contact_csv: String,
    ) -> Result<(), MailerError> {
        let subject = leadgen_domain_delivery::completion_subject(summary);
        let body = leadgen_domain_delivery::completion_body(summary);

        let company_attachment = Attachment::new("companies.csv".to_string())
            .body(company_csv, ContentType::parse("text/csv").expect("static content type"));
        let contact_attachment = Attachment::new("contacts.csv".to_string())
            .body(contact_csv, ContentType::parse("text/csv").expect("static content type"));

        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to_address.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body))
                    .singlepart(company_attachment)
                    .singlepart(contact_attachment),
            )?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFault(e.to_string()))?;
        Ok(())
    }

    /// Envía la notificación de decisión pendiente del usuario, sin
    /// adjuntos: el gap sigue abierto, no hay export que entregar aún.
    pub async fn send_needs_decision_notice(
        &self,
        to_address: &str,
        run_id: uuid::Uuid,
        companies_gap: u32,
        contacts_min_gap_total: u32,
    ) -> Result<(), MailerError> {
        let subject = leadgen_domain_delivery::needs_decision_subject(run_id);
        let body = leadgen_domain_delivery::needs_decision_body(companies_gap, contacts_min_gap_total);

        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFault(e.to_string()))?;
        Ok(())
    }

    /// Envía el aviso opcional del Heartbeat Monitor (§4.3 paso 3) tras
    /// liberar los leases de un worker cuyo latido venció.
    pub async fn send_dead_worker_alert(
        &self,
        to_address: &str,
        worker_id: uuid::Uuid,
        worker_role: &str,
        last_heartbeat_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), MailerError> {
        let subject = leadgen_domain_delivery::dead_worker_alert_subject(worker_id);
        let body = leadgen_domain_delivery::dead_worker_alert_body(worker_id, worker_role, last_heartbeat_at);

        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFault(e.to_string()))?;
        Ok(())
    }
}
