//! Outbound email. Only team invitations are sent today.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};

use crate::config::SmtpSettings;

pub const INVITE_SUBJECT: &str = "You're invited to join the CRM team!";

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl OutgoingEmail {
    pub fn invitation(to: &str, invite_url: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: INVITE_SUBJECT.to_string(),
            html: format!(
                "<p>You have been invited to join the CRM team. \
                 <a href=\"{invite_url}\">Click here to register</a>.</p>"
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message; the error is the transport's own message.
    async fn send(&self, email: OutgoingEmail) -> Result<(), String>;
}

/// SMTP delivery. Uses STARTTLS with credentials when both user and password
/// are configured, otherwise a plain unauthenticated connection.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        if settings.user.is_none() || settings.pass.is_none() {
            log::warn!("SMTP credentials not set, sending unauthenticated via {}", settings.host);
        }
        Self { settings }
    }

    fn transport(&self) -> Result<SmtpTransport, String> {
        let s = &self.settings;
        Ok(match (&s.user, &s.pass) {
            (Some(user), Some(pass)) => SmtpTransport::starttls_relay(&s.host)
                .map_err(|e| format!("SMTP relay error: {e}"))?
                .port(s.port)
                .credentials(Credentials::new(user.clone(), pass.clone()))
                .build(),
            _ => SmtpTransport::builder_dangerous(&s.host).port(s.port).build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), String> {
        let message = Message::builder()
            .from(self.settings.from.parse().map_err(|e| format!("Invalid from address: {e}"))?)
            .to(email.to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)
            .map_err(|e| format!("Failed to build email: {e}"))?;
        let transport = self.transport()?;

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())?;
        log::info!("Invitation email sent to {}", email.to);
        Ok(())
    }
}
