//! Contact mail transport
//!
//! Sends contact-form submissions to the portfolio owner over SMTP. One
//! send per request, no retry, no queueing.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::Args;
use crate::error::ApiError;

/// Outgoing contact mail. Handlers depend on this trait rather than the
/// SMTP transport directly so they can run against an in-memory double.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// Send one contact message to the portfolio owner
    async fn send_contact(&self, subject: &str, body: String) -> Result<(), ApiError>;
}

/// SMTP mail transport for contact-form messages
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    /// Build a mailer from configuration. Fails if SMTP credentials are
    /// missing or the sender/recipient addresses do not parse.
    pub fn new(args: &Args) -> Result<Self, ApiError> {
        let user = args
            .email_user
            .as_deref()
            .ok_or_else(|| ApiError::Config("EMAIL_USER is not configured".into()))?;
        let pass = args
            .email_pass
            .as_deref()
            .ok_or_else(|| ApiError::Config("EMAIL_PASS is not configured".into()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&args.smtp_host)
            .map_err(|e| ApiError::Mail(format!("SMTP relay setup failed: {}", e)))?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();

        let from: Mailbox = format!("Portfolio Contact <{}>", user)
            .parse()
            .map_err(|e| ApiError::Config(format!("Invalid sender address: {}", e)))?;

        let recipient = args.contact_recipient().unwrap_or(user);
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| ApiError::Config(format!("Invalid recipient address: {}", e)))?;

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl ContactTransport for Mailer {
    /// Send one plain-text contact message to the configured recipient
    async fn send_contact(&self, subject: &str, body: String) -> Result<(), ApiError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format!("New Contact: {}", subject))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| ApiError::Mail(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ApiError::Mail(format!("SMTP send failed: {}", e)))?;

        info!("Contact mail forwarded to {}", self.to);
        Ok(())
    }
}

/// Compose the plain-text body for a contact submission.
///
/// Optional fields fall back to placeholder text so the owner always sees
/// every field in the message.
pub fn compose_contact_body(
    name: &str,
    email: &str,
    phone: Option<&str>,
    subject: Option<&str>,
    message: &str,
) -> String {
    format!(
        "New Portfolio Contact Message\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Subject: {}\n\n\
         Message:\n{}\n",
        name,
        email,
        phone.filter(|p| !p.is_empty()).unwrap_or("Not provided"),
        subject.filter(|s| !s.is_empty()).unwrap_or("No subject"),
        message,
    )
}
