//! SMTP email notifier.

use super::report::render_body;
use super::{Delivery, Notifier};
use crate::config::EmailConfig;
use crate::diff::ChangeSet;
use crate::error::NotifyError;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};

/// Sends one plain-text message per change event over SMTP with STARTTLS.
///
/// The sender address doubles as the SMTP username. All recipients go into a
/// single `To` header.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Build the message without sending it.
    pub fn build_message(&self, changes: &ChangeSet) -> Result<Message, NotifyError> {
        if self.config.recipients.is_empty() {
            return Err(NotifyError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(parse_mailbox(&self.config.sender)?)
            .subject(self.config.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.config.recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        builder
            .body(render_body(changes))
            .map_err(|e| NotifyError::Message(e.to_string()))
    }

    fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let credentials = Credentials::new(self.config.sender.clone(), self.config.password.clone());
        let transport = SmtpTransport::starttls_relay(&self.config.smtp_server)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }
}

impl Notifier for EmailNotifier {
    fn notify(&mut self, changes: &ChangeSet) -> Result<Delivery, NotifyError> {
        if changes.is_empty() {
            return Ok(Delivery::Skipped);
        }

        let message = self.build_message(changes)?;
        self.transport()?
            .send(&message)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let recipients = self.config.recipients.len();
        tracing::info!("Email sent to {recipients} recipients");
        Ok(Delivery::Sent { recipients })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}
