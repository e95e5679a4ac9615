use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use crate::{clients::Mailer, config::Config, error::EmailError};

const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// TLS from the first byte (port 465).
    Implicit,
    /// Plain connection upgraded with STARTTLS (587 and anything else).
    StartTls,
}

/// Sends mail through a single SMTP relay.
///
/// Every call builds its own transport, so each message gets a fresh
/// session that is closed once the send finishes or fails.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Self {
        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP mailer initialized"
        );

        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            credentials: Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ),
            from: config.sender_address().to_string(),
        }
    }

    pub fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message, EmailError> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|e| EmailError::Transport(format!("Invalid sender address: {}", e)))?;

        let to: Mailbox = to
            .parse()
            .map_err(|e| EmailError::Transport(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| EmailError::Transport(format!("Failed to build message: {}", e)))
    }

    pub fn tls_mode(&self) -> TlsMode {
        if self.port == IMPLICIT_TLS_PORT {
            TlsMode::Implicit
        } else {
            TlsMode::StartTls
        }
    }

    pub fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let builder = match self.tls_mode() {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?,
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?,
        };

        Ok(builder
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = self.build_message(to, subject, body)?;
        let transport = self.transport()?;

        debug!(to, host = %self.host, "Sending email through relay");

        transport.send(message).await?;

        Ok(())
    }
}
