use async_trait::async_trait;

use crate::{error::EmailError, models::template::EmailTemplate};

pub mod database;
pub mod smtp;
pub mod template;

/// Looks up the subject/body pair for an (event type, language) key.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, event_type: &str, language: &str) -> Result<EmailTemplate, EmailError>;
}

/// Delivers one rendered email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}
