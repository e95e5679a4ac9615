use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info, warn};

use crate::{
    clients::TemplateSource, config::Config, error::EmailError, models::template::EmailTemplate,
};

const MIGRATION: &str = include_str!("../../migrations/0001_email_templates.sql");

// LIMIT 2 so a duplicated key can be reported without reading the whole table.
const SELECT_TEMPLATE: &str = r#"
    SELECT subject, body
    FROM email_templates
    WHERE event_type = $1 AND language = $2
    LIMIT 2
"#;

/// Template lookups against PostgreSQL over a single lazily opened connection.
///
/// The connection is opened on first use and kept for the lifetime of the
/// process. If the server drops it, the next lookup opens a new one.
pub struct TemplateStore {
    database_url: String,
    client: Mutex<Option<Client>>,
}

impl TemplateStore {
    pub fn new(config: &Config) -> Self {
        Self::with_url(&config.database_url)
    }

    pub fn with_url(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            client: Mutex::new(None),
        }
    }

    /// Creates the `email_templates` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), EmailError> {
        let mut slot = self.client.lock().await;
        let client = self.ensure_connected(&mut slot).await?;

        client.batch_execute(MIGRATION).await?;

        info!("Template store schema is up to date");

        Ok(())
    }

    async fn ensure_connected<'a>(
        &self,
        slot: &'a mut Option<Client>,
    ) -> Result<&'a Client, EmailError> {
        let client = match slot.take() {
            Some(client) if !client.is_closed() => client,
            stale => {
                if stale.is_some() {
                    warn!("Template store connection was closed, reconnecting");
                }
                self.connect().await?
            }
        };

        Ok(&*slot.insert(client))
    }

    async fn connect(&self) -> Result<Client, EmailError> {
        info!("Connecting to template store");

        let (client, connection) = tokio_postgres::connect(&self.database_url, NoTls)
            .await
            .map_err(|e| {
                EmailError::Connectivity(format!("Failed to connect to database: {}", e))
            })?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "Template store connection terminated");
            }
        });

        info!("Template store connection established");

        Ok(client)
    }
}

#[async_trait]
impl TemplateSource for TemplateStore {
    async fn fetch(&self, event_type: &str, language: &str) -> Result<EmailTemplate, EmailError> {
        let mut slot = self.client.lock().await;
        let client = self.ensure_connected(&mut slot).await?;

        let rows = client
            .query(SELECT_TEMPLATE, &[&event_type, &language])
            .await?;

        let Some(row) = rows.first() else {
            return Err(EmailError::NotFound {
                event_type: event_type.to_string(),
                language: language.to_string(),
            });
        };

        if rows.len() > 1 {
            warn!(
                event_type,
                language, "Multiple email templates share this key, using the first row"
            );
        }

        let template = EmailTemplate {
            subject: row.try_get("subject")?,
            body: row.try_get("body")?,
        };

        debug!(event_type, language, "Email template loaded");

        Ok(template)
    }
}
