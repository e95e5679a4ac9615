use std::sync::Arc;

use aws_lambda_events::sqs::SqsMessage;
use tracing::{debug, error, info, warn};

use crate::{
    clients::{Mailer, TemplateSource, template::replace_placeholders},
    error::EmailError,
    models::{message::EmailRequest, status::BatchOutcome},
};

const UNKNOWN_MESSAGE_ID: &str = "<unknown>";

pub struct EmailProcessor {
    templates: Arc<dyn TemplateSource>,
    mailer: Arc<dyn Mailer>,
}

impl EmailProcessor {
    pub fn new(templates: Arc<dyn TemplateSource>, mailer: Arc<dyn Mailer>) -> Self {
        Self { templates, mailer }
    }

    /// Runs every record through [`Self::process_message`] in delivery order.
    ///
    /// A failed record is logged and counted, then the next one is processed.
    pub async fn process_batch(&self, records: &[SqsMessage]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for record in records {
            let message_id = record.message_id.as_deref().unwrap_or(UNKNOWN_MESSAGE_ID);

            let result = self
                .process_message(message_id, record.body.as_deref())
                .await;

            if let Err(e) = &result {
                log_failure(message_id, e);
            }

            let status = outcome.record(message_id, &result);
            debug!(message_id, status = %status, "Queue entry handled");
        }

        outcome
    }

    /// Decodes one queue entry, renders its template and sends the email.
    #[tracing::instrument(skip(self, payload))]
    pub async fn process_message(
        &self,
        message_id: &str,
        payload: Option<&str>,
    ) -> Result<(), EmailError> {
        let payload =
            payload.ok_or_else(|| EmailError::Decode("message has no body".to_string()))?;
        let request = serde_json::from_str::<EmailRequest>(payload)?;

        debug!(
            event_type = %request.event_type,
            language = %request.language,
            "Decoded email request"
        );

        let template = self
            .templates
            .fetch(&request.event_type, &request.language)
            .await?;

        let body = replace_placeholders(&template.body, &request.placeholders);

        self.mailer
            .send(&request.recipient, &template.subject, &body)
            .await?;

        info!(
            event_type = %request.event_type,
            language = %request.language,
            "Email sent"
        );

        Ok(())
    }
}

fn log_failure(message_id: &str, error: &EmailError) {
    match error {
        EmailError::Decode(reason) => {
            warn!(message_id, reason = %reason, "Dropping malformed email request");
        }
        EmailError::NotFound {
            event_type,
            language,
        } => {
            warn!(
                message_id,
                event_type = %event_type,
                language = %language,
                "No email template for request"
            );
        }
        EmailError::Transport(reason) => {
            error!(message_id, reason = %reason, "Mail relay rejected email");
        }
        EmailError::Connectivity(reason) => {
            error!(message_id, reason = %reason, "Template store unavailable");
        }
    }
}
