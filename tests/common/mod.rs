#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use aws_lambda_events::sqs::SqsMessage;
use email_service::{
    clients::{Mailer, TemplateSource},
    error::EmailError,
    models::template::EmailTemplate,
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct InMemoryTemplates {
    templates: HashMap<(String, String), EmailTemplate>,
    unavailable: bool,
}

impl InMemoryTemplates {
    pub fn with(mut self, event_type: &str, language: &str, subject: &str, body: &str) -> Self {
        self.templates.insert(
            (event_type.to_string(), language.to_string()),
            EmailTemplate {
                subject: subject.to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    pub fn unavailable() -> Self {
        Self {
            templates: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl TemplateSource for InMemoryTemplates {
    async fn fetch(&self, event_type: &str, language: &str) -> Result<EmailTemplate, EmailError> {
        if self.unavailable {
            return Err(EmailError::Connectivity("connection refused".to_string()));
        }

        self.templates
            .get(&(event_type.to_string(), language.to_string()))
            .cloned()
            .ok_or_else(|| EmailError::NotFound {
                event_type: event_type.to_string(),
                language: language.to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
    rejected_recipients: HashSet<String>,
}

impl RecordingMailer {
    pub fn rejecting(recipient: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            rejected_recipients: HashSet::from([recipient.to_string()]),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        if self.rejected_recipients.contains(to) {
            return Err(EmailError::Transport(format!("550 mailbox unavailable: {}", to)));
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(())
    }
}

pub fn sqs_record(body: &str) -> SqsMessage {
    SqsMessage {
        message_id: Some(Uuid::new_v4().to_string()),
        body: Some(body.to_string()),
        ..Default::default()
    }
}

pub fn welcome_payload(recipient: &str) -> String {
    serde_json::json!({
        "Email": recipient,
        "EventType": "welcome",
        "Language": "en",
        "Placeholders": { "name": "Ana" }
    })
    .to_string()
}
