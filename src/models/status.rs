use std::fmt::{Display, Formatter, Result};

use crate::error::EmailError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DeliveryStatus::Sent => write!(f, "sent"),
            DeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One entry of a batch that did not end in a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEntry {
    pub message_id: String,
    pub error_kind: &'static str,
}

/// What happened to a whole batch, in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub sent: usize,
    pub failures: Vec<FailedEntry>,
}

impl BatchOutcome {
    pub fn record(
        &mut self,
        message_id: &str,
        result: &std::result::Result<(), EmailError>,
    ) -> DeliveryStatus {
        self.attempted += 1;

        match result {
            Ok(()) => {
                self.sent += 1;
                DeliveryStatus::Sent
            }
            Err(e) => {
                self.failures.push(FailedEntry {
                    message_id: message_id.to_string(),
                    error_kind: e.kind(),
                });
                DeliveryStatus::Failed
            }
        }
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.message_id.as_str())
    }
}
