use std::sync::Arc;

use aws_lambda_events::sqs::{BatchItemFailure, SqsBatchResponse, SqsEvent};
use lambda_runtime::{Error, LambdaEvent};
use tracing::info;

use crate::{config::Config, models::status::BatchOutcome, processor::EmailProcessor};

/// What the queue platform is told about entries that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFailurePolicy {
    /// Every entry is reported as handled; failures only reach the logs.
    FireAndForget,
    /// Failed entries are listed in `batchItemFailures` so SQS redelivers them.
    ReportItemFailures,
}

impl BatchFailurePolicy {
    pub fn from_config(config: &Config) -> Self {
        if config.report_batch_item_failures {
            BatchFailurePolicy::ReportItemFailures
        } else {
            BatchFailurePolicy::FireAndForget
        }
    }
}

/// Handles one SQS invocation. Always returns `Ok` once every record has been attempted.
#[tracing::instrument(skip(processor, event), fields(request_id = %event.context.request_id))]
pub async fn handler(
    processor: Arc<EmailProcessor>,
    policy: BatchFailurePolicy,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error> {
    let records = event.payload.records;

    info!(record_count = records.len(), "Processing SQS batch");

    let outcome = processor.process_batch(&records).await;

    info!(
        attempted = outcome.attempted,
        sent = outcome.sent,
        failed = outcome.failures.len(),
        "SQS batch complete"
    );

    Ok(batch_response(&outcome, policy))
}

pub fn batch_response(outcome: &BatchOutcome, policy: BatchFailurePolicy) -> SqsBatchResponse {
    let batch_item_failures = match policy {
        BatchFailurePolicy::FireAndForget => Vec::new(),
        BatchFailurePolicy::ReportItemFailures => outcome
            .failed_ids()
            .map(|id| BatchItemFailure {
                item_identifier: id.to_string(),
            })
            .collect(),
    };

    SqsBatchResponse {
        batch_item_failures,
    }
}
