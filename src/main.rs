use std::sync::Arc;

use aws_lambda_events::sqs::SqsEvent;
use email_service::{
    clients::{database::TemplateStore, smtp::SmtpMailer},
    config::Config,
    handler::{BatchFailurePolicy, handler},
    processor::EmailProcessor,
};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_current_span(false)
        .without_time()
        .init();

    // lettre builds its TLS config from the process-wide rustls provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = Config::load()?;

    info!(
        smtp_host = %config.smtp_host,
        smtp_port = config.smtp_port,
        report_batch_item_failures = config.report_batch_item_failures,
        "Configuration validated"
    );

    let processor = Arc::new(EmailProcessor::new(
        Arc::new(TemplateStore::new(&config)),
        Arc::new(SmtpMailer::new(&config)),
    ));
    let policy = BatchFailurePolicy::from_config(&config);

    let func = service_fn(move |event: LambdaEvent<SqsEvent>| {
        let processor = processor.clone();
        async move { handler(processor, policy, event).await }
    });

    run(func).await
}
