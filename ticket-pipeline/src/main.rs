use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::env;
use std::sync::Arc;
use ticketing_shared::store::dynamo::{create_client, DynamoTicketStore, DynamoUserStore};
use tracing::info;

mod config;
mod errors;
mod handlers;
mod models;
mod pipeline;
mod xml;

#[cfg(test)]
mod tests;

use config::PipelineConfig;
use pipeline::PipelineContext;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        // CloudWatch adds the ingestion time
        .without_time()
        .init();

    let config = PipelineConfig::from_env()?;
    info!("Starting ticket pipeline Lambda, stage={:?}", config.stage);

    // One client for every table, built once per process
    let client = create_client(config.dynamodb_endpoint.as_deref()).await;
    let users = Arc::new(DynamoUserStore::with_client_and_table(
        client.clone(),
        config.users_table.clone(),
    ));
    let tickets = Arc::new(DynamoTicketStore::with_client_and_tables(
        client,
        config.incident_table.clone(),
        config.service_table.clone(),
    ));
    let context = Arc::new(PipelineContext::new(users, tickets, &config));

    lambda_runtime::run(service_fn(|event| handler(event, context.clone()))).await?;
    Ok(())
}

// Lambda handler function - public for testing
pub async fn handler(event: LambdaEvent<Value>, context: Arc<PipelineContext>) -> Result<Value, Error> {
    info!(
        "Processing ticket event: request_id={}, stage={:?}",
        event.context.request_id, context.stage
    );

    let output = pipeline::run_stage(&context, event.payload).await?;
    Ok(output)
}
