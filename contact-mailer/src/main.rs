use std::env;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, Error};
use tracing::info;

mod error;
mod handler;
mod models;
mod sender;

#[cfg(test)]
mod tests;

use sender::{EmailSender, SesEmailSender};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_ansi(false)
        .without_time()
        .init();

    info!("Contact mailer starting");

    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let sender: Arc<dyn EmailSender> = Arc::new(SesEmailSender::new(aws_sdk_ses::Client::new(&config)));

    run(service_fn(|event| {
        let sender = sender.clone();
        async move { handler::handler(event, sender.as_ref()).await }
    }))
    .await
}
