use async_trait::async_trait;
use aws_sdk_ses::error::ProvideErrorMetadata;
use aws_sdk_ses::types::{Body, Content, Destination, Message};

#[cfg(test)]
use mockall::automock;

use crate::error::{MailerError, Result};
use crate::models::ContactEmail;

const CHARSET: &str = "UTF-8";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends a plain-text email and returns the provider's message id.
    async fn send_email(&self, email: &ContactEmail) -> Result<String>;
}

pub struct SesEmailSender {
    client: aws_sdk_ses::Client,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }
}

fn utf8_content(data: &str) -> Result<Content> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| MailerError::Ses(format!("Failed to build message content: {}", e)))
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_email(&self, email: &ContactEmail) -> Result<String> {
        let message = Message::builder()
            .subject(utf8_content(&email.subject)?)
            .body(Body::builder().text(utf8_content(&email.message)?).build())
            .build();

        let response = self
            .client
            .send_email()
            .destination(Destination::builder().to_addresses(&email.to).build())
            .message(message)
            .source(&email.from)
            .send()
            .await
            .map_err(|e| {
                let message = e
                    .as_service_error()
                    .and_then(|service| service.message())
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string());
                MailerError::Ses(message)
            })?;

        let message_id = response.message_id().to_string();
        tracing::info!("Sent email via SES: {} (to: {})", message_id, email.to);
        Ok(message_id)
    }
}
