use lambda_http::{Body, Error, Request, Response};

use crate::error::{MailerError, Result};
use crate::models::{cors_response, ContactEmail, ContactRequest, SentResponse};
use crate::sender::EmailSender;

fn parse_contact(body: &[u8]) -> Result<ContactEmail> {
    let request: ContactRequest = serde_json::from_slice(body)?;
    ContactEmail::try_from(request)
}

/// Validates the contact form and relays it through the sender.
/// Nothing is sent unless all four fields are present.
pub async fn send_contact(sender: &dyn EmailSender, body: &[u8]) -> Result<SentResponse> {
    let email = parse_contact(body)?;
    tracing::info!("Sending contact email from {} to {}", email.from, email.to);

    let id = sender.send_email(&email).await?;
    Ok(SentResponse::new(id))
}

// Lambda handler function - public for testing
pub async fn handler(event: Request, sender: &dyn EmailSender) -> std::result::Result<Response<Body>, Error> {
    tracing::info!(
        "Received contact request: method={:?}, path={:?}",
        event.method(),
        event.uri().path()
    );

    let response = match send_contact(sender, event.body()).await {
        Ok(sent) => {
            let body = serde_json::to_string(&sent).map_err(MailerError::from)?;
            cors_response(200, body)
        }
        Err(err) => err.into_response(),
    }
    .map_err(Box::new)?;

    tracing::info!("Returning response: status={}", response.status());
    Ok(response)
}
