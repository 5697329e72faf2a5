use lambda_http::{Body, Response};
use serde_json::json;
use thiserror::Error;

use crate::models::{cors_response, MISSING_FIELDS_MESSAGE};

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{0}")]
    Ses(String),
}

impl MailerError {
    pub fn status(&self) -> u16 {
        match self {
            MailerError::MissingFields | MailerError::InvalidBody(_) => 400,
            MailerError::Ses(_) => 500,
        }
    }

    /// Turns the error into the HTTP response the caller sees.
    pub fn into_response(self) -> std::result::Result<Response<Body>, lambda_http::http::Error> {
        let status = self.status();
        let body = match &self {
            // Plain text, the contact form shows it as-is
            MailerError::MissingFields => {
                tracing::warn!("Rejecting contact request: {}", self);
                self.to_string()
            }
            MailerError::InvalidBody(err) => {
                tracing::warn!("Rejecting contact request: {}", err);
                json!({ "error": self.to_string() }).to_string()
            }
            MailerError::Ses(msg) => {
                tracing::error!("SES error: {}", msg);
                json!({ "error": msg }).to_string()
            }
        };

        tracing::info!("Returning error response: status={}", status);
        cors_response(status, body)
    }
}

pub type Result<T> = std::result::Result<T, MailerError>;
