use lambda_http::{Body, Response};
use serde::{Deserialize, Serialize};

use crate::error::{MailerError, Result};

pub const MISSING_FIELDS_MESSAGE: &str = "Bad Request: Missing required fields.";
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// Contact form body. Every field is optional here so that a missing field
/// is reported as such rather than as a malformed body.
#[derive(Deserialize, Debug, Default)]
pub struct ContactRequest {
    pub to: Option<String>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A contact request with every field present and non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub message: String,
}

fn required(field: Option<String>) -> Result<String> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(MailerError::MissingFields)
}

impl TryFrom<ContactRequest> for ContactEmail {
    type Error = MailerError;

    fn try_from(request: ContactRequest) -> Result<Self> {
        Ok(Self {
            to: required(request.to)?,
            from: required(request.from)?,
            subject: required(request.subject)?,
            message: required(request.message)?,
        })
    }
}

#[derive(Serialize, Debug)]
pub struct SentResponse {
    pub message: &'static str,
    pub id: String,
}

impl SentResponse {
    pub fn new(id: String) -> Self {
        Self {
            message: SENT_MESSAGE,
            id,
        }
    }
}

/// Builds a response carrying the JSON content type and permissive CORS headers.
pub fn cors_response(
    status: u16,
    body: String,
) -> std::result::Result<Response<Body>, lambda_http::http::Error> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "*")
        .header("Access-Control-Allow-Headers", "*")
        .body(Body::from(body))
}
