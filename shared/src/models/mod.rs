use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub mod ticket;
pub mod user;

pub use ticket::{Price, TicketDetails, TicketRecord, TicketType, UnknownTicketType};
pub use user::{UserRecord, DEFAULT_USER_NAME};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const XML_CONTENT_TYPE: &str = "application/xml";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported request type: {0:?}")]
pub struct UnsupportedRequestType(pub String);

/// Wire format a request arrived in, and the format its response goes back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Json,
    Xml,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Json => JSON_CONTENT_TYPE,
            RequestType::Xml => XML_CONTENT_TYPE,
        }
    }

    /// Guesses the format from the payload itself when no content type was declared.
    pub fn sniff(payload: &str) -> Self {
        if payload.trim_start().starts_with('<') {
            RequestType::Xml
        } else {
            RequestType::Json
        }
    }
}

impl FromStr for RequestType {
    type Err = UnsupportedRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Parameters such as "; charset=utf-8" do not change the format
        let essence = s
            .trim()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" => Ok(RequestType::Json),
            "application/xml" | "text/xml" => Ok(RequestType::Xml),
            other if other.ends_with("+json") => Ok(RequestType::Json),
            other if other.ends_with("+xml") => Ok(RequestType::Xml),
            _ => Err(UnsupportedRequestType(s.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RequestType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// Helper function to get the current time as a naive UTC ISO-8601 string.
// Stored tickets carry no offset suffix, so new ones must not either.
pub fn now_naive_utc() -> String {
    Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
