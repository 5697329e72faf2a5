use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown ticket type provided: {0:?}")]
pub struct UnknownTicketType(pub String);

/// Ticket categories. Each one is persisted in its own collection.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Incident,
    Service,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Incident => "incident",
            TicketType::Service => "service",
        }
    }
}

impl FromStr for TicketType {
    type Err = UnknownTicketType;

    // Exact match only: "Incident" is not a known type
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incident" => Ok(TicketType::Incident),
            "service" => Ok(TicketType::Service),
            other => Err(UnknownTicketType(other.to_string())),
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket price as supplied by the caller. JSON callers send numbers, XML
/// callers send text such as "10"; both are stored as received.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Amount(serde_json::Number),
    Text(String),
}

/// Ticket fields as they arrive from the caller, before validation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetails {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

/// Persisted ticket. `created_at` is set once, when the ticket is written.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub ticket_id: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub price: Option<Price>,
    pub created_at: String,
}

// Ticket ids are opaque strings, but JSON callers sometimes send them as numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
