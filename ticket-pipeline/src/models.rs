use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ticketing_shared::models::{RequestType, TicketDetails, TicketType, UserRecord};

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_FAILED: &str = "Failed";

/// Response fields meant for the HTTP layer. They never end up in XML.
pub const OUTPUT_HEADERS_FIELD: &str = "outputHeaders";

fn default_request_type() -> RequestType {
    RequestType::Json
}

/// Canonical, format-agnostic ticket request produced by normalization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_details: Option<TicketDetails>,
    #[serde(default = "default_request_type")]
    pub request_type: RequestType,
}

/// Body of a JSON request before the content type is attached
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonPayload {
    pub user_id: String,
    #[serde(default)]
    pub ticket_details: Option<TicketDetails>,
}

/// Result of the user lookup stage. On a miss only `userFound` and
/// `requestType` are present.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserLookupResult {
    pub user_found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_details: Option<TicketDetails>,
    #[serde(default = "default_request_type")]
    pub request_type: RequestType,
}

impl UserLookupResult {
    pub fn found(request: &TicketRequest, user: &UserRecord) -> Self {
        Self {
            user_found: true,
            user_id: Some(request.user_id.clone()),
            user_name: Some(user.display_name().to_string()),
            ticket_details: request.ticket_details.clone(),
            request_type: request.request_type,
        }
    }

    pub fn not_found(request_type: RequestType) -> Self {
        Self {
            user_found: false,
            user_id: None,
            user_name: None,
            ticket_details: None,
            request_type,
        }
    }
}

/// Input of the ticket writer. Deserializes straight from a lookup result.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketSubmission {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub ticket_details: Option<TicketDetails>,
    #[serde(default)]
    pub request_type: Option<RequestType>,
}

impl TicketSubmission {
    /// Submission for a user the store does not know. There is no name to record.
    pub fn unregistered(request: &TicketRequest) -> Self {
        Self {
            user_id: Some(request.user_id.clone()),
            user_name: None,
            ticket_details: request.ticket_details.clone(),
            request_type: Some(request.request_type),
        }
    }
}

impl From<UserLookupResult> for TicketSubmission {
    fn from(lookup: UserLookupResult) -> Self {
        Self {
            user_id: lookup.user_id,
            user_name: lookup.user_name,
            ticket_details: lookup.ticket_details,
            request_type: Some(lookup.request_type),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    pub request_type: Option<RequestType>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub output_headers: BTreeMap<String, String>,
}

impl TicketResponse {
    fn json_headers() -> BTreeMap<String, String> {
        BTreeMap::from([(
            "Content-Type".to_string(),
            ticketing_shared::models::JSON_CONTENT_TYPE.to_string(),
        )])
    }

    pub fn success(
        ticket_id: String,
        ticket_type: TicketType,
        request_type: Option<RequestType>,
    ) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: format!("Ticket processed in {} table", ticket_type),
            ticket_id: Some(ticket_id),
            request_type,
            output_headers: Self::json_headers(),
        }
    }

    pub fn user_not_found(request: &TicketRequest) -> Self {
        Self {
            status: STATUS_FAILED.to_string(),
            message: format!("User {} not found", request.user_id),
            ticket_id: request
                .ticket_details
                .as_ref()
                .and_then(|details| details.ticket_id.clone()),
            request_type: Some(request.request_type),
            output_headers: Self::json_headers(),
        }
    }
}

/// Final pipeline result, shaped like the request it answers
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutput {
    Json(Value),
    Xml(String),
}

impl PipelineOutput {
    pub fn into_value(self) -> Value {
        match self {
            PipelineOutput::Json(value) => value,
            PipelineOutput::Xml(document) => Value::String(document),
        }
    }
}
