use serde_json::Value;
use tracing::{debug, error};
use ticketing_shared::models::{RequestType, TicketDetails};

use crate::errors::{PipelineError, Result};
use crate::models::{JsonPayload, TicketRequest};
use crate::xml::{self, child_by_local_name};

const INPUT_FIELD: &str = "input";
const REQUEST_TYPE_FIELD: &str = "requestType";

/// Turns an inbound event into the canonical ticket request.
///
/// Accepts either a raw `{requestType, input}` envelope, where `input` holds
/// JSON or XML text (or an already-decoded JSON object), or a record that an
/// earlier normalization already flattened. Flattened records come back
/// unchanged.
pub fn normalize(event: &Value) -> Result<TicketRequest> {
    match event.get(INPUT_FIELD) {
        Some(input) => normalize_raw(event.get(REQUEST_TYPE_FIELD), input),
        None => serde_json::from_value(event.clone()).map_err(|e| {
            error!("Error reading normalized ticket request: {}", e);
            PipelineError::Parse(e.to_string())
        }),
    }
}

fn declared_request_type(declared: Option<&Value>) -> Result<Option<RequestType>> {
    match declared {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => raw.trim().parse::<RequestType>().map(Some).map_err(|e| {
            error!("Rejecting request: {}", e);
            PipelineError::from(e)
        }),
        Some(other) => {
            error!("requestType must be a string, got {}", other);
            Err(PipelineError::Parse(format!(
                "requestType must be a string, got {}",
                other
            )))
        }
    }
}

fn normalize_raw(declared: Option<&Value>, input: &Value) -> Result<TicketRequest> {
    let declared = declared_request_type(declared)?;

    match input {
        Value::String(payload) => {
            let request_type = declared.unwrap_or_else(|| RequestType::sniff(payload));
            debug!("Normalizing {} payload", request_type);
            match request_type {
                RequestType::Xml => from_xml(payload),
                RequestType::Json => {
                    let decoded = serde_json::from_str(payload).map_err(|e| {
                        error!("Error parsing JSON input: {}", e);
                        PipelineError::Parse(e.to_string())
                    })?;
                    from_json(decoded)
                }
            }
        }
        Value::Object(_) if declared != Some(RequestType::Xml) => from_json(input.clone()),
        other => {
            error!("Unsupported input payload: {}", other);
            Err(PipelineError::Parse(
                "input must be XML text, JSON text or a JSON object".to_string(),
            ))
        }
    }
}

fn from_json(decoded: Value) -> Result<TicketRequest> {
    let payload: JsonPayload = serde_json::from_value(decoded).map_err(|e| {
        error!("Error reading JSON ticket request: {}", e);
        PipelineError::Parse(e.to_string())
    })?;

    Ok(TicketRequest {
        user_id: payload.user_id,
        ticket_details: payload.ticket_details,
        request_type: RequestType::Json,
    })
}

// <request> may be the document root or sit inside a SOAP Envelope/Body
fn find_request_element(document: &Value) -> Option<&Value> {
    if let Some(request) = child_by_local_name(document, "request") {
        return Some(request);
    }
    let body = child_by_local_name(document, "Envelope")
        .and_then(|envelope| child_by_local_name(envelope, "Body"))?;
    child_by_local_name(body, "request")
}

fn from_xml(payload: &str) -> Result<TicketRequest> {
    let document = xml::xml_to_value(payload).map_err(|e| {
        error!("Error converting XML to JSON: {}", e);
        PipelineError::Parse(e.to_string())
    })?;
    debug!("Parsed XML: {}", document);

    let request = find_request_element(&document).ok_or_else(|| {
        error!("XML payload has no <request> element");
        PipelineError::Parse("missing <request> element".to_string())
    })?;

    let user_id = match child_by_local_name(request, "userId") {
        Some(Value::String(user_id)) => user_id.clone(),
        _ => {
            error!("XML request has no usable <userId>");
            return Err(PipelineError::Parse("missing <userId> element".to_string()));
        }
    };

    let ticket_details = match child_by_local_name(request, "ticketDetails") {
        None | Some(Value::Null) => None,
        Some(details) => Some(
            serde_json::from_value::<TicketDetails>(details.clone()).map_err(|e| {
                error!("Error reading <ticketDetails>: {}", e);
                PipelineError::Parse(e.to_string())
            })?,
        ),
    };

    Ok(TicketRequest {
        user_id,
        ticket_details,
        request_type: RequestType::Xml,
    })
}
