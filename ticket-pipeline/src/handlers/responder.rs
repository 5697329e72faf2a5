use serde_json::{json, Map, Value};
use tracing::{debug, error};
use ticketing_shared::models::RequestType;

use crate::errors::{PipelineError, Result};
use crate::models::{PipelineOutput, OUTPUT_HEADERS_FIELD};
use crate::xml;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

// Fields that describe the transport rather than the result
const TRANSPORT_METADATA_FIELDS: &[&str] = &[OUTPUT_HEADERS_FIELD];

/// Shapes the writer's result for the caller: XML requests get a SOAP
/// envelope, JSON requests get the result unchanged.
pub fn respond(result: Value, request_type: RequestType) -> Result<PipelineOutput> {
    match request_type {
        RequestType::Json => Ok(PipelineOutput::Json(result)),
        RequestType::Xml => to_soap(result).map(PipelineOutput::Xml),
    }
}

/// Like [`respond`], reading the request type from the result's own
/// `requestType` field. A missing or null field means JSON.
pub fn respond_in_kind(result: Value) -> Result<PipelineOutput> {
    let request_type = match result.get("requestType") {
        None | Some(Value::Null) => RequestType::Json,
        Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
            error!("Error reading requestType from result: {}", e);
            PipelineError::Parse(e.to_string())
        })?,
    };
    respond(result, request_type)
}

/// Wraps the result fields in a SOAP envelope and serializes it.
pub fn to_soap(result: Value) -> Result<String> {
    let fields: Map<String, Value> = match result {
        Value::Object(fields) => fields
            .into_iter()
            .filter(|(key, _)| !TRANSPORT_METADATA_FIELDS.contains(&key.as_str()))
            .collect(),
        other => {
            error!("Error converting JSON to XML: expected an object, got {}", other);
            return Err(PipelineError::Serialization(
                "expected a JSON object".to_string(),
            ));
        }
    };

    let envelope = json!({
        "soapenv:Envelope": {
            "@xmlns:soapenv": SOAP_ENVELOPE_NS,
            "soapenv:Body": {
                "response": Value::Object(fields),
            },
        },
    });

    let document = xml::value_to_xml(&envelope).map_err(|e| {
        error!("Error converting JSON to XML: {}", e);
        PipelineError::Serialization(e.to_string())
    })?;
    debug!("SOAP response: {}", document);
    Ok(document)
}
