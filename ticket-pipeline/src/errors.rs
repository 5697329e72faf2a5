use thiserror::Error;
use ticketing_shared::error::StoreError;
use ticketing_shared::models::{UnknownTicketType, UnsupportedRequestType};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid ticket details provided: {0}")]
    InvalidTicket(String),

    #[error("Unknown ticket type provided: {0:?}")]
    UnknownTicketType(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

// Every store failure is fatal for the invocation
impl From<StoreError> for PipelineError {
    fn from(err: StoreError) -> Self {
        PipelineError::StoreUnavailable(err.to_string())
    }
}

impl From<UnknownTicketType> for PipelineError {
    fn from(err: UnknownTicketType) -> Self {
        PipelineError::UnknownTicketType(err.0)
    }
}

impl From<UnsupportedRequestType> for PipelineError {
    fn from(err: UnsupportedRequestType) -> Self {
        PipelineError::Parse(err.to_string())
    }
}
