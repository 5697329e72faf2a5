use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// Helper function to map GetItem errors
pub fn map_get_dynamo_error(err: SdkError<GetItemError>, table: &str) -> StoreError {
    match &err {
        SdkError::ServiceError(service_err) => {
            if service_err.err().is_resource_not_found_exception() {
                StoreError::NotFound(format!("Table not found: {}", table))
            } else {
                StoreError::Unavailable(format!("DynamoDB get_item error: {}", err))
            }
        }
        _ => StoreError::Unavailable(format!("DynamoDB get_item error: {}", err)),
    }
}

// Helper function to map PutItem errors
pub fn map_put_dynamo_error(err: SdkError<PutItemError>, table: &str) -> StoreError {
    match &err {
        SdkError::ServiceError(service_err) if service_err.err().is_resource_not_found_exception() => {
            StoreError::NotFound(format!("Table not found: {}", table))
        }
        _ => StoreError::Unavailable(format!("DynamoDB put_item error: {}", err)),
    }
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::Serialization(format!("DynamoDB serialization error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(format!("JSON serialization error: {}", err))
    }
}
