//! # DynamoDB test utilities
//!
//! Helpers for running store tests against DynamoDB local. Tests that use
//! them should bail out early unless [`use_dynamodb`] returns true, so the
//! default test run only touches the in-memory mocks.
//!
//! ## Example
//! ```rust,ignore
//! use ticketing_shared::test_utils::dynamo_test_utils;
//!
//! #[tokio::test]
//! async fn my_dynamo_test() {
//!     if !dynamo_test_utils::use_dynamodb() {
//!         return;
//!     }
//!     let client = dynamo_test_utils::create_dynamo_client().await;
//!     dynamo_test_utils::create_users_table(&client, "users-test").await.unwrap();
//!     // ...
//! }
//! ```

use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use std::error::Error;
use std::time::Duration;
// Use log macros, but ensure test_logging::init_test_logging() is called in test files
use log::{debug, error, info};

use crate::store::dynamo::{create_client, TICKET_KEY, USER_KEY};

// Constants for DynamoDB tests
pub const DYNAMO_LOCAL_URI: &str = "http://localhost:8000";

// Helper to check if DynamoDB integration tests should be used
pub fn use_dynamodb() -> bool {
    std::env::var("USE_DYNAMODB").unwrap_or_default() == "true"
}

// Helper to set up a DynamoDB client for local testing
pub async fn create_dynamo_client() -> Client {
    create_client(Some(DYNAMO_LOCAL_URI)).await
}

/// Creates (or recreates) a table with a single string hash key and waits
/// until it is ACTIVE.
pub async fn create_keyed_table(
    client: &Client,
    table_name: &str,
    key_attr: &str,
) -> Result<(), Box<dyn Error>> {
    let tables = client.list_tables().send().await?;
    if tables.table_names().contains(&table_name.to_string()) {
        info!("Table '{}' already exists, deleting it first...", table_name);
        client.delete_table().table_name(table_name).send().await?;

        loop {
            let tables = client.list_tables().send().await?;
            if !tables.table_names().contains(&table_name.to_string()) {
                break;
            }
            debug!("Table '{}' still exists, waiting...", table_name);
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    let key = KeySchemaElement::builder()
        .attribute_name(key_attr)
        .key_type(KeyType::Hash)
        .build()?;

    let key_definition = AttributeDefinition::builder()
        .attribute_name(key_attr)
        .attribute_type(ScalarAttributeType::S)
        .build()?;

    info!("Creating table '{}' keyed on '{}'...", table_name, key_attr);
    client
        .create_table()
        .table_name(table_name)
        .key_schema(key)
        .attribute_definitions(key_definition)
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(5)
                .write_capacity_units(5)
                .build()?,
        )
        .send()
        .await?;

    loop {
        let resp = client.describe_table().table_name(table_name).send().await?;
        let status = resp.table().and_then(|table| table.table_status());
        if status == Some(&TableStatus::Active) {
            break;
        }
        debug!("Table '{}' status: {:?}", table_name, status);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    info!("Table '{}' is ready for testing!", table_name);
    Ok(())
}

// Helper to create the users table for testing
pub async fn create_users_table(client: &Client, table_name: &str) -> Result<(), Box<dyn Error>> {
    create_keyed_table(client, table_name, USER_KEY).await
}

// Helper to create one ticket collection table for testing
pub async fn create_ticket_table(client: &Client, table_name: &str) -> Result<(), Box<dyn Error>> {
    create_keyed_table(client, table_name, TICKET_KEY).await
}

// Helper to seed a user row directly, bypassing the store under test
pub async fn put_user(
    client: &Client,
    table_name: &str,
    user_id: &str,
    user_name: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let mut request = client
        .put_item()
        .table_name(table_name)
        .item(USER_KEY, AttributeValue::S(user_id.to_string()));
    if let Some(name) = user_name {
        request = request.item("userName", AttributeValue::S(name.to_string()));
    }
    request.send().await?;
    Ok(())
}

// Helper to clean a DynamoDB table between tests
pub async fn clear_dynamo_table(client: &Client, table_name: &str, key_attr: &str) {
    let mut last_key = None;
    loop {
        let scan_resp = match client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(last_key.clone())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                // Ignore scan errors to keep the test running
                error!("Failed to scan table '{}': {}", table_name, e);
                break;
            }
        };

        for item in scan_resp.items() {
            if let Some(Ok(key)) = item.get(key_attr).map(|value| value.as_s()) {
                if let Err(e) = client
                    .delete_item()
                    .table_name(table_name)
                    .key(key_attr, AttributeValue::S(key.to_string()))
                    .send()
                    .await
                {
                    error!(
                        "Failed to delete item '{}' from table '{}': {}",
                        key, table_name, e
                    );
                }
            }
        }

        last_key = scan_resp.last_evaluated_key().cloned();
        if last_key.is_none() {
            break;
        }
    }
}
