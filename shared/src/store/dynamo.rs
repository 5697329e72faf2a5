use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;

use crate::error::{map_get_dynamo_error, map_put_dynamo_error, Result};
use crate::models::{TicketRecord, TicketType, UserRecord};

// Partition keys
pub const USER_KEY: &str = "userId";
pub const TICKET_KEY: &str = "ticketId";

/// Builds a DynamoDB client from the default AWS config chain.
/// `endpoint` overrides the service URL, e.g. for DynamoDB local.
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(endpoint) = endpoint {
        log::info!("Using DynamoDB endpoint override: {}", endpoint);
        loader = loader.endpoint_url(endpoint);
    }
    let config = loader.load().await;

    Client::new(&config)
}

// DynamoUserStore

pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    /// Creates a new DynamoDB store with the specified client and table name.
    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl super::UserStore for DynamoUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let key = HashMap::from([(USER_KEY.to_string(), AttributeValue::S(user_id.to_string()))]);

        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| map_get_dynamo_error(e, &self.table_name))?;

        match response.item() {
            Some(item) => Ok(Some(from_item(item.clone())?)),
            None => Ok(None),
        }
    }
}

// DynamoTicketStore

/// DynamoDB store for tickets, one table per ticket type
pub struct DynamoTicketStore {
    client: Client,
    incident_table: String,
    service_table: String,
}

impl DynamoTicketStore {
    /// Creates a new DynamoDB store with the specified client and table names.
    pub fn with_client_and_tables(
        client: Client,
        incident_table: String,
        service_table: String,
    ) -> Self {
        Self {
            client,
            incident_table,
            service_table,
        }
    }

    /// Table backing the collection for a ticket type
    pub fn table_for(&self, collection: TicketType) -> &str {
        match collection {
            TicketType::Incident => &self.incident_table,
            TicketType::Service => &self.service_table,
        }
    }
}

#[async_trait]
impl super::TicketStore for DynamoTicketStore {
    async fn put_ticket(&self, collection: TicketType, ticket: TicketRecord) -> Result<TicketRecord> {
        let table_name = self.table_for(collection);
        let item = to_item(&ticket)?;

        log::debug!("Writing ticket {} to table {}", ticket.ticket_id, table_name);

        // Plain put: an existing ticket with the same ID is replaced
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_dynamo_error(e, table_name))?;

        Ok(ticket)
    }

    async fn get_ticket(&self, collection: TicketType, ticket_id: &str) -> Result<Option<TicketRecord>> {
        let table_name = self.table_for(collection);
        let key = HashMap::from([(TICKET_KEY.to_string(), AttributeValue::S(ticket_id.to_string()))]);

        let response = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| map_get_dynamo_error(e, table_name))?;

        match response.item() {
            Some(item) => Ok(Some(from_item(item.clone())?)),
            None => Ok(None),
        }
    }
}
