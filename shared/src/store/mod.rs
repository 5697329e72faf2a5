use async_trait::async_trait;

use crate::error::Result;
use crate::models::{TicketRecord, TicketType, UserRecord};

// Expose the DynamoDB store module
pub mod dynamo;

/// UserStore trait defining the interface for user lookups
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Point lookup by user ID. `Ok(None)` means the user does not exist.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>>;
}

/// TicketStore trait defining the interface for ticket persistence.
///
/// Tickets live in one collection per [`TicketType`]. Writes are upserts keyed
/// on `ticket_id`: writing the same ID twice replaces the earlier record.
#[async_trait]
pub trait TicketStore: Send + Sync + 'static {
    /// Writes a ticket into the collection for `collection`
    async fn put_ticket(&self, collection: TicketType, ticket: TicketRecord) -> Result<TicketRecord>;

    /// Gets a ticket by ID from the given collection
    async fn get_ticket(&self, collection: TicketType, ticket_id: &str) -> Result<Option<TicketRecord>>;
}
