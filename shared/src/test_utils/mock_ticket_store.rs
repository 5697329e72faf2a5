use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::models::{TicketRecord, TicketType};
use crate::store::TicketStore;

/// MockTicketStore keeps one in-memory map per ticket collection
pub struct MockTicketStore {
    collections: Mutex<HashMap<TicketType, HashMap<String, TicketRecord>>>,
    unavailable: AtomicBool,
    writes: AtomicUsize,
}

impl MockTicketStore {
    /// Create a new empty MockTicketStore
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent write fail as if DynamoDB were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful writes across all collections
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Snapshot of every ticket in a collection
    pub fn tickets_in(&self, collection: TicketType) -> Vec<TicketRecord> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .map(|tickets| tickets.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MockTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for MockTicketStore {
    async fn put_ticket(&self, collection: TicketType, ticket: TicketRecord) -> Result<TicketRecord> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "mock ticket store is unavailable".to_string(),
            ));
        }

        // Upsert, same as a DynamoDB put_item
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .insert(ticket.ticket_id.clone(), ticket.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(ticket)
    }

    async fn get_ticket(&self, collection: TicketType, ticket_id: &str) -> Result<Option<TicketRecord>> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(&collection)
            .and_then(|tickets| tickets.get(ticket_id))
            .cloned())
    }
}
