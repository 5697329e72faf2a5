use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::models::UserRecord;
use crate::store::UserStore;

/// MockUserStore is a simple in-memory implementation of UserStore for testing
pub struct MockUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
    unavailable: AtomicBool,
    lookups: AtomicUsize,
}

impl MockUserStore {
    /// Create a new empty MockUserStore
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Create a MockUserStore with initial test data
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.users.lock().unwrap();
            for user in users {
                map.insert(user.user_id.clone(), user);
            }
        }
        store
    }

    /// Make every subsequent lookup fail as if DynamoDB were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups issued against this store
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "mock user store is unavailable".to_string(),
            ));
        }

        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }
}
