//! In-process user store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::users::model::{NewUser, User, UserId};
use crate::users::store::{StoreError, UserStore};

/// A thread-safe store backed by a concurrent map.
///
/// Follows the same contract as the MongoDB store; identifiers are generated
/// the same way the document store generates them.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<DashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<UserId, StoreError> {
        let id = UserId::generate();
        self.inner.insert(id, user.clone().with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError> {
        self.inner
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn replace_fields(&self, id: &UserId, name: &str, email: &str) -> Result<u64, StoreError> {
        match self.inner.get_mut(id) {
            Some(mut entry) => {
                entry.name = name.to_string();
                entry.email = email.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<u64, StoreError> {
        Ok(self.inner.remove(id).map_or(0, |_| 1))
    }
}
