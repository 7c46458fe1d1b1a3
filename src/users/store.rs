//! Persistence gateway between handlers and the document store.
//!
//! # Responsibilities
//! - Insert, look up, replace and delete users by identifier
//! - Report absence as a distinguished outcome, never as a failure
//!
//! # Design Decisions
//! - Update and delete report matched/deleted counts; zero means no such user
//! - Implementations are shared as `Arc<dyn UserStore>` and must be thread-safe
//! - Every call is a plain future, so dropping the request cancels it

use async_trait::async_trait;
use thiserror::Error;

use crate::users::model::{NewUser, User, UserId};

/// Errors surfaced by a [`UserStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document matches the identifier.
    #[error("user not found")]
    NotFound,

    /// The document driver reported an error.
    #[error("document store error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// The store handed back an identifier of an unexpected type.
    #[error("unexpected inserted id: {0}")]
    UnexpectedId(String),

    /// The store did not answer in time or cannot serve requests.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Narrow CRUD interface over the user collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user and return the identifier the store assigned.
    async fn insert(&self, user: &NewUser) -> Result<UserId, StoreError>;

    /// Fetch a user. Absence is reported as [`StoreError::NotFound`].
    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError>;

    /// Overwrite both name and email. Returns the number of matched users.
    async fn replace_fields(&self, id: &UserId, name: &str, email: &str) -> Result<u64, StoreError>;

    /// Remove a user. Returns the number of deleted users.
    async fn delete(&self, id: &UserId) -> Result<u64, StoreError>;
}
