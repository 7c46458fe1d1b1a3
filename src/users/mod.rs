//! User resource subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → handlers.rs (parse id/body, open operation span)
//!     → store.rs (one UserStore call: mongo.rs or memory.rs)
//!     → http::response (status + JSON body)
//! ```
//!
//! # Design Decisions
//! - Identifiers are parsed before the store is touched
//! - Absence is a first-class outcome (NotFound / zero counts), never a failure
//! - No retries: every failure is terminal for the request

pub mod handlers;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod store;

pub use memory::MemoryUserStore;
pub use model::{InvalidUserId, NewUser, User, UserId, UserPayload};
pub use mongo::MongoUserStore;
pub use store::{StoreError, UserStore};

/// The four operations exposed on the user resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    /// Span name for this operation.
    pub fn span_name(self) -> &'static str {
        match self {
            Operation::Create => "createUser",
            Operation::Get => "getUser",
            Operation::Update => "updateUser",
            Operation::Delete => "deleteUser",
        }
    }

    /// Verb used in client-facing failure messages.
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}
