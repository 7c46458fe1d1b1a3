//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate request id)
//!     → users::handlers (one store call per request)
//!     → response.rs (status mapping, JSON bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use response::{ApiError, ErrorBody, MessageBody};
pub use server::{build_router, AppState, HttpServer};
