//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     → logging.rs (subscriber: console, log file, OTLP layer)
//!
//! Per request:
//!     → trace.rs (operation span parented on propagated context)
//!     → handler log events inside that span
//!
//! Consumers:
//!     → stdout / app.log (structured lines)
//!     → OTLP collector (spans)
//! ```

pub mod logging;
pub mod trace;

pub use logging::{init_telemetry, TelemetryError, TelemetryGuard};
pub use trace::{operation_span, record_user_id, X_REQUEST_ID};
