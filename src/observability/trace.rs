//! Per-request trace spans.
//!
//! # Responsibilities
//! - Extract W3C trace context from incoming request headers
//! - Open one span per handler invocation, parented on that context
//! - Attach `user.id` once the identifier is known
//!
//! # Design Decisions
//! - The span closes when the instrumented handler future completes or is
//!   dropped, so every exit path closes it exactly once
//! - Log events emitted inside the span carry its fields (`trace_id`,
//!   `request_id`, `user.id`)

use axum::http::HeaderMap;
use opentelemetry::trace::{TraceContextExt, TraceId};
use opentelemetry::Context;
use opentelemetry_http::HeaderExtractor;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::users::{Operation, UserId};

/// Header carrying the request id set by the request-id middleware.
pub const X_REQUEST_ID: &str = "x-request-id";

macro_rules! operation_span {
    ($name:literal, $request_id:expr) => {
        tracing::info_span!(
            $name,
            otel.name = $name,
            otel.kind = "server",
            request_id = %$request_id,
            user.id = tracing::field::Empty,
            trace_id = tracing::field::Empty,
        )
    };
}

/// Extract the propagated trace context using the global propagator.
pub fn extract_context(headers: &HeaderMap) -> Context {
    opentelemetry::global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(headers))
    })
}

/// Open the span for one handler invocation.
pub fn operation_span(operation: Operation, headers: &HeaderMap) -> Span {
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let span = match operation {
        Operation::Create => operation_span!("createUser", request_id),
        Operation::Get => operation_span!("getUser", request_id),
        Operation::Update => operation_span!("updateUser", request_id),
        Operation::Delete => operation_span!("deleteUser", request_id),
    };
    let parent = extract_context(headers);
    if parent.span().span_context().is_valid() {
        span.set_parent(parent);
    }

    let trace_id = span.context().span().span_context().trace_id();
    if trace_id != TraceId::INVALID {
        span.record("trace_id", tracing::field::display(trace_id));
    }

    span
}

/// Attach `user.id` to the current span.
pub fn record_user_id(id: &UserId) {
    Span::current().record("user.id", tracing::field::display(id));
}
