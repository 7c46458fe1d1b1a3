//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the user routes
//! - Wire up middleware (request id, access trace) and the body size limit
//! - Bind server to listener
//! - Stop accepting and drain on shutdown
//!
//! # Design Decisions
//! - The body limit is enforced by the extractor, so oversized bodies reach
//!   the handler as a rejection and get a JSON error inside the operation span
//! - The request deadline bounds the store call rather than the whole service,
//!   so a hung store is reported as that operation's failure

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::users::handlers::{create_user, delete_user, get_user, update_user};
use crate::users::UserStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    /// Deadline for a single store call.
    pub store_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }
}

/// HTTP server for the user service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: &ServiceConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            router: build_router(config, store),
        }
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &ServiceConfig, store: Arc<dyn UserStore>) -> Router {
    let state = AppState::new(store, Duration::from_secs(config.timeouts.request_secs));

    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}
