//! User CRUD service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                 USER SERVICE                 │
//!                     │                                              │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│  users   │──▶│ UserStore │──┼──▶ MongoDB
//!                     │  │ server  │   │ handlers │   │  gateway  │  │
//!   Client Response   │  └─────────┘   └────┬─────┘   └───────────┘  │
//!   ◀─────────────────┼───────────────────  │                        │
//!                     │                     ▼                        │
//!                     │              ┌──────────────┐                │
//!                     │              │observability │────────────────┼──▶ OTLP collector
//!                     │              │ span + logs  │                │    app.log
//!                     │              └──────────────┘                │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use user_service::http::HttpServer;
use user_service::lifecycle::{signals, startup, Shutdown};
use user_service::observability;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User CRUD service backed by MongoDB", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep users in process memory instead of MongoDB.
    #[arg(long)]
    in_memory: bool,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(cli.config.as_deref(), cli.bind.as_deref())?;

    let _telemetry = observability::init_telemetry(&config.logging, &config.tracing)?;

    tracing::info!("user-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.mongodb.database,
        collection = %config.mongodb.collection,
        tracing_enabled = config.tracing.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = match startup::build_store(&config, cli.in_memory).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to MongoDB");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(&config, store);
    if let Err(e) = server.run(listener, shutdown.subscribe()).await {
        tracing::error!(error = %e, "Failed to run server");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
