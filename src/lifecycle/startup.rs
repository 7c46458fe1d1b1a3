//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration from an optional file plus CLI overrides
//! - Construct the user store the handlers are given
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The store is built once and injected; handlers never reach for globals

use std::path::Path;
use std::sync::Arc;

use crate::config::{load_config, validate_config, ConfigError, ServiceConfig};
use crate::users::{MemoryUserStore, MongoUserStore, StoreError, UserStore};

/// Load the config file if given, otherwise defaults, then apply overrides.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

/// Build the store selected at startup.
pub async fn build_store(
    config: &ServiceConfig,
    in_memory: bool,
) -> Result<Arc<dyn UserStore>, StoreError> {
    if in_memory {
        tracing::warn!("Using in-memory user store; data is lost on exit");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let store = MongoUserStore::connect(&config.mongodb).await?;
    Ok(Arc::new(store))
}
