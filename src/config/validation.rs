//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Check addresses, endpoints and filters parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("mongodb.uri {0:?} must start with mongodb:// or mongodb+srv://")]
    InvalidMongoUri(String),

    #[error("tracing.endpoint {0:?} must be an http(s) URL")]
    InvalidEndpoint(String),

    #[error("logging.level {0:?} is not a valid filter")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mongo = &config.mongodb;
    if !(mongo.uri.starts_with("mongodb://") || mongo.uri.starts_with("mongodb+srv://")) {
        errors.push(ValidationError::InvalidMongoUri(mongo.uri.clone()));
    }
    if mongo.database.is_empty() {
        errors.push(ValidationError::Empty("mongodb.database"));
    }
    if mongo.collection.is_empty() {
        errors.push(ValidationError::Empty("mongodb.collection"));
    }
    if mongo.server_selection_timeout_secs == 0 {
        errors.push(ValidationError::Zero("mongodb.server_selection_timeout_secs"));
    }

    if config.tracing.enabled {
        let endpoint = &config.tracing.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(ValidationError::InvalidEndpoint(endpoint.clone()));
        }
        if config.tracing.service_name.is_empty() {
            errors.push(ValidationError::Empty("tracing.service_name"));
        }
    }

    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
