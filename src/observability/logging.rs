//! Structured logging and telemetry bootstrap.
//!
//! # Responsibilities
//! - Install the global tracing subscriber once at startup
//! - Console output (pretty or JSON), optional JSON log file
//! - Optional OTLP span export through `tracing-opentelemetry`
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - [`TelemetryGuard`] owns the tracer provider; dropping it flushes and
//!   shuts down the exporter

use std::fs::OpenOptions;
use std::sync::Arc;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{runtime, Resource};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig, TracingConfig};

/// Errors raised while installing telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(String),

    #[error("failed to open log file: {0}")]
    LogFile(#[from] std::io::Error),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps telemetry alive for the lifetime of the process.
#[must_use = "dropping the guard shuts down trace export"]
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!(error = %e, "Failed to shut down tracer provider");
            }
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber and, when enabled, the OTLP pipeline.
pub fn init_telemetry(
    logging: &LoggingConfig,
    tracing_config: &TracingConfig,
) -> Result<TelemetryGuard, TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)?,
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();

    layers.push(match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    });

    if let Some(path) = &logging.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .boxed(),
        );
    }

    let provider = if tracing_config.enabled {
        let provider = build_tracer_provider(tracing_config)?;
        let tracer = provider.tracer(tracing_config.service_name.clone());
        layers.push(tracing_opentelemetry::layer().with_tracer(tracer).boxed());
        opentelemetry::global::set_tracer_provider(provider.clone());
        Some(provider)
    } else {
        None
    };

    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    tracing_subscriber::registry().with(layers).with(filter).try_init()?;

    if let Some(path) = &logging.file {
        tracing::info!(path = %path.display(), "Logging to file");
    }
    if tracing_config.enabled {
        tracing::info!(endpoint = %tracing_config.endpoint, "OTLP trace export enabled");
    }

    Ok(TelemetryGuard { provider })
}

fn build_tracer_provider(config: &TracingConfig) -> Result<TracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.endpoint.clone())
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(resource)
        .build())
}
