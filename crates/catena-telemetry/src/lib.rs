//! Observability setup for Catena.
//!
//! Catena's libraries only emit `tracing` events and `metrics` measurements.
//! This crate wires them to outputs:
//!
//! - **Logging**: `tracing-subscriber` with JSON or pretty formatting
//! - **Metrics**: a Prometheus recorder whose text output can be rendered on
//!   demand
//!
//! # Example
//!
//! ```rust,ignore
//! use catena_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("pipeline-worker")
//!     .log_level("catena_core=debug,info")
//!     .metrics_enabled(true)
//!     .build();
//!
//! init_telemetry(&config)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, render_metrics, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Configuration for all telemetry subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Logging configuration.
    pub logging: LogConfig,

    /// Metrics configuration.
    pub metrics: MetricsConfig,
}

impl TelemetryConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::new()
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    config: TelemetryConfig,
}

impl TelemetryConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.config.logging.service_name = name.to_string();
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    /// Selects JSON (`true`) or pretty (`false`) log output.
    #[must_use]
    pub fn json_logs(mut self, json: bool) -> Self {
        self.config.logging.json_format = json;
        self
    }

    /// Replaces the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LogConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Enables or disables the Prometheus recorder.
    #[must_use]
    pub fn metrics_enabled(mut self, enabled: bool) -> Self {
        self.config.metrics.enabled = enabled;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TelemetryConfig {
        self.config
    }
}

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
