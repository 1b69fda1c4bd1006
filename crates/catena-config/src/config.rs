//! Main configuration types.
//!
//! This module provides the top-level [`CatenaConfig`] struct and its builder.

use catena_core::{Composer, ComposerConfig};
use catena_telemetry::logging::create_env_filter;
use catena_telemetry::{LogConfig, MetricsConfig, TelemetryConfig};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, MetricsSection};

/// Complete Catena configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use catena_config::CatenaConfig;
/// use catena_core::ComposeStrategy;
///
/// let config = CatenaConfig::default();
/// assert_eq!(config.composer.strategy, ComposeStrategy::Recursive);
/// assert!(!config.metrics.enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CatenaConfig {
    /// Composer settings.
    #[serde(default)]
    pub composer: ComposerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics settings.
    #[serde(default)]
    pub metrics: MetricsSection,
}

impl CatenaConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> CatenaConfigBuilder {
        CatenaConfigBuilder::new()
    }

    /// Development preset: pretty debug logs.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                ..LoggingConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production preset: JSON info logs and Prometheus metrics.
    #[must_use]
    pub fn production() -> Self {
        Self {
            metrics: MetricsSection { enabled: true },
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `composer.recursion_limit` is zero
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.composer.recursion_limit == 0 {
            return Err(ConfigError::invalid_value(
                "composer.recursion_limit",
                "must be at least 1",
            ));
        }

        if let Err(e) = create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        Ok(())
    }

    /// Builds a composer from the `[composer]` section.
    #[must_use]
    pub fn composer(&self) -> Composer {
        Composer::new(self.composer.clone())
    }

    /// Converts the logging and metrics sections into a telemetry config.
    #[must_use]
    pub fn telemetry_config(&self) -> TelemetryConfig {
        let logging = LogConfig {
            enabled: self.logging.enabled,
            level: self.logging.level.clone(),
            json_format: self.logging.format == LogFormat::Json,
            service_name: self.logging.service_name.clone(),
            ..LogConfig::default()
        };

        TelemetryConfig {
            logging,
            metrics: MetricsConfig {
                enabled: self.metrics.enabled,
            },
        }
    }
}

/// Builder for [`CatenaConfig`].
#[derive(Debug, Default)]
pub struct CatenaConfigBuilder {
    config: CatenaConfig,
}

impl CatenaConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the composer configuration.
    #[must_use]
    pub fn composer(mut self, composer: ComposerConfig) -> Self {
        self.config.composer = composer;
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set the metrics configuration.
    #[must_use]
    pub fn metrics(mut self, metrics: MetricsSection) -> Self {
        self.config.metrics = metrics;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> CatenaConfig {
        self.config
    }
}
