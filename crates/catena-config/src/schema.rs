//! Configuration schema types.
//!
//! The `[composer]` section reuses [`catena_core::ComposerConfig`] directly;
//! the sections defined here cover logging and metrics.

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Logging section.
///
/// # Example
///
/// ```
/// use catena_config::{LogFormat, LoggingConfig};
///
/// let config = LoggingConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.level, "info");
/// assert_eq!(config.format, LogFormat::Json);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Whether a log subscriber is installed.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive, e.g. `"info"` or `"catena_core=trace,warn"`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Service name attached to log output.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: LogFormat::default(),
            service_name: default_service_name(),
        }
    }
}

/// Metrics section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Whether the Prometheus recorder is installed.
    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "catena".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults_from_empty_table() {
        let config: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_log_format_parse() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_unknown_logging_field_rejected() {
        let result: Result<LoggingConfig, _> = toml::from_str(r#"colour = true"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_metrics_default_disabled() {
        assert!(!MetricsSection::default().enabled);
    }
}
