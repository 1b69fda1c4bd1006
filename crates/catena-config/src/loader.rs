//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use catena_core::ComposeStrategy;
use serde_json::Value;
use tracing::debug;

use crate::{CatenaConfig, ConfigError, LogFormat};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (or a preset)
/// 2. Configuration file or string (TOML or JSON)
/// 3. Environment variables
///
/// # Example
///
/// ```no_run
/// use catena_config::ConfigLoader;
///
/// # fn main() -> Result<(), catena_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("catena.toml")?
///     .with_env_prefix("CATENA")
///     .load()?;
///
/// let composer = config.composer();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: CatenaConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CatenaConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with the development preset.
    ///
    /// # Example
    ///
    /// ```
    /// use catena_config::{ConfigLoader, LogFormat};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = CatenaConfig::development();
        self
    }

    /// Start with the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = CatenaConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON or unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let layer = Self::parse_file(&content, path)?;
        self.merge_layer(layer)?;
        debug!(path = %path.display(), "loaded configuration file");

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// `format` is `"toml"` or `"json"`. Only the fields present in `content`
    /// override the current values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or the format is unsupported.
    ///
    /// # Example
    ///
    /// ```
    /// use catena_config::ConfigLoader;
    /// use catena_core::ComposeStrategy;
    ///
    /// let toml = r#"
    ///     [composer]
    ///     strategy = "iterative"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.composer.strategy, ComposeStrategy::Iterative);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let layer = match format.to_lowercase().as_str() {
            "toml" => Self::parse_toml(content)?,
            "json" => Self::parse_json(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        self.merge_layer(layer)?;
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`, for example
    /// `CATENA__COMPOSER__STRATEGY=iterative`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if present.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env file");
        }
        self
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment overrides (if a prefix was set), then validates.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment variable cannot be parsed or
    /// validation fails.
    pub fn load(mut self) -> Result<CatenaConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Finalize without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> CatenaConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<Value, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::parse_toml(content),
            Some("json") => Self::parse_json(content),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    // A layer is parsed into the typed config first so unknown fields and
    // bad values are reported against the source format.
    fn parse_toml(content: &str) -> Result<Value, ConfigError> {
        toml::from_str::<CatenaConfig>(content)?;
        Ok(toml::from_str(content)?)
    }

    fn parse_json(content: &str) -> Result<Value, ConfigError> {
        serde_json::from_str::<CatenaConfig>(content)?;
        Ok(serde_json::from_str(content)?)
    }

    // Overlays the fields set in `layer` onto the current config.
    fn merge_layer(&mut self, layer: Value) -> Result<(), ConfigError> {
        let mut merged = serde_json::to_value(&self.config)?;
        overlay(&mut merged, layer);
        self.config = serde_json::from_value(merged)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let env_vars: HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(key_without_prefix) = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
        else {
            // Shares the prefix but not the separator, e.g. CATENA_HOME.
            return Ok(());
        };

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["COMPOSER", "STRATEGY"] => {
                self.config.composer.strategy = match value.to_lowercase().as_str() {
                    "recursive" => ComposeStrategy::Recursive,
                    "iterative" => ComposeStrategy::Iterative,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'recursive' or 'iterative'",
                        ))
                    }
                };
            }
            ["COMPOSER", "RECURSION_LIMIT"] => {
                self.config.composer.recursion_limit = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "SERVICE_NAME"] => {
                self.config.logging.service_name = value.to_string();
            }

            ["METRICS", "ENABLED"] => {
                self.config.metrics.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            // Unknown key - ignore
            _ => {}
        }

        Ok(())
    }
}

fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                overlay(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, layer) => *base = layer,
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
