//! Typed configuration for Catena.
//!
//! Configuration is loaded in layers, later layers overriding earlier ones:
//!
//! 1. **Defaults**, or the development/production preset
//! 2. **File**: TOML or JSON, chosen by extension
//! 3. **Environment**: `PREFIX__SECTION__KEY` variables
//!
//! Unknown fields are rejected, and the result is validated before it is
//! returned.
//!
//! # Example
//!
//! ```no_run
//! use catena_config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()
//!     .with_optional_file("catena.toml")?
//!     .with_env_prefix("CATENA")
//!     .load()?;
//!
//! catena_telemetry::init_telemetry(&config.telemetry_config())?;
//! let composer = config.composer();
//! # let _ = composer;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration file
//!
//! ```toml
//! [composer]
//! strategy = "recursive"     # or "iterative"
//! recursion_limit = 1024
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"            # or "pretty"
//! service_name = "catena"
//!
//! [metrics]
//! enabled = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{CatenaConfig, CatenaConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, MetricsSection};
