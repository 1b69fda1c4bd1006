//! # Catena
//!
//! **Continuation-passing chain composition**
//!
//! Catena turns an ordered list of *links* ended by a *terminal* into a
//! single callable. Each link receives the rest of the chain as `next` and
//! decides, when it runs, whether to call it:
//!
//! ```text
//! [L1, L2, T]  →  L1(L2(T()))
//!
//! call → L1 ─next()→ L2 ─next()→ T
//! ```
//!
//! - **Any calling convention**: the callable type is yours, sync or async
//! - **Positional roles**: the last element is the terminal, the rest are links
//! - **Two algorithms**: recursive, or an iterative fold for very long chains
//! - **Ambient stack**: layered configuration, `tracing` logs, Prometheus metrics
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use catena::prelude::*;
//!
//! type Handler = Arc<dyn Fn(&str) -> String + Send + Sync>;
//!
//! let chain: Chain<Handler> = Chain::builder()
//!     .link(|next: Handler| -> Handler {
//!         Arc::new(move |req: &str| format!("[{}]", next(req)))
//!     })
//!     .link(|next: Handler| -> Handler {
//!         Arc::new(move |req: &str| {
//!             if req.is_empty() {
//!                 "rejected".to_string()
//!             } else {
//!                 next(req)
//!             }
//!         })
//!     })
//!     .terminal(|| -> Handler { Arc::new(|req: &str| req.to_uppercase()) });
//!
//! let handle = chain.compose().unwrap();
//! assert_eq!(handle("ok"), "[OK]");
//! assert_eq!(handle(""), "[rejected]");
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! use catena::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .with_optional_file("catena.toml")?
//!     .with_env_prefix("CATENA")
//!     .load()?;
//!
//! catena::telemetry::init_telemetry(&config.telemetry_config())?;
//! let composer = config.composer();
//! ```

#![doc(html_root_url = "https://docs.rs/catena/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use catena_core as core;

// Re-export configuration types
pub use catena_config as config;

// Re-export telemetry setup
pub use catena_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use catena::prelude::*;
///
/// let composer = Composer::new(ComposerConfig::default());
/// assert_eq!(composer.strategy_for(8), ComposeStrategy::Recursive);
/// ```
pub mod prelude {
    pub use catena_core::{
        compose, compose_at, compose_iter, compose_iter_at, is_last, BoxFuture, Chain,
        ChainBuilder, ChainError, ChainResult, ComposeStrategy, Composer, ComposerConfig,
        Element, Link, Role, Terminal,
    };

    // Re-export configuration entry points
    pub use catena_config::{CatenaConfig, ConfigError, ConfigLoader};

    // Re-export telemetry entry points
    pub use catena_telemetry::{init_telemetry, TelemetryConfig, TelemetryError};
}
