//! Prometheus metrics.
//!
//! `catena-core` records its metrics through the `metrics` facade. This
//! module installs a Prometheus recorder so those metrics can be rendered.
//! Serving the rendered text is left to the embedding application.
//!
//! See [`catena_core::metrics`] for the metric names.

use crate::error::TelemetryError;
use crate::TelemetryResult;
use catena_core::metrics::{CHAIN_ERRORS_TOTAL, CHAIN_LENGTH, COMPOSITIONS_TOTAL};
use ::metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock, PoisonError};

/// Global metrics handle for rendering.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Serializes recorder installation across threads.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus recorder.
    pub enabled: bool,
}

impl MetricsConfig {
    /// Creates an enabled configuration.
    #[must_use]
    pub fn enabled() -> Self {
        Self { enabled: true }
    }
}

/// Installs the global Prometheus recorder.
///
/// Does nothing when metrics are disabled or the recorder was already
/// installed by an earlier call, including one racing on another thread.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if another recorder is installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);
    register_metric_descriptions();

    Ok(())
}

/// Returns the global metrics handle if initialized.
pub fn metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(COMPOSITIONS_TOTAL, "Total number of successful chain compositions");
    describe_counter!(CHAIN_ERRORS_TOTAL, "Total number of failed chain compositions");
    describe_histogram!(CHAIN_LENGTH, "Number of elements per composed chain");
}

#[cfg(test)]
mod tests {
    use super::*;
    use catena_core::{compose, Element};
    use std::sync::Arc;

    type Step = Arc<dyn Fn() -> u8 + Send + Sync>;

    #[test]
    fn test_default_config_is_disabled() {
        assert!(!MetricsConfig::default().enabled);
        assert!(MetricsConfig::enabled().enabled);
    }

    #[test]
    fn test_disabled_metrics_is_noop() {
        assert!(init_metrics(&MetricsConfig::default()).is_ok());
    }

    #[test]
    fn test_concurrent_init() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| init_metrics(&MetricsConfig::enabled())))
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert!(metrics_handle().is_some());
    }

    #[test]
    fn test_init_and_render() {
        init_metrics(&MetricsConfig::enabled()).unwrap();
        // A second call is a no-op.
        init_metrics(&MetricsConfig::enabled()).unwrap();
        assert!(metrics_handle().is_some());

        let chain: Vec<Element<Step>> =
            vec![Element::terminal(|| -> Step { Arc::new(|| 1) })];
        compose(&chain).unwrap();
        let empty: Vec<Element<Step>> = Vec::new();
        assert!(compose(&empty).is_err());

        let rendered = render_metrics().unwrap();
        assert!(rendered.contains(COMPOSITIONS_TOTAL));
        assert!(rendered.contains(CHAIN_ERRORS_TOTAL));
        assert!(rendered.contains("invalid_chain"));
    }
}
