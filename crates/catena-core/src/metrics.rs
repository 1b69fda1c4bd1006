//! Metric names and recording helpers.
//!
//! Recording goes through the [`metrics`] facade. Until a recorder is
//! installed (see `catena-telemetry`), every call here is a no-op.
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `catena_compositions_total` | Counter | `strategy` | Successful compositions |
//! | `catena_chain_errors_total` | Counter | `kind` | Failed compositions |
//! | `catena_chain_length` | Histogram | - | Elements composed per call |

use crate::composer::ComposeStrategy;
use crate::error::ChainError;
use ::metrics::{counter, histogram};

/// Counter of successful compositions.
pub const COMPOSITIONS_TOTAL: &str = "catena_compositions_total";

/// Counter of failed compositions, labelled by error kind.
pub const CHAIN_ERRORS_TOTAL: &str = "catena_chain_errors_total";

/// Histogram of composed chain segment lengths.
pub const CHAIN_LENGTH: &str = "catena_chain_length";

/// Records a successful composition of `len` elements.
pub fn record_composition(strategy: ComposeStrategy, len: usize) {
    counter!(COMPOSITIONS_TOTAL, "strategy" => strategy.as_str()).increment(1);
    #[allow(clippy::cast_precision_loss)]
    histogram!(CHAIN_LENGTH).record(len as f64);
}

/// Records a failed composition.
pub fn record_error(error: &ChainError) {
    counter!(CHAIN_ERRORS_TOTAL, "kind" => error.kind()).increment(1);
}
