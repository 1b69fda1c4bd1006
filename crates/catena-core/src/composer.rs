//! Configurable composer.
//!
//! [`Composer`] picks between the recursive and the iterative algorithm. The
//! recursive form mirrors the chain shape one stack frame per element; for
//! segments longer than [`ComposerConfig::recursion_limit`] it falls back to
//! the fold so very long chains cannot exhaust the stack.

use crate::compose::{finish, fold, recursive};
use crate::element::Element;
use crate::error::ChainResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Default maximum segment length composed recursively.
pub const DEFAULT_RECURSION_LIMIT: usize = 1024;

/// Algorithm used to compose a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposeStrategy {
    /// One recursive call per element.
    #[default]
    Recursive,
    /// A back-to-front loop with constant stack depth.
    Iterative,
}

impl ComposeStrategy {
    /// Returns the lowercase strategy name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recursive => "recursive",
            Self::Iterative => "iterative",
        }
    }
}

impl fmt::Display for ComposeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composer settings.
///
/// # Example
///
/// ```
/// use catena_core::{ComposeStrategy, ComposerConfig};
///
/// let config: ComposerConfig = serde_json::from_str(r#"{"strategy": "iterative"}"#).unwrap();
/// assert_eq!(config.strategy, ComposeStrategy::Iterative);
/// assert_eq!(config.recursion_limit, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposerConfig {
    /// Preferred algorithm.
    #[serde(default)]
    pub strategy: ComposeStrategy,

    /// Longest segment composed recursively before switching to the fold.
    ///
    /// Only consulted when `strategy` is [`ComposeStrategy::Recursive`].
    #[serde(default = "default_recursion_limit")]
    pub recursion_limit: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            strategy: ComposeStrategy::default(),
            recursion_limit: default_recursion_limit(),
        }
    }
}

impl ComposerConfig {
    /// Configuration that always uses the iterative fold.
    #[must_use]
    pub fn iterative() -> Self {
        Self {
            strategy: ComposeStrategy::Iterative,
            ..Self::default()
        }
    }
}

fn default_recursion_limit() -> usize {
    DEFAULT_RECURSION_LIMIT
}

/// Composes chains according to a [`ComposerConfig`].
///
/// A composer holds no per-chain state and can be shared freely.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use catena_core::{Chain, Composer, ComposerConfig};
///
/// type Step = Arc<dyn Fn(i64) -> i64 + Send + Sync>;
///
/// let chain: Chain<Step> = Chain::builder()
///     .link(|next: Step| -> Step { Arc::new(move |n: i64| next(n + 1)) })
///     .terminal(|| -> Step { Arc::new(|n: i64| n * 10) });
///
/// let composer = Composer::new(ComposerConfig::iterative());
/// let run = chain.compose_with(&composer).unwrap();
/// assert_eq!(run(4), 50);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposerConfig,
}

impl Composer {
    /// Creates a composer with the given configuration.
    #[must_use]
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Returns the composer configuration.
    #[must_use]
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Returns the algorithm used for a segment of `len` elements.
    #[must_use]
    pub fn strategy_for(&self, len: usize) -> ComposeStrategy {
        match self.config.strategy {
            ComposeStrategy::Recursive if len > self.config.recursion_limit => {
                ComposeStrategy::Iterative
            }
            strategy => strategy,
        }
    }

    /// Composes a whole chain.
    ///
    /// # Errors
    ///
    /// See [`compose`](crate::compose).
    pub fn compose<F, U>(&self, chain: &[Element<F, U>]) -> ChainResult<F>
    where
        U: Into<F>,
    {
        self.compose_at(chain, 0)
    }

    /// Composes the chain starting at `index`.
    ///
    /// # Errors
    ///
    /// See [`compose_at`](crate::compose_at).
    pub fn compose_at<F, U>(&self, chain: &[Element<F, U>], index: usize) -> ChainResult<F>
    where
        U: Into<F>,
    {
        let segment_len = chain.len().saturating_sub(index);
        let strategy = self.strategy_for(segment_len);
        if strategy != self.config.strategy {
            debug!(
                segment_len,
                chain_len = chain.len(),
                start = index,
                recursion_limit = self.config.recursion_limit,
                "segment exceeds recursion limit, using iterative fold"
            );
        }

        let result = match strategy {
            ComposeStrategy::Recursive => recursive(chain, index),
            ComposeStrategy::Iterative => fold(chain, index),
        };
        finish(strategy, chain.len(), index, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainError;
    use std::io;
    use std::sync::{Arc, Mutex};

    type Count = Arc<dyn Fn() -> usize + Send + Sync>;

    fn counting_chain(links: usize) -> Vec<Element<Count>> {
        let mut chain: Vec<Element<Count>> = (0..links)
            .map(|_| Element::link(|next: Count| -> Count { Arc::new(move || next() + 1) }))
            .collect();
        chain.push(Element::terminal(|| -> Count { Arc::new(|| 0) }));
        chain
    }

    #[test]
    fn test_default_config() {
        let config = ComposerConfig::default();
        assert_eq!(config.strategy, ComposeStrategy::Recursive);
        assert_eq!(config.recursion_limit, DEFAULT_RECURSION_LIMIT);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result: Result<ComposerConfig, _> = serde_json::from_str(r#"{"depth": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strategy_for_respects_limit() {
        let composer = Composer::new(ComposerConfig {
            strategy: ComposeStrategy::Recursive,
            recursion_limit: 4,
        });
        assert_eq!(composer.strategy_for(4), ComposeStrategy::Recursive);
        assert_eq!(composer.strategy_for(5), ComposeStrategy::Iterative);

        let iterative = Composer::new(ComposerConfig::iterative());
        assert_eq!(iterative.strategy_for(1), ComposeStrategy::Iterative);
    }

    #[test]
    fn test_compose_both_strategies() {
        let chain = counting_chain(3);
        let recursive = Composer::default().compose(&chain).unwrap();
        let iterative = Composer::new(ComposerConfig::iterative()).compose(&chain).unwrap();
        assert_eq!(recursive(), 3);
        assert_eq!(iterative(), 3);
    }

    #[test]
    fn test_long_chain_falls_back_to_fold() {
        let chain = counting_chain(5_000);
        let composer = Composer::new(ComposerConfig {
            strategy: ComposeStrategy::Recursive,
            recursion_limit: 64,
        });

        assert_eq!(composer.strategy_for(chain.len()), ComposeStrategy::Iterative);
        assert!(composer.compose(&chain).is_ok());
        // A short tail stays within the limit and is composed recursively.
        assert_eq!(composer.strategy_for(10), ComposeStrategy::Recursive);
        assert_eq!(composer.compose_at(&chain, chain.len() - 10).unwrap()(), 9);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fallback_logs_segment_length() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let chain = counting_chain(100);
        let composer = Composer::new(ComposerConfig {
            strategy: ComposeStrategy::Recursive,
            recursion_limit: 64,
        });

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(composer.compose_at(&chain, 20).unwrap()(), 80);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("segment exceeds recursion limit"));
        assert!(output.contains("segment_len=81"));
        assert!(output.contains("chain_len=101"));
        assert!(output.contains("start=20"));
    }

    #[test]
    fn test_compose_at_missing_index() {
        let chain = counting_chain(1);
        let err = Composer::default().compose_at(&chain, 5).err();
        assert_eq!(err, Some(ChainError::invalid_chain(5)));
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&ComposeStrategy::Iterative).unwrap();
        assert_eq!(json, "\"iterative\"");
        assert_eq!(ComposeStrategy::Recursive.to_string(), "recursive");
    }
}
