//! Error types for chain composition.
//!
//! The composer has a single precondition of its own: an element must exist
//! at every position it visits. Violations surface as
//! [`ChainError::InvalidChain`]. An element used in the wrong role (a link in
//! the last position, or a terminal anywhere else) is reported separately as
//! [`ChainError::RoleMismatch`], at the moment the composer would have invoked
//! it.
//!
//! Failures raised by the links themselves are never represented here. They
//! travel through whatever return type the composed function uses.

use crate::element::Role;
use thiserror::Error;

/// Result type alias using [`ChainError`].
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors raised while composing a chain.
///
/// # Example
///
/// ```
/// use catena_core::{compose, ChainError, Element};
///
/// let empty: Vec<Element<fn() -> u8>> = Vec::new();
/// let err = compose(&empty).unwrap_err();
///
/// assert_eq!(err, ChainError::InvalidChain { index: 0 });
/// assert_eq!(err.to_string(), "Invalid chain: no function found at index 0");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// No element exists at the index being composed.
    #[error("Invalid chain: no function found at index {index}")]
    InvalidChain {
        /// The missing position.
        index: usize,
    },

    /// The element at `index` cannot play the role its position requires.
    #[error("Invalid chain: expected a {expected} at index {index}, found a {found}")]
    RoleMismatch {
        /// Position of the offending element.
        index: usize,
        /// Role dictated by the position.
        expected: Role,
        /// Role of the element actually stored there.
        found: Role,
    },
}

impl ChainError {
    /// Creates an [`InvalidChain`](Self::InvalidChain) error.
    #[must_use]
    pub const fn invalid_chain(index: usize) -> Self {
        Self::InvalidChain { index }
    }

    /// Creates a [`RoleMismatch`](Self::RoleMismatch) error.
    #[must_use]
    pub const fn role_mismatch(index: usize, expected: Role, found: Role) -> Self {
        Self::RoleMismatch {
            index,
            expected,
            found,
        }
    }

    /// Returns the index the error refers to.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::InvalidChain { index } | Self::RoleMismatch { index, .. } => *index,
        }
    }

    /// Returns a stable, lowercase name for the error kind.
    ///
    /// Used as the `kind` label on error metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidChain { .. } => "invalid_chain",
            Self::RoleMismatch { .. } => "role_mismatch",
        }
    }
}
