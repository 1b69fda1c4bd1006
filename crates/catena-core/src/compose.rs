//! The chain composition algorithm.
//!
//! Composition walks a slice of [`Element`]s and produces one callable of the
//! links' type `F`. The role of each element is decided by position alone:
//!
//! ```text
//! index:     0        1        2   ...   len-1
//! role:    Link  →  Link  →  Link  →  Terminal
//! ```
//!
//! Composition resolves from the back: the terminal's callable is produced
//! first, then each link wraps the continuation built so far. Execution of the
//! composed callable runs the other way, from the first link forwards, each
//! link deciding whether to call into the rest.
//!
//! Two equivalent algorithms are provided. [`compose_at`] recurses once per
//! element; [`compose_iter_at`] folds in a loop and is safe for chains of any
//! length. Both report the same errors in the same precedence.

use crate::composer::ComposeStrategy;
use crate::element::{Element, Role};
use crate::error::{ChainError, ChainResult};
use crate::metrics;
use tracing::{debug, trace, warn};

/// Returns `true` if `index` is the last position of a chain of length `len`.
///
/// This is pure index arithmetic; the element stored there is never
/// inspected.
///
/// # Example
///
/// ```
/// use catena_core::is_last;
///
/// assert!(is_last(3, 2));
/// assert!(!is_last(3, 1));
/// assert!(!is_last(0, 0));
/// ```
#[must_use]
pub const fn is_last(len: usize, index: usize) -> bool {
    len != 0 && index == len - 1
}

/// Composes a whole chain, starting at position 0.
///
/// # Errors
///
/// - [`ChainError::InvalidChain`] if the chain is empty.
/// - [`ChainError::RoleMismatch`] if an element sits in a position whose role
///   it cannot play.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use catena_core::{compose, Element};
///
/// type Step = Arc<dyn Fn() -> String + Send + Sync>;
///
/// let chain: Vec<Element<Step>> = vec![
///     Element::link(|next: Step| -> Step { Arc::new(move || format!("1-{}", next())) }),
///     Element::link(|next: Step| -> Step { Arc::new(move || format!("2-{}", next())) }),
///     Element::terminal(|| -> Step { Arc::new(|| "end".to_string()) }),
/// ];
///
/// let run = compose(&chain).unwrap();
/// assert_eq!(run(), "1-2-end");
/// ```
pub fn compose<F, U>(chain: &[Element<F, U>]) -> ChainResult<F>
where
    U: Into<F>,
{
    compose_at(chain, 0)
}

/// Composes the chain starting at `index`, recursively.
///
/// The returned callable begins execution at `index`. Elements before it are
/// ignored.
///
/// # Errors
///
/// - [`ChainError::InvalidChain`] if there is no element at `index`.
/// - [`ChainError::RoleMismatch`] if an element from `index` onwards sits in a
///   position whose role it cannot play.
pub fn compose_at<F, U>(chain: &[Element<F, U>], index: usize) -> ChainResult<F>
where
    U: Into<F>,
{
    let result = recursive(chain, index);
    finish(ComposeStrategy::Recursive, chain.len(), index, result)
}

/// Composes a whole chain with the iterative fold.
///
/// Behaves exactly like [`compose`] but uses constant stack depth.
///
/// # Errors
///
/// Same as [`compose`].
pub fn compose_iter<F, U>(chain: &[Element<F, U>]) -> ChainResult<F>
where
    U: Into<F>,
{
    compose_iter_at(chain, 0)
}

/// Composes the chain starting at `index` with the iterative fold.
///
/// # Errors
///
/// Same as [`compose_at`].
pub fn compose_iter_at<F, U>(chain: &[Element<F, U>], index: usize) -> ChainResult<F>
where
    U: Into<F>,
{
    let result = fold(chain, index);
    finish(ComposeStrategy::Iterative, chain.len(), index, result)
}

/// Logs and records the outcome of a top-level composition.
pub(crate) fn finish<F>(
    strategy: ComposeStrategy,
    len: usize,
    index: usize,
    result: ChainResult<F>,
) -> ChainResult<F> {
    match &result {
        Ok(_) => {
            let composed = len - index;
            debug!(
                chain_len = len,
                start = index,
                strategy = strategy.as_str(),
                "composed chain"
            );
            metrics::record_composition(strategy, composed);
        }
        Err(error) => {
            warn!(
                chain_len = len,
                start = index,
                strategy = strategy.as_str(),
                error = %error,
                "chain composition failed"
            );
            metrics::record_error(error);
        }
    }
    result
}

pub(crate) fn recursive<F, U>(chain: &[Element<F, U>], index: usize) -> ChainResult<F>
where
    U: Into<F>,
{
    let Some(current) = chain.get(index) else {
        return Err(ChainError::invalid_chain(index));
    };

    if is_last(chain.len(), index) {
        return as_terminal(current, index);
    }

    // The continuation is built before this element is touched, so the
    // deepest problem is the one reported.
    let next = recursive(chain, index + 1)?;
    as_link(current, index, next)
}

pub(crate) fn fold<F, U>(chain: &[Element<F, U>], index: usize) -> ChainResult<F>
where
    U: Into<F>,
{
    if index >= chain.len() {
        return Err(ChainError::invalid_chain(index));
    }

    let last = chain.len() - 1;
    let mut next = as_terminal(&chain[last], last)?;
    for position in (index..last).rev() {
        next = as_link(&chain[position], position, next)?;
    }
    Ok(next)
}

fn as_terminal<F, U>(element: &Element<F, U>, index: usize) -> ChainResult<F>
where
    U: Into<F>,
{
    match element {
        Element::Terminal(terminal) => {
            trace!(index, role = "terminal", name = ?terminal.name(), "composing element");
            Ok(terminal.make().into())
        }
        Element::Link(_) => Err(ChainError::role_mismatch(index, Role::Terminal, Role::Link)),
    }
}

fn as_link<F, U>(element: &Element<F, U>, index: usize, next: F) -> ChainResult<F> {
    match element {
        Element::Link(link) => {
            trace!(index, role = "link", name = ?link.name(), "composing element");
            Ok(link.wrap(next))
        }
        Element::Terminal(_) => Err(ChainError::role_mismatch(index, Role::Link, Role::Terminal)),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    type Depth = fn() -> usize;

    fn shaped(roles: &[Role]) -> Vec<Element<Depth>> {
        roles
            .iter()
            .map(|role| match role {
                Role::Link => Element::link(|next: Depth| next),
                Role::Terminal => Element::terminal(|| -> Depth { || 0 }),
            })
            .collect()
    }

    fn role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Link), Just(Role::Terminal)]
    }

    proptest! {
        #[test]
        fn is_last_matches_length(len in 0usize..64, index in 0usize..64) {
            prop_assert_eq!(is_last(len, index), index + 1 == len);
        }

        #[test]
        fn recursion_and_fold_report_the_same_error(
            roles in prop::collection::vec(role(), 0..16),
            start in 0usize..18,
        ) {
            let chain = shaped(&roles);
            prop_assert_eq!(
                recursive(&chain, start).err(),
                fold(&chain, start).err()
            );
        }

        #[test]
        fn well_formed_chains_always_compose(links in 0usize..32, start in 0usize..32) {
            prop_assume!(start <= links);
            let mut roles = vec![Role::Link; links];
            roles.push(Role::Terminal);
            let chain = shaped(&roles);

            prop_assert!(compose_at(&chain, start).is_ok());
            prop_assert!(compose_iter_at(&chain, start).is_ok());
        }
    }
}
