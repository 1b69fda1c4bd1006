//! # Catena Core
//!
//! Continuation-passing chain composition.
//!
//! A chain is an ordered list of *links* ended by a single *terminal*. Each
//! link receives the rest of the chain as a continuation and returns its own
//! callable; when that callable runs it decides whether to call the
//! continuation. Composition turns the whole list into one callable that
//! starts at the first link.
//!
//! ```text
//! compose([L1, L2, T])  =  L1(L2(T()))
//!
//! call → L1 ─next()→ L2 ─next()→ T
//!         │           │
//!         └ may stop  └ may stop
//! ```
//!
//! This crate provides:
//!
//! - [`Link`], [`Terminal`], [`Element`] - The chain building blocks
//! - [`Chain`] and [`ChainBuilder`] - Dynamic and statically shaped containers
//! - [`compose`], [`compose_at`], [`compose_iter`] - The composition algorithms
//! - [`Composer`] - Strategy selection driven by [`ComposerConfig`]
//! - [`ChainError`] - The composition error type
//!
//! The callable type is entirely up to the caller. Links can return futures;
//! the composed callable then returns the first link's future untouched:
//!
//! ```
//! use std::sync::Arc;
//! use catena_core::{compose, BoxFuture, Element};
//!
//! type Step = Arc<dyn Fn(u32) -> BoxFuture<'static, u32> + Send + Sync>;
//!
//! let chain: Vec<Element<Step>> = vec![
//!     Element::link(|next: Step| -> Step {
//!         Arc::new(move |n: u32| -> BoxFuture<'static, u32> {
//!             let next = Arc::clone(&next);
//!             Box::pin(async move { next(n + 1).await })
//!         })
//!     }),
//!     Element::terminal(|| -> Step {
//!         Arc::new(|n: u32| -> BoxFuture<'static, u32> { Box::pin(async move { n * 2 }) })
//!     }),
//! ];
//!
//! let run = compose(&chain).unwrap();
//! let _pending = run(20); // resolves to 42 when awaited
//! ```

#![doc(html_root_url = "https://docs.rs/catena-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chain;
mod compose;
mod composer;
mod element;
mod error;
pub mod metrics;

use std::future::Future;
use std::pin::Pin;

pub use chain::{Chain, ChainBuilder};
pub use compose::{compose, compose_at, compose_iter, compose_iter_at, is_last};
pub use composer::{ComposeStrategy, Composer, ComposerConfig, DEFAULT_RECURSION_LIMIT};
pub use element::{Element, Link, Role, Terminal};
pub use error::{ChainError, ChainResult};

/// A boxed, sendable future.
///
/// Convenient as the return type of asynchronous chain callables.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
