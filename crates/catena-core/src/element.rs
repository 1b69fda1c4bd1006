//! Chain elements: links and terminals.
//!
//! A chain is a sequence of [`Element`]s. Every element but the last is a
//! [`Link`], a factory that receives the continuation (the composed rest of
//! the chain) and returns the callable for its own position. The last element
//! is a [`Terminal`], a zero-argument factory for the final callable.
//!
//! The callable type `F` is chosen by the caller and never inspected. Any
//! arity, any return type, synchronous or future-returning:
//!
//! ```
//! use std::sync::Arc;
//! use catena_core::{Link, Terminal};
//!
//! type Step = Arc<dyn Fn(u32) -> u32 + Send + Sync>;
//!
//! let double: Link<Step> = Link::new(|next: Step| -> Step {
//!     Arc::new(move |n: u32| next(n * 2))
//! });
//! let identity: Terminal<Step> = Terminal::new(|| -> Step { Arc::new(|n: u32| n) });
//!
//! let composed = double.wrap(identity.make());
//! assert_eq!(composed(21), 42);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role an element plays in a chain.
///
/// Roles are dictated by position: the last element is composed as a
/// terminal, every other one as a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Receives a continuation and wraps it.
    Link,
    /// Produces the final callable, receives no continuation.
    Terminal,
}

impl Role {
    /// Returns the lowercase role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-terminal chain step.
///
/// Given the continuation `next`, returns the callable for this position. The
/// returned callable decides at invocation time whether to call `next`:
/// zero times short-circuits the rest of the chain.
pub struct Link<F> {
    name: Option<&'static str>,
    wrap: Box<dyn Fn(F) -> F + Send + Sync>,
}

impl<F> Link<F> {
    /// Creates an unnamed link.
    pub fn new<W>(wrap: W) -> Self
    where
        W: Fn(F) -> F + Send + Sync + 'static,
    {
        Self {
            name: None,
            wrap: Box::new(wrap),
        }
    }

    /// Creates a link with a name used in log output.
    pub fn named<W>(name: &'static str, wrap: W) -> Self
    where
        W: Fn(F) -> F + Send + Sync + 'static,
    {
        Self {
            name: Some(name),
            wrap: Box::new(wrap),
        }
    }

    /// Returns the link name, if any.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Wraps the continuation, producing this position's callable.
    pub fn wrap(&self, next: F) -> F {
        (self.wrap)(next)
    }
}

impl<F> fmt::Debug for Link<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The final chain step.
///
/// A zero-argument factory for the callable that ends the chain.
pub struct Terminal<U> {
    name: Option<&'static str>,
    make: Box<dyn Fn() -> U + Send + Sync>,
}

impl<U> Terminal<U> {
    /// Creates an unnamed terminal.
    pub fn new<M>(make: M) -> Self
    where
        M: Fn() -> U + Send + Sync + 'static,
    {
        Self {
            name: None,
            make: Box::new(make),
        }
    }

    /// Creates a terminal with a name used in log output.
    pub fn named<M>(name: &'static str, make: M) -> Self
    where
        M: Fn() -> U + Send + Sync + 'static,
    {
        Self {
            name: Some(name),
            make: Box::new(make),
        }
    }

    /// Returns the terminal name, if any.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Produces the final callable.
    pub fn make(&self) -> U {
        (self.make)()
    }
}

impl<U> fmt::Debug for Terminal<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One position in a chain.
///
/// `F` is the calling convention shared by links; `U` is the terminal's
/// callable type, which defaults to `F` and must convert into it.
pub enum Element<F, U = F> {
    /// A continuation-wrapping step.
    Link(Link<F>),
    /// The chain's final step.
    Terminal(Terminal<U>),
}

impl<F, U> Element<F, U> {
    /// Shorthand for `Element::Link(Link::new(wrap))`.
    pub fn link<W>(wrap: W) -> Self
    where
        W: Fn(F) -> F + Send + Sync + 'static,
    {
        Self::Link(Link::new(wrap))
    }

    /// Shorthand for `Element::Terminal(Terminal::new(make))`.
    pub fn terminal<M>(make: M) -> Self
    where
        M: Fn() -> U + Send + Sync + 'static,
    {
        Self::Terminal(Terminal::new(make))
    }

    /// Returns the role this element was built for.
    pub const fn role(&self) -> Role {
        match self {
            Self::Link(_) => Role::Link,
            Self::Terminal(_) => Role::Terminal,
        }
    }

    /// Returns the element name, if any.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Link(link) => link.name(),
            Self::Terminal(terminal) => terminal.name(),
        }
    }
}

impl<F, U> fmt::Debug for Element<F, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(link) => f.debug_tuple("Link").field(link).finish(),
            Self::Terminal(terminal) => f.debug_tuple("Terminal").field(terminal).finish(),
        }
    }
}

impl<F, U> From<Link<F>> for Element<F, U> {
    fn from(link: Link<F>) -> Self {
        Self::Link(link)
    }
}

impl<F, U> From<Terminal<U>> for Element<F, U> {
    fn from(terminal: Terminal<U>) -> Self {
        Self::Terminal(terminal)
    }
}
