//! Chain containers.
//!
//! [`Chain`] is a plain ordered container of [`Element`]s. It performs no
//! validation on construction: an empty chain, or one with elements in the
//! wrong positions, can be built and is only rejected when composed. This
//! keeps dynamically assembled chains (from plugin lists, configuration and
//! the like) on the same footing as hand-written ones.
//!
//! [`ChainBuilder`] is the statically checked alternative: any number of
//! links followed by exactly one terminal.

use crate::compose::{compose_at, compose_iter_at};
use crate::composer::Composer;
use crate::element::{Element, Link, Role, Terminal};
use crate::error::ChainResult;
use std::fmt;

/// An ordered sequence of links ended by a terminal.
///
/// `F` is the links' callable type, `U` the terminal's (defaults to `F`).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use catena_core::{Chain, ChainError};
///
/// type Step = Arc<dyn Fn() -> String + Send + Sync>;
///
/// let mut chain: Chain<Step> = Chain::new();
/// assert_eq!(chain.compose().err(), Some(ChainError::InvalidChain { index: 0 }));
///
/// chain.push_link(|next: Step| -> Step { Arc::new(move || format!("hi {}", next())) });
/// chain.push_terminal(|| -> Step { Arc::new(|| "there".to_string()) });
/// assert_eq!(chain.compose().unwrap()(), "hi there");
/// ```
pub struct Chain<F, U = F> {
    elements: Vec<Element<F, U>>,
}

impl<F> Chain<F> {
    /// Starts a statically well-formed chain.
    #[must_use]
    pub fn builder() -> ChainBuilder<F> {
        ChainBuilder::new()
    }
}

impl<F, U> Chain<F, U> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty chain with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Appends an element.
    pub fn push(&mut self, element: impl Into<Element<F, U>>) {
        self.elements.push(element.into());
    }

    /// Appends a link built from `wrap`.
    pub fn push_link<W>(&mut self, wrap: W)
    where
        W: Fn(F) -> F + Send + Sync + 'static,
    {
        self.elements.push(Element::link(wrap));
    }

    /// Appends a terminal built from `make`.
    pub fn push_terminal<M>(&mut self, make: M)
    where
        M: Fn() -> U + Send + Sync + 'static,
    {
        self.elements.push(Element::terminal(make));
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the chain has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the elements in order.
    pub fn elements(&self) -> &[Element<F, U>] {
        &self.elements
    }

    /// Returns the role of each element, in order.
    pub fn roles(&self) -> Vec<Role> {
        self.elements.iter().map(Element::role).collect()
    }

    /// Composes the chain recursively from position 0.
    ///
    /// # Errors
    ///
    /// See [`compose`](crate::compose).
    pub fn compose(&self) -> ChainResult<F>
    where
        U: Into<F>,
    {
        compose_at(&self.elements, 0)
    }

    /// Composes the chain recursively from `index`.
    ///
    /// # Errors
    ///
    /// See [`compose_at`](crate::compose_at).
    pub fn compose_at(&self, index: usize) -> ChainResult<F>
    where
        U: Into<F>,
    {
        compose_at(&self.elements, index)
    }

    /// Composes the chain with the iterative fold.
    ///
    /// # Errors
    ///
    /// See [`compose_iter`](crate::compose_iter).
    pub fn compose_iter(&self) -> ChainResult<F>
    where
        U: Into<F>,
    {
        compose_iter_at(&self.elements, 0)
    }

    /// Composes the chain with the given composer.
    ///
    /// # Errors
    ///
    /// See [`Composer::compose`].
    pub fn compose_with(&self, composer: &Composer) -> ChainResult<F>
    where
        U: Into<F>,
    {
        composer.compose(&self.elements)
    }
}

impl<F, U> Default for Chain<F, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, U> fmt::Debug for Chain<F, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.elements).finish()
    }
}

impl<F, U> AsRef<[Element<F, U>]> for Chain<F, U> {
    fn as_ref(&self) -> &[Element<F, U>] {
        &self.elements
    }
}

impl<F, U> From<Vec<Element<F, U>>> for Chain<F, U> {
    fn from(elements: Vec<Element<F, U>>) -> Self {
        Self { elements }
    }
}

impl<F, U> FromIterator<Element<F, U>> for Chain<F, U> {
    fn from_iter<I: IntoIterator<Item = Element<F, U>>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<F, U> Extend<Element<F, U>> for Chain<F, U> {
    fn extend<I: IntoIterator<Item = Element<F, U>>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<F, U> IntoIterator for Chain<F, U> {
    type Item = Element<F, U>;
    type IntoIter = std::vec::IntoIter<Element<F, U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Builds a chain whose shape is fixed by the type system.
///
/// Links are collected first; [`terminal`](Self::terminal) appends the single
/// terminal and yields the finished [`Chain`]. A builder cannot produce an
/// empty chain or place a terminal anywhere but last.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use catena_core::{Chain, Link};
///
/// type Step = Arc<dyn Fn(Vec<&'static str>) -> Vec<&'static str> + Send + Sync>;
///
/// fn tag(name: &'static str) -> Link<Step> {
///     Link::named(name, move |next: Step| -> Step {
///         Arc::new(move |mut seen: Vec<&'static str>| {
///             seen.push(name);
///             next(seen)
///         })
///     })
/// }
///
/// let chain = Chain::builder()
///     .push(tag("a"))
///     .push(tag("b"))
///     .terminal(|| -> Step { Arc::new(|seen: Vec<&'static str>| seen) });
///
/// assert_eq!(chain.len(), 3);
/// assert_eq!(chain.compose().unwrap()(Vec::new()), ["a", "b"]);
/// ```
pub struct ChainBuilder<F> {
    links: Vec<Link<F>>,
}

impl<F> ChainBuilder<F> {
    /// Creates a builder with no links.
    #[must_use]
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Appends a link built from `wrap`.
    #[must_use]
    pub fn link<W>(self, wrap: W) -> Self
    where
        W: Fn(F) -> F + Send + Sync + 'static,
    {
        self.push(Link::new(wrap))
    }

    /// Appends an already constructed link.
    #[must_use]
    pub fn push(mut self, link: Link<F>) -> Self {
        self.links.push(link);
        self
    }

    /// Returns the number of links collected so far.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if no links have been added.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Ends the chain with a terminal built from `make`.
    pub fn terminal<U, M>(self, make: M) -> Chain<F, U>
    where
        M: Fn() -> U + Send + Sync + 'static,
    {
        self.terminate(Terminal::new(make))
    }

    /// Ends the chain with an already constructed terminal.
    pub fn terminate<U>(self, terminal: Terminal<U>) -> Chain<F, U> {
        let mut elements: Vec<Element<F, U>> = Vec::with_capacity(self.links.len() + 1);
        elements.extend(self.links.into_iter().map(Element::Link));
        elements.push(Element::Terminal(terminal));
        Chain { elements }
    }
}

impl<F> Default for ChainBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for ChainBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("links", &self.links)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::ComposerConfig;
    use crate::error::ChainError;
    use std::sync::Arc;

    type Step = Arc<dyn Fn() -> String + Send + Sync>;

    #[test]
    fn test_new_chain_is_empty() {
        let chain: Chain<Step> = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.compose().err(), Some(ChainError::invalid_chain(0)));
    }

    #[test]
    fn test_builder_places_terminal_last() {
        let chain: Chain<Step> = Chain::builder()
            .link(|next: Step| next)
            .link(|next: Step| next)
            .terminal(|| -> Step { Arc::new(|| "done".to_string()) });

        assert_eq!(chain.roles(), [Role::Link, Role::Link, Role::Terminal]);
        assert_eq!(chain.compose().unwrap()(), "done");
    }

    #[test]
    fn test_builder_with_only_terminal() {
        let builder: ChainBuilder<Step> = ChainBuilder::new();
        assert!(builder.is_empty());

        let chain = builder.terminal(|| -> Step { Arc::new(|| "solo".to_string()) });
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.compose_iter().unwrap()(), "solo");
    }

    #[test]
    fn test_dynamic_chain_is_not_validated_on_construction() {
        let chain: Chain<Step> = vec![
            Element::terminal(|| -> Step { Arc::new(String::new) }),
            Element::link(|next: Step| next),
        ]
        .into();

        assert_eq!(chain.roles(), [Role::Terminal, Role::Link]);
        assert_eq!(
            chain.compose().err(),
            Some(ChainError::role_mismatch(1, Role::Terminal, Role::Link))
        );
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut chain: Chain<Step> = (0..2).map(|_| Element::link(|next: Step| next)).collect();
        chain.extend([Element::terminal(|| -> Step { Arc::new(|| "x".to_string()) })]);

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.as_ref().len(), 3);
        assert_eq!(chain.compose_at(1).unwrap()(), "x");
        assert_eq!(chain.into_iter().count(), 3);
    }

    #[test]
    fn test_compose_with_composer() {
        let chain: Chain<Step> = Chain::builder()
            .link(|next: Step| -> Step { Arc::new(move || format!("<{}>", next())) })
            .terminal(|| -> Step { Arc::new(|| "body".to_string()) });

        let composer = Composer::new(ComposerConfig::iterative());
        assert_eq!(chain.compose_with(&composer).unwrap()(), "<body>");
    }

    #[test]
    fn test_debug_lists_elements() {
        let mut chain: Chain<Step> = Chain::with_capacity(1);
        chain.push(Link::named("first", |next: Step| next));
        let rendered = format!("{chain:?}");
        assert!(rendered.contains("first"));
    }
}
