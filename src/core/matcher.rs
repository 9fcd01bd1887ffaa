//! Predicate-based classifiers for events and states.

use super::guard::Guard;
use super::state::Variant;
use std::fmt;

/// Decides whether a value satisfies a rule's applicability condition.
///
/// A matcher accepts values of one variant tag, optionally narrowed by guards.
/// All guards must hold; they are evaluated in attachment order and stop at
/// the first one that fails.
///
/// # Example
///
/// ```rust
/// use cascade::core::{Matcher, Variant};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum CoinTag {
///     Insert,
///     Refund,
/// }
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Coin {
///     Insert(u32),
///     Refund,
/// }
///
/// impl Variant for Coin {
///     type Tag = CoinTag;
///
///     fn tag(&self) -> CoinTag {
///         match self {
///             Self::Insert(_) => CoinTag::Insert,
///             Self::Refund => CoinTag::Refund,
///         }
///     }
/// }
///
/// let large = Matcher::any(CoinTag::Insert)
///     .when(|c: &Coin| matches!(c, Coin::Insert(v) if *v >= 50));
///
/// assert!(large.matches(&Coin::Insert(50)));
/// assert!(!large.matches(&Coin::Insert(10)));
/// assert!(!large.matches(&Coin::Refund));
///
/// assert!(Matcher::eq(Coin::Refund).matches(&Coin::Refund));
/// ```
pub struct Matcher<T: Variant> {
    tag: T::Tag,
    guards: Vec<Guard<T>>,
}

impl<T: Variant> Matcher<T> {
    /// Match any value of variant `tag`.
    pub fn any(tag: T::Tag) -> Self {
        Self {
            tag,
            guards: Vec::new(),
        }
    }

    /// Match values of the same variant that are equal to `value`.
    pub fn eq(value: T) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Self::any(value.tag()).when(move |candidate: &T| *candidate == value)
    }

    /// Narrow the matcher with an additional predicate.
    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.guards.push(Guard::new(predicate));
        self
    }

    /// The variant tag this matcher is declared for.
    pub fn tag(&self) -> T::Tag {
        self.tag
    }

    /// Check the tag and every guard against `value`.
    pub fn matches(&self, value: &T) -> bool {
        value.tag() == self.tag && self.guards_hold(value)
    }

    /// Check only the guards. Used when the tag is known to apply through
    /// the hierarchy rather than by equality.
    pub(crate) fn guards_hold(&self, value: &T) -> bool {
        self.guards.iter().all(|guard| guard.check(value))
    }
}

impl<T: Variant> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag,
            guards: self.guards.clone(),
        }
    }
}

impl<T: Variant> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("tag", &self.tag)
            .field("guards", &self.guards.len())
            .finish()
    }
}
