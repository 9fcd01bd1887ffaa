//! Group history tracking.
//!
//! History remembers, per abstract group, the last concrete state that was
//! active inside it. It is immutable: updates return a new value, so
//! successive machine snapshots never alias each other's history.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Last visited concrete substate per group tag.
///
/// # Example
///
/// ```rust
/// use cascade::core::{History, Variant};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Tag {
///     Active,
///     Playing,
///     Paused,
/// }
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Player {
///     Playing,
///     Paused,
/// }
///
/// impl Variant for Player {
///     type Tag = Tag;
///
///     fn tag(&self) -> Tag {
///         match self {
///             Self::Playing => Tag::Playing,
///             Self::Paused => Tag::Paused,
///         }
///     }
/// }
///
/// let history = History::new();
/// let updated = history.record(Tag::Active, Player::Paused);
///
/// assert_eq!(updated.get(Tag::Active), Some(&Player::Paused));
/// assert!(history.is_empty()); // Original unchanged
///
/// let cleared = updated.forget([Tag::Active]);
/// assert!(cleared.get(Tag::Active).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct History<S: State> {
    entries: HashMap<S::Tag, S>,
}

impl<S: State> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> History<S> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The remembered substate of `group`, if any.
    pub fn get(&self, group: S::Tag) -> Option<&S> {
        self.entries.get(&group)
    }

    /// Record `state` as the last substate of `group`, returning a new history.
    ///
    /// An existing entry for `group` is replaced.
    pub fn record(&self, group: S::Tag, state: S) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(group, state);
        Self { entries }
    }

    /// Remove the entries of every group in `groups`, returning a new history.
    pub fn forget<I>(&self, groups: I) -> Self
    where
        I: IntoIterator<Item = S::Tag>,
    {
        let mut entries = self.entries.clone();
        for group in groups {
            entries.remove(&group);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(group, state)` entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (S::Tag, &S)> + '_ {
        self.entries.iter().map(|(group, state)| (*group, state))
    }
}

/// A machine's position: the current concrete state plus its history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CurrentState<S: State> {
    state: S,
    history: History<S>,
}

impl<S: State> CurrentState<S> {
    pub fn new(state: S, history: History<S>) -> Self {
        Self { state, history }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    pub fn into_parts(self) -> (S, History<S>) {
        (self.state, self.history)
    }
}
