//! Builder for a single state (or group) definition.

use crate::core::{Event, Matcher, SideEffect, State};
use crate::graph::{Outcome, StateDefinition};
use std::sync::Arc;

/// Fluent builder for one [`StateDefinition`].
///
/// Obtained through [`GraphBuilder::state`](super::GraphBuilder::state),
/// [`GraphBuilder::state_matching`](super::GraphBuilder::state_matching) or
/// [`GraphBuilder::group`](super::GraphBuilder::group).
pub struct DefinitionBuilder<S: State, E: Event, F: SideEffect> {
    definition: StateDefinition<S, E, F>,
    parent: Option<S::Tag>,
}

impl<S: State, E: Event, F: SideEffect> DefinitionBuilder<S, E, F> {
    pub(crate) fn new(matcher: Matcher<S>) -> Self {
        Self {
            definition: StateDefinition::new(matcher),
            parent: None,
        }
    }

    /// Add a transition rule applied when `matcher` accepts the event.
    ///
    /// Rules are tried in the order they are added; the first match wins.
    pub fn on<R>(mut self, matcher: Matcher<E>, rule: R) -> Self
    where
        R: Fn(&S, &E) -> Outcome<S, F> + Send + Sync + 'static,
    {
        self.definition.rules.push((matcher, Arc::new(rule)));
        self
    }

    /// Add a transition rule for every event of variant `tag`.
    pub fn on_event<R>(self, tag: E::Tag, rule: R) -> Self
    where
        R: Fn(&S, &E) -> Outcome<S, F> + Send + Sync + 'static,
    {
        self.on(Matcher::any(tag), rule)
    }

    /// Add a listener fired when this definition is entered.
    pub fn on_enter<L>(mut self, listener: L) -> Self
    where
        L: Fn(&S, &E) -> Vec<F> + Send + Sync + 'static,
    {
        self.definition.on_enter.push(Arc::new(listener));
        self
    }

    /// Add a listener fired when this definition is exited.
    pub fn on_exit<L>(mut self, listener: L) -> Self
    where
        L: Fn(&S, &E) -> Vec<F> + Send + Sync + 'static,
    {
        self.definition.on_exit.push(Arc::new(listener));
        self
    }

    /// Place this definition's tag under the group `parent`.
    pub fn child_of(mut self, parent: S::Tag) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Substate entered when a transition targets this group and no history
    /// has been recorded for it. Only valid on groups.
    pub fn default_state<D>(mut self, supplier: D) -> Self
    where
        D: Fn() -> S + Send + Sync + 'static,
    {
        self.definition.default_state = Some(Arc::new(supplier));
        self
    }

    pub(crate) fn finish(self) -> (StateDefinition<S, E, F>, Option<S::Tag>) {
        (self.definition, self.parent)
    }
}
