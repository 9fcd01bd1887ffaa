//! Overrides applied when deriving a machine from an existing graph.

use crate::core::{Event, History, SideEffect, State};
use crate::graph::TransitionListener;
use crate::machine::Transition;
use std::sync::Arc;

/// Changes applied on top of an existing graph by `with`.
///
/// Unset fields keep the original graph's values; listeners are appended
/// after the original ones.
pub struct Overrides<S: State, E: Event, F: SideEffect> {
    initial: Option<S>,
    history: Option<History<S>>,
    listeners: Vec<TransitionListener<S, E, F>>,
}

impl<S: State, E: Event, F: SideEffect> Overrides<S, E, F> {
    pub fn new() -> Self {
        Self {
            initial: None,
            history: None,
            listeners: Vec::new(),
        }
    }

    /// Start the derived machine at `state`.
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Seed the derived machine with `history`.
    pub fn history(mut self, history: History<S>) -> Self {
        self.history = Some(history);
        self
    }

    /// Append a global transition listener.
    pub fn on_transition<L>(mut self, listener: L) -> Self
    where
        L: Fn(&Transition<S, E, F>) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<S>,
        Option<History<S>>,
        Vec<TransitionListener<S, E, F>>,
    ) {
        (self.initial, self.history, self.listeners)
    }
}

impl<S: State, E: Event, F: SideEffect> Default for Overrides<S, E, F> {
    fn default() -> Self {
        Self::new()
    }
}
