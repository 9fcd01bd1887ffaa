//! Per-state declarations: transition rules, listeners and group defaults.

use super::outcome::Outcome;
use crate::core::{Event, Matcher, SideEffect, State};
use std::fmt;
use std::sync::Arc;

/// Evaluates a matched event against the current state.
pub type Rule<S, E, F> = Arc<dyn Fn(&S, &E) -> Outcome<S, F> + Send + Sync>;

/// Enter or exit listener. Receives the state being entered (or exited) and
/// the triggering event, and returns the side effects to emit.
pub type Listener<S, E, F> = Arc<dyn Fn(&S, &E) -> Vec<F> + Send + Sync>;

/// Supplies the initial substate of a group entered without history.
pub type DefaultState<S> = Arc<dyn Fn() -> S + Send + Sync>;

/// Declaration of one state, or of one group of states.
pub struct StateDefinition<S: State, E: Event, F: SideEffect> {
    pub(crate) matcher: Matcher<S>,
    pub(crate) rules: Vec<(Matcher<E>, Rule<S, E, F>)>,
    pub(crate) on_enter: Vec<Listener<S, E, F>>,
    pub(crate) on_exit: Vec<Listener<S, E, F>>,
    pub(crate) default_state: Option<DefaultState<S>>,
}

impl<S: State, E: Event, F: SideEffect> StateDefinition<S, E, F> {
    pub(crate) fn new(matcher: Matcher<S>) -> Self {
        Self {
            matcher,
            rules: Vec::new(),
            on_enter: Vec::new(),
            on_exit: Vec::new(),
            default_state: None,
        }
    }

    /// The tag this definition is declared for.
    pub fn tag(&self) -> S::Tag {
        self.matcher.tag()
    }

    pub fn matcher(&self) -> &Matcher<S> {
        &self.matcher
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// First rule, in declaration order, whose matcher accepts `event`.
    pub fn find_rule(&self, event: &E) -> Option<&Rule<S, E, F>> {
        self.rules
            .iter()
            .find(|(matcher, _)| matcher.matches(event))
            .map(|(_, rule)| rule)
    }

    /// Side effects of every enter listener, in attachment order.
    pub fn enter_effects(&self, state: &S, event: &E) -> Vec<F> {
        self.on_enter
            .iter()
            .flat_map(|listener| listener(state, event))
            .collect()
    }

    /// Side effects of every exit listener, in attachment order.
    pub fn exit_effects(&self, state: &S, event: &E) -> Vec<F> {
        self.on_exit
            .iter()
            .flat_map(|listener| listener(state, event))
            .collect()
    }

    pub fn has_default_state(&self) -> bool {
        self.default_state.is_some()
    }

    /// Evaluate the default-state supplier, if one was declared.
    pub fn default_state(&self) -> Option<S> {
        self.default_state.as_ref().map(|supplier| supplier())
    }
}

impl<S: State, E: Event, F: SideEffect> fmt::Debug for StateDefinition<S, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("matcher", &self.matcher)
            .field("rules", &self.rules.len())
            .field("on_enter", &self.on_enter.len())
            .field("on_exit", &self.on_exit.len())
            .field("default_state", &self.default_state.is_some())
            .finish()
    }
}
