//! The static, immutable structure of a state machine.
//!
//! A `Graph` holds the initial state, seed history, hierarchy table, state
//! definitions and global transition listeners. It is built once by
//! [`GraphBuilder`](crate::builder::GraphBuilder) and shared by every machine
//! snapshot derived from it.

mod definition;
mod outcome;

pub use definition::{DefaultState, Listener, Rule, StateDefinition};
pub use outcome::{Outcome, Target};

use crate::builder::error::{BuildError, GraphIssue};
use crate::builder::validate;
use crate::builder::Overrides;
use crate::core::{CurrentState, Event, Hierarchy, History, SideEffect, State};
use crate::machine::Transition;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Global listener notified of every transition record, valid or invalid.
pub type TransitionListener<S, E, F> = Arc<dyn Fn(&Transition<S, E, F>) + Send + Sync>;

/// Immutable state graph.
pub struct Graph<S: State, E: Event, F: SideEffect> {
    initial: S,
    history: History<S>,
    hierarchy: Arc<Hierarchy<S::Tag>>,
    definitions: Arc<Vec<StateDefinition<S, E, F>>>,
    index: Arc<HashMap<S::Tag, Vec<usize>>>,
    listeners: Vec<TransitionListener<S, E, F>>,
}

impl<S: State, E: Event, F: SideEffect> Graph<S, E, F> {
    /// Assemble and validate a graph from builder parts.
    pub(crate) fn assemble(
        initial: S,
        history: History<S>,
        hierarchy: Hierarchy<S::Tag>,
        definitions: Vec<StateDefinition<S, E, F>>,
        listeners: Vec<TransitionListener<S, E, F>>,
        pending: Vec<GraphIssue>,
    ) -> Result<Self, BuildError> {
        let mut index: HashMap<S::Tag, Vec<usize>> = HashMap::new();
        for (position, definition) in definitions.iter().enumerate() {
            index.entry(definition.tag()).or_default().push(position);
        }

        let graph = Self {
            initial,
            history,
            hierarchy: Arc::new(hierarchy),
            definitions: Arc::new(definitions),
            index: Arc::new(index),
            listeners,
        };
        validate::validate(&graph, pending)?;
        Ok(graph)
    }

    /// Copy this graph with `overrides` applied, reusing every declaration.
    pub fn with(&self, overrides: Overrides<S, E, F>) -> Result<Self, BuildError> {
        let (initial, history, extra_listeners) = overrides.into_parts();
        let mut listeners = self.listeners.clone();
        listeners.extend(extra_listeners);

        let graph = Self {
            initial: initial.unwrap_or_else(|| self.initial.clone()),
            history: history.unwrap_or_else(|| self.history.clone()),
            hierarchy: Arc::clone(&self.hierarchy),
            definitions: Arc::clone(&self.definitions),
            index: Arc::clone(&self.index),
            listeners,
        };
        validate::validate(&graph, Vec::new())?;
        Ok(graph)
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn seed_history(&self) -> &History<S> {
        &self.history
    }

    /// The position a freshly created machine starts at.
    pub fn initial_position(&self) -> CurrentState<S> {
        CurrentState::new(self.initial.clone(), self.history.clone())
    }

    pub fn hierarchy(&self) -> &Hierarchy<S::Tag> {
        &self.hierarchy
    }

    pub fn is_group(&self, tag: S::Tag) -> bool {
        self.hierarchy.is_group(tag)
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> &[StateDefinition<S, E, F>] {
        &self.definitions
    }

    /// Definitions applying to `state`, most specific first.
    ///
    /// Walks the state's ancestor chain; at each level, definitions declared
    /// for that tag whose guards accept the state are included in declaration
    /// order. A value reporting a group tag is not a concrete state and has
    /// no definitions.
    pub fn definitions_for(&self, state: &S) -> Vec<&StateDefinition<S, E, F>> {
        self.definition_indices(state)
            .into_iter()
            .map(|position| &self.definitions[position])
            .collect()
    }

    pub(crate) fn definition_indices(&self, state: &S) -> Vec<usize> {
        let tag = state.tag();
        if self.hierarchy.is_group(tag) {
            return Vec::new();
        }

        self.hierarchy
            .chain(tag)
            .into_iter()
            .filter_map(|tag| self.index.get(&tag))
            .flatten()
            .copied()
            .filter(|&position| self.definitions[position].matcher().guards_hold(state))
            .collect()
    }

    pub(crate) fn definition(&self, position: usize) -> &StateDefinition<S, E, F> {
        &self.definitions[position]
    }

    /// Default substate of `group`, from the first definition of that group
    /// declaring one.
    pub fn group_default(&self, group: S::Tag) -> Option<S> {
        self.index
            .get(&group)?
            .iter()
            .map(|&position| &self.definitions[position])
            .find(|definition| definition.has_default_state())
            .and_then(StateDefinition::default_state)
    }

    pub fn listeners(&self) -> &[TransitionListener<S, E, F>] {
        &self.listeners
    }
}

impl<S: State, E: Event, F: SideEffect> Clone for Graph<S, E, F> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            history: self.history.clone(),
            hierarchy: Arc::clone(&self.hierarchy),
            definitions: Arc::clone(&self.definitions),
            index: Arc::clone(&self.index),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: State, E: Event, F: SideEffect> fmt::Debug for Graph<S, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("initial", &self.initial)
            .field("history", &self.history)
            .field("hierarchy", &self.hierarchy)
            .field("definitions", &self.definitions)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
