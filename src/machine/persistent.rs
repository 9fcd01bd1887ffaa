//! Persistent state machine: every transition yields a new snapshot.

use crate::builder::{BuildError, GraphBuilder, Overrides};
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{CurrentState, Event, History, SideEffect, State};
use crate::graph::Graph;
use crate::machine::error::TransitionError;
use crate::machine::resolver;
use crate::machine::transition::Transition;
use std::sync::Arc;
use tracing::debug;

/// Immutable machine snapshot.
///
/// `transition` never mutates `self`; it returns the successor snapshot with
/// the transition record. Snapshots share their graph, so cloning is cheap.
///
/// Listeners invoked during a transition receive no handle to the machine,
/// and each call produces an independent snapshot, so there is no
/// reentrancy guard: a listener that drives some other snapshot simply
/// produces its own successor.
pub struct StateMachine<S: State, E: Event, F: SideEffect> {
    graph: Arc<Graph<S, E, F>>,
    current: CurrentState<S>,
}

impl<S: State, E: Event, F: SideEffect> StateMachine<S, E, F> {
    /// Build the graph and create a machine at its initial state.
    pub fn create(builder: GraphBuilder<S, E, F>) -> Result<Self, BuildError> {
        Ok(Self::new(builder.build()?))
    }

    /// Create a machine at the initial state of `graph`.
    pub fn new(graph: Graph<S, E, F>) -> Self {
        let current = graph.initial_position();
        Self {
            graph: Arc::new(graph),
            current,
        }
    }

    /// Get current state (pure)
    pub fn state(&self) -> &S {
        self.current.state()
    }

    /// Get current state together with history (pure)
    pub fn current_state(&self) -> &CurrentState<S> {
        &self.current
    }

    pub fn history(&self) -> &History<S> {
        self.current.history()
    }

    pub fn graph(&self) -> &Graph<S, E, F> {
        &self.graph
    }

    /// Apply `event`, returning the successor snapshot and the transition
    /// record.
    ///
    /// On an invalid transition the successor is an unchanged copy of this
    /// snapshot. Global listeners are notified once, in registration order,
    /// for both outcomes. Errors abort before any notification.
    pub fn transition(&self, event: E) -> Result<(Self, Transition<S, E, F>), TransitionError> {
        let resolution = resolver::resolve(&self.graph, &self.current, event)?;

        let next = match &resolution.transition {
            Transition::Valid {
                from_state,
                to_state,
                side_effects,
                ..
            } => {
                debug!(
                    from = ?from_state,
                    to = ?to_state,
                    side_effects = side_effects.len(),
                    "transition applied"
                );
                Self {
                    graph: Arc::clone(&self.graph),
                    current: CurrentState::new(to_state.clone(), resolution.history),
                }
            }
            Transition::Invalid { from_state, event } => {
                debug!(from = ?from_state, event = ?event, "invalid transition");
                self.clone()
            }
        };

        for listener in self.graph.listeners() {
            listener(&resolution.transition);
        }

        Ok((next, resolution.transition))
    }

    /// A machine reusing this machine's declarations with `overrides`
    /// applied, positioned at the overridden initial state.
    pub fn with(&self, overrides: Overrides<S, E, F>) -> Result<Self, BuildError> {
        Ok(Self::new(self.graph.with(overrides)?))
    }

    /// Capture the current position.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint::capture(&self.current)
    }

    /// A machine reusing this machine's declarations, positioned where
    /// `checkpoint` was taken.
    pub fn resume(&self, checkpoint: &Checkpoint<S>) -> Result<Self, CheckpointError> {
        let overrides = checkpoint.overrides()?;
        self.with(overrides)
            .map_err(|e| CheckpointError::ValidationFailed(e.to_string()))
    }
}

impl<S: State, E: Event, F: SideEffect> Clone for StateMachine<S, E, F> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            current: self.current.clone(),
        }
    }
}

impl<S: State, E: Event, F: SideEffect> std::fmt::Debug for StateMachine<S, E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
