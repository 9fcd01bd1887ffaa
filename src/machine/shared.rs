//! Shared state machine: a single state cell mutated in place.

use crate::builder::{BuildError, GraphBuilder, Overrides};
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{CurrentState, Event, History, SideEffect, State};
use crate::graph::Graph;
use crate::machine::error::TransitionError;
use crate::machine::observer::{Observers, TransitionObserver};
use crate::machine::resolver;
use crate::machine::transition::Transition;
use parking_lot::{Mutex, ReentrantMutex};
use std::cell::RefCell;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, warn};

/// Removes the calling thread from the in-progress set when its transition
/// ends, including on an early error return.
struct InProgress<'a> {
    active: &'a Mutex<Vec<ThreadId>>,
    thread: ThreadId,
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        let thread = self.thread;
        self.active.lock().retain(|&active| active != thread);
    }
}

/// Machine whose state is mutated in place and can be shared across threads.
///
/// Resolving an event and committing the successor state happen under one
/// lock, so calls from different threads are serialized. Listener and
/// observer notification runs after the lock is released: a listener may
/// hand work to another thread that transitions this machine.
///
/// Threads with a transition in progress are tracked by id. A nested
/// `transition` on the same thread, made from an enter/exit listener, a
/// global listener or an observer, fails with
/// [`TransitionError::Recursion`]; the outer transition still completes and
/// notifies.
pub struct SharedStateMachine<S: State, E: Event, F: SideEffect> {
    graph: Arc<Graph<S, E, F>>,
    // Reentrant so enter/exit listeners may read the state during resolution.
    cell: ReentrantMutex<RefCell<CurrentState<S>>>,
    active: Mutex<Vec<ThreadId>>,
    observers: Observers<S, E, F>,
}

impl<S: State, E: Event, F: SideEffect> SharedStateMachine<S, E, F> {
    /// Build the graph and create a machine at its initial state.
    pub fn create(builder: GraphBuilder<S, E, F>) -> Result<Self, BuildError> {
        Ok(Self::new(builder.build()?))
    }

    /// Create a machine at the initial state of `graph`.
    pub fn new(graph: Graph<S, E, F>) -> Self {
        let current = graph.initial_position();
        Self {
            graph: Arc::new(graph),
            cell: ReentrantMutex::new(RefCell::new(current)),
            active: Mutex::new(Vec::new()),
            observers: Observers::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> S {
        self.current_state().state().clone()
    }

    /// Current state together with history.
    pub fn current_state(&self) -> CurrentState<S> {
        self.cell.lock().borrow().clone()
    }

    pub fn history(&self) -> History<S> {
        self.current_state().history().clone()
    }

    pub fn graph(&self) -> &Graph<S, E, F> {
        &self.graph
    }

    /// Apply `event` in place and return the transition record.
    ///
    /// Global listeners, then live observers, are notified once each, in
    /// registration order, for valid and invalid outcomes alike.
    pub fn transition(&self, event: E) -> Result<Transition<S, E, F>, TransitionError> {
        let thread = thread::current().id();
        {
            let mut active = self.active.lock();
            if active.contains(&thread) {
                warn!(event = ?event, "rejected recursive transition");
                return Err(TransitionError::Recursion);
            }
            active.push(thread);
        }
        let _in_progress = InProgress {
            active: &self.active,
            thread,
        };

        let transition = self.apply(event)?;
        self.notify(&transition);
        Ok(transition)
    }

    /// Resolve `event` against the current position and commit the result,
    /// holding the state lock throughout.
    fn apply(&self, event: E) -> Result<Transition<S, E, F>, TransitionError> {
        let guard = self.cell.lock();
        let current = guard.borrow().clone();
        let resolution = resolver::resolve(&self.graph, &current, event)?;

        match &resolution.transition {
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
                *guard.borrow_mut() = CurrentState::new(to_state.clone(), resolution.history);
            }
            Transition::Invalid { from_state, event } => {
                debug!(from = ?from_state, event = ?event, "invalid transition");
            }
        }

        Ok(resolution.transition)
    }

    /// Register `observer` without taking ownership of it.
    ///
    /// Once every strong handle to the observer is dropped it stops being
    /// notified and is pruned on the next notification pass.
    pub fn start_observing<O>(&self, observer: &Arc<O>)
    where
        O: TransitionObserver<S, E, F> + 'static,
    {
        self.observers.add(observer);
    }

    pub fn stop_observing<O>(&self, observer: &Arc<O>)
    where
        O: TransitionObserver<S, E, F> + 'static,
    {
        self.observers.remove(observer);
    }

    /// Number of registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// A new machine reusing this machine's declarations with `overrides`
    /// applied. Observers are not carried over.
    pub fn with(&self, overrides: Overrides<S, E, F>) -> Result<Self, BuildError> {
        Ok(Self::new(self.graph.with(overrides)?))
    }

    /// Capture the current position.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint::capture(&self.current_state())
    }

    /// A new machine reusing this machine's declarations, positioned where
    /// `checkpoint` was taken.
    pub fn resume(&self, checkpoint: &Checkpoint<S>) -> Result<Self, CheckpointError> {
        let overrides = checkpoint.overrides()?;
        self.with(overrides)
            .map_err(|e| CheckpointError::ValidationFailed(e.to_string()))
    }

    fn notify(&self, transition: &Transition<S, E, F>) {
        for listener in self.graph.listeners() {
            listener(transition);
        }
        for observer in self.observers.live() {
            observer.on_transition(transition);
        }
    }
}

impl<S: State, E: Event, F: SideEffect> std::fmt::Debug for SharedStateMachine<S, E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStateMachine")
            .field("current", &self.current_state())
            .field("observers", &self.observer_count())
            .finish_non_exhaustive()
    }
}
