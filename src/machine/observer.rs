//! Dynamically registered transition observers.

use crate::core::{Event, SideEffect, State};
use crate::machine::transition::Transition;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Receives every transition record of a machine it is registered with.
///
/// Implemented for any `Fn(&Transition) + Send + Sync`.
pub trait TransitionObserver<S: State, E: Event, F: SideEffect>: Send + Sync {
    fn on_transition(&self, transition: &Transition<S, E, F>);
}

impl<S, E, F, T> TransitionObserver<S, E, F> for T
where
    S: State,
    E: Event,
    F: SideEffect,
    T: Fn(&Transition<S, E, F>) + Send + Sync,
{
    fn on_transition(&self, transition: &Transition<S, E, F>) {
        self(transition)
    }
}

/// Non-owning observer list.
///
/// Holds only weak references: an observer whose last strong handle is
/// dropped is pruned on the next notification pass.
pub(crate) struct Observers<S: State, E: Event, F: SideEffect> {
    entries: Mutex<Vec<Weak<dyn TransitionObserver<S, E, F>>>>,
}

impl<S: State, E: Event, F: SideEffect> Observers<S, E, F> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn add<O>(&self, observer: &Arc<O>)
    where
        O: TransitionObserver<S, E, F> + 'static,
    {
        let weak: Weak<O> = Arc::downgrade(observer);
        self.entries.lock().push(weak);
    }

    /// Remove `observer` and any dead entries.
    pub fn remove<O>(&self, observer: &Arc<O>)
    where
        O: TransitionObserver<S, E, F> + 'static,
    {
        let target = Arc::as_ptr(observer) as *const ();
        self.entries
            .lock()
            .retain(|entry| entry.strong_count() > 0 && entry.as_ptr() as *const () != target);
    }

    /// Prune dead entries and return strong handles to the live ones, in
    /// registration order.
    ///
    /// The lock is released before the caller notifies anyone, so observers
    /// may register or unregister from inside their callback.
    pub fn live(&self) -> Vec<Arc<dyn TransitionObserver<S, E, F>>> {
        let mut entries = self.entries.lock();
        entries.retain(|entry| entry.strong_count() > 0);
        entries.iter().filter_map(Weak::upgrade).collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }
}
