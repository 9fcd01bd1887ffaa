//! Builder for constructing state graphs.

use crate::builder::definition::DefinitionBuilder;
use crate::builder::error::{BuildError, GraphIssue};
use crate::core::{Event, Hierarchy, History, Matcher, SideEffect, State};
use crate::graph::{Graph, StateDefinition, TransitionListener};
use crate::machine::Transition;
use std::sync::Arc;

/// Builder for constructing state graphs with a fluent API.
///
/// Structural problems are collected while declaring and reported together
/// by [`build`](Self::build).
pub struct GraphBuilder<S: State, E: Event, F: SideEffect> {
    initial: Option<S>,
    history: History<S>,
    hierarchy: Hierarchy<S::Tag>,
    definitions: Vec<StateDefinition<S, E, F>>,
    listeners: Vec<TransitionListener<S, E, F>>,
    issues: Vec<GraphIssue>,
}

impl<S: State, E: Event, F: SideEffect> GraphBuilder<S, E, F> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            history: History::new(),
            hierarchy: Hierarchy::new(),
            definitions: Vec::new(),
            listeners: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Seed the history machines start with.
    pub fn history(mut self, history: History<S>) -> Self {
        self.history = history;
        self
    }

    /// Declare a definition for every state of variant `tag`.
    pub fn state<B>(self, tag: S::Tag, declare: B) -> Self
    where
        B: FnOnce(DefinitionBuilder<S, E, F>) -> DefinitionBuilder<S, E, F>,
    {
        self.state_matching(Matcher::any(tag), declare)
    }

    /// Declare a definition for the states `matcher` accepts, such as one
    /// exact value built with [`Matcher::eq`].
    pub fn state_matching<B>(self, matcher: Matcher<S>, declare: B) -> Self
    where
        B: FnOnce(DefinitionBuilder<S, E, F>) -> DefinitionBuilder<S, E, F>,
    {
        self.push_definition(declare(DefinitionBuilder::new(matcher)))
    }

    /// Declare `tag` as an abstract group together with its definition.
    pub fn group<B>(mut self, tag: S::Tag, declare: B) -> Self
    where
        B: FnOnce(DefinitionBuilder<S, E, F>) -> DefinitionBuilder<S, E, F>,
    {
        self.hierarchy.add_group(tag);
        self.push_definition(declare(DefinitionBuilder::new(Matcher::any(tag))))
    }

    /// Place `child` under the group `parent`.
    pub fn parent(mut self, child: S::Tag, parent: S::Tag) -> Self {
        self.set_parent(child, parent);
        self
    }

    /// Add a global listener notified of every transition.
    pub fn on_transition<L>(mut self, listener: L) -> Self
    where
        L: Fn(&Transition<S, E, F>) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Build the graph.
    /// Returns an error if the initial state is missing or the declarations
    /// are structurally invalid.
    pub fn build(self) -> Result<Graph<S, E, F>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        Graph::assemble(
            initial,
            self.history,
            self.hierarchy,
            self.definitions,
            self.listeners,
            self.issues,
        )
    }

    fn push_definition(mut self, builder: DefinitionBuilder<S, E, F>) -> Self {
        let (definition, parent) = builder.finish();
        if let Some(parent) = parent {
            self.set_parent(definition.tag(), parent);
        }
        self.definitions.push(definition);
        self
    }

    fn set_parent(&mut self, child: S::Tag, parent: S::Tag) {
        if let Some(first) = self.hierarchy.set_parent(child, parent) {
            self.issues.push(GraphIssue::ConflictingParent {
                child: format!("{child:?}"),
                first: format!("{first:?}"),
                second: format!("{parent:?}"),
            });
        }
    }
}

impl<S: State, E: Event, F: SideEffect> Default for GraphBuilder<S, E, F> {
    fn default() -> Self {
        Self::new()
    }
}
