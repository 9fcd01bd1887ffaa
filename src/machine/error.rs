//! Errors raised while resolving a transition.

use thiserror::Error;

/// Errors that can occur during transitions.
///
/// Each of these points at a defect in the declared graph, or at misuse of a
/// shared machine. None is retried. An event without a matching rule is not
/// an error: it yields [`Transition::Invalid`](super::Transition::Invalid).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("No state definition matches state {state}")]
    MissingDefinition { state: String },

    #[error("Group {group} has neither history nor a default state")]
    UnresolvableGroup { group: String },

    #[error("Default state {state} of group {group} is not inside the group")]
    DefaultOutsideGroup { group: String, state: String },

    #[error("Recursive transition: transition() was called while a transition was in progress")]
    Recursion,
}
