//! Build errors for state graphs.

use thiserror::Error;

/// Errors that can occur when building a state graph.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial_state(state) before .build()")]
    MissingInitialState,

    #[error("Invalid state graph ({} issue(s)): {}", .issues.len(), summarize(.issues))]
    InvalidGraph { issues: Vec<GraphIssue> },
}

/// A single structural problem found while validating a graph.
///
/// Validation collects every issue instead of stopping at the first one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphIssue {
    #[error("State hierarchy contains a cycle through {tag}")]
    HierarchyCycle { tag: String },

    #[error("Parent {parent} of {child} is not a declared group")]
    ParentNotGroup { child: String, parent: String },

    #[error("{child} declared with conflicting parents {first} and {second}")]
    ConflictingParent {
        child: String,
        first: String,
        second: String,
    },

    #[error("Default state declared for {tag}, which is not a group")]
    DefaultOnConcreteState { tag: String },

    #[error("Initial state {state} has no matching definition")]
    UndefinedInitialState { state: String },

    #[error("Initial state {state} reports group tag {tag}")]
    InitialStateIsGroup { state: String, tag: String },

    #[error("History recorded for {tag}, which is not a group")]
    HistoryForNonGroup { tag: String },

    #[error("History for group {group} holds {state}, which is outside the group")]
    HistoryOutsideGroup { group: String, state: String },
}

fn summarize(issues: &[GraphIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
