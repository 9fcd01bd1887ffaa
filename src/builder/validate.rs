//! Structural validation of assembled graphs.
//!
//! Every check contributes a `Validation`; the results are combined so the
//! caller sees ALL issues at once rather than fixing them one at a time.

use crate::builder::error::{BuildError, GraphIssue};
use crate::core::{Event, SideEffect, State};
use crate::graph::Graph;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<GraphIssue>>;

fn check(ok: bool, issue: impl FnOnce() -> GraphIssue) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(issue())
    }
}

/// Validate `graph`, folding in issues already found during assembly.
pub(crate) fn validate<S, E, F>(
    graph: &Graph<S, E, F>,
    pending: Vec<GraphIssue>,
) -> Result<(), BuildError>
where
    S: State,
    E: Event,
    F: SideEffect,
{
    let hierarchy = graph.hierarchy();
    let mut checks: Vec<Check> = pending.into_iter().map(Validation::fail).collect();

    if let Some(tag) = hierarchy.find_cycle() {
        checks.push(Validation::fail(GraphIssue::HierarchyCycle {
            tag: format!("{tag:?}"),
        }));
    }

    for (child, parent) in hierarchy.edges() {
        checks.push(check(hierarchy.is_group(parent), || {
            GraphIssue::ParentNotGroup {
                child: format!("{child:?}"),
                parent: format!("{parent:?}"),
            }
        }));
    }

    for definition in graph.definitions() {
        let tag = definition.tag();
        checks.push(check(
            !definition.has_default_state() || hierarchy.is_group(tag),
            || GraphIssue::DefaultOnConcreteState {
                tag: format!("{tag:?}"),
            },
        ));
    }

    let initial = graph.initial_state();
    let initial_tag = initial.tag();
    if hierarchy.is_group(initial_tag) {
        checks.push(Validation::fail(GraphIssue::InitialStateIsGroup {
            state: format!("{initial:?}"),
            tag: format!("{initial_tag:?}"),
        }));
    } else {
        checks.push(check(!graph.definitions_for(initial).is_empty(), || {
            GraphIssue::UndefinedInitialState {
                state: format!("{initial:?}"),
            }
        }));
    }

    for (group, state) in graph.seed_history().iter() {
        let issue = if !hierarchy.is_group(group) {
            Some(GraphIssue::HistoryForNonGroup {
                tag: format!("{group:?}"),
            })
        } else if !hierarchy.is_descendant(state.tag(), group) {
            Some(GraphIssue::HistoryOutsideGroup {
                group: format!("{group:?}"),
                state: format!("{state:?}"),
            })
        } else {
            None
        };
        if let Some(issue) = issue {
            checks.push(Validation::fail(issue));
        }
    }

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(issues) => Err(BuildError::InvalidGraph {
            issues: issues.iter().cloned().collect(),
        }),
    }
}
