//! Transition resolution.
//!
//! Given the graph, the machine's current position and an event, compute the
//! transition record and the successor history. Resolution runs enter and
//! exit listeners to collect their side effects but mutates nothing: the
//! caller decides whether and how to commit the result.

use crate::core::{CurrentState, Event, History, SideEffect, State};
use crate::graph::{Graph, Target};
use crate::machine::error::TransitionError;
use crate::machine::transition::Transition;
use tracing::{error, trace};

/// Result of resolving one event.
#[derive(Debug)]
pub(crate) struct Resolution<S: State, E: Event, F: SideEffect> {
    pub transition: Transition<S, E, F>,
    pub history: History<S>,
}

/// Definition positions exited and entered by a transition.
///
/// `exited` is innermost first; `entered` is outermost first.
#[derive(Debug, PartialEq)]
pub(crate) struct Boundary {
    pub exited: Vec<usize>,
    pub entered: Vec<usize>,
}

pub(crate) fn resolve<S, E, F>(
    graph: &Graph<S, E, F>,
    current: &CurrentState<S>,
    event: E,
) -> Result<Resolution<S, E, F>, TransitionError>
where
    S: State,
    E: Event,
    F: SideEffect,
{
    let from_state = current.state();
    let history = current.history();

    let from_definitions = graph.definition_indices(from_state);
    if from_definitions.is_empty() {
        return Err(missing_definition(from_state));
    }

    let rule = from_definitions
        .iter()
        .find_map(|&position| graph.definition(position).find_rule(&event));

    let Some(rule) = rule else {
        trace!(from = ?from_state, event = ?event, "no rule matched event");
        return Ok(Resolution {
            transition: Transition::Invalid {
                from_state: from_state.clone(),
                event,
            },
            history: history.clone(),
        });
    };

    let (target, rule_effects) = rule(from_state, &event).into_parts();
    let to_state = resolve_target(graph, history, from_state, target)?;

    let to_definitions = graph.definition_indices(&to_state);
    if to_definitions.is_empty() {
        return Err(missing_definition(&to_state));
    }

    let innermost = from_definitions
        .iter()
        .take_while(|&&position| graph.definition(position).tag() == from_state.tag())
        .count();
    let boundary = boundary(&from_definitions, &to_definitions, innermost);
    trace!(
        from = ?from_state,
        to = ?to_state,
        exited = boundary.exited.len(),
        entered = boundary.entered.len(),
        "resolved transition boundary"
    );

    let mut side_effects = Vec::new();
    for &position in &boundary.exited {
        side_effects.extend(graph.definition(position).exit_effects(from_state, &event));
    }
    side_effects.extend(rule_effects);
    for &position in &boundary.entered {
        side_effects.extend(graph.definition(position).enter_effects(&to_state, &event));
    }

    let history = next_history(graph, history, from_state, &boundary);

    Ok(Resolution {
        transition: Transition::Valid {
            from_state: from_state.clone(),
            event,
            to_state,
            side_effects,
        },
        history,
    })
}

/// Turn a rule's target into a concrete state.
fn resolve_target<S, E, F>(
    graph: &Graph<S, E, F>,
    history: &History<S>,
    from_state: &S,
    target: Target<S>,
) -> Result<S, TransitionError>
where
    S: State,
    E: Event,
    F: SideEffect,
{
    match target {
        Target::State(state) => Ok(state),
        Target::Stay => Ok(from_state.clone()),
        Target::Group(group) => {
            if let Some(remembered) = history.get(group) {
                trace!(group = ?group, state = ?remembered, "entering group from history");
                return Ok(remembered.clone());
            }

            let Some(default) = graph.group_default(group) else {
                error!(group = ?group, "group has neither history nor a default state");
                return Err(TransitionError::UnresolvableGroup {
                    group: format!("{group:?}"),
                });
            };

            if !graph.hierarchy().is_descendant(default.tag(), group) {
                error!(group = ?group, state = ?default, "default state lies outside its group");
                return Err(TransitionError::DefaultOutsideGroup {
                    group: format!("{group:?}"),
                    state: format!("{default:?}"),
                });
            }

            trace!(group = ?group, state = ?default, "entering group through its default");
            Ok(default)
        }
    }
}

/// Compare the definition lists of the source and target states.
///
/// Identical lists mean a transition within the same leaf: the first
/// `innermost` definitions (those declared for the leaf's own tag) are exited
/// and re-entered, never their ancestors. Exits follow declaration order and
/// entries run in reverse, as for any other boundary.
pub(crate) fn boundary(from: &[usize], to: &[usize], innermost: usize) -> Boundary {
    if from == to {
        let leaf = &from[..innermost.min(from.len())];
        return Boundary {
            exited: leaf.to_vec(),
            entered: leaf.iter().rev().copied().collect(),
        };
    }

    Boundary {
        exited: from
            .iter()
            .copied()
            .filter(|position| !to.contains(position))
            .collect(),
        entered: to
            .iter()
            .rev()
            .copied()
            .filter(|position| !from.contains(position))
            .collect(),
    }
}

/// Record `from_state` for every exited group; forget every entered group.
fn next_history<S, E, F>(
    graph: &Graph<S, E, F>,
    history: &History<S>,
    from_state: &S,
    boundary: &Boundary,
) -> History<S>
where
    S: State,
    E: Event,
    F: SideEffect,
{
    let group_tags = |positions: &[usize]| -> Vec<S::Tag> {
        let mut tags = Vec::new();
        for &position in positions {
            let tag = graph.definition(position).tag();
            if graph.is_group(tag) && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    };

    let mut next = history.clone();
    for group in group_tags(&boundary.exited) {
        trace!(group = ?group, state = ?from_state, "recording group history");
        next = next.record(group, from_state.clone());
    }

    let entered = group_tags(&boundary.entered);
    if entered.is_empty() {
        next
    } else {
        next.forget(entered)
    }
}

fn missing_definition<S: State>(state: &S) -> TransitionError {
    error!(state = ?state, "no state definition matches state");
    TransitionError::MissingDefinition {
        state: format!("{state:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_lists_exit_and_enter_only_innermost() {
        let result = boundary(&[3, 1, 0], &[3, 1, 0], 1);

        assert_eq!(
            result,
            Boundary {
                exited: vec![3],
                entered: vec![3],
            }
        );
    }

    #[test]
    fn identical_lists_cover_every_definition_of_the_leaf_tag() {
        let result = boundary(&[3, 4, 1, 0], &[3, 4, 1, 0], 2);

        assert_eq!(result.exited, vec![3, 4]);
        assert_eq!(result.entered, vec![4, 3]);
    }

    #[test]
    fn sibling_leaves_share_ancestors() {
        let result = boundary(&[2, 1, 0], &[3, 1, 0], 1);

        assert_eq!(result.exited, vec![2]);
        assert_eq!(result.entered, vec![3]);
    }

    #[test]
    fn exits_cascade_inside_out_and_enters_outside_in() {
        let result = boundary(&[4, 2, 0], &[6, 5, 0], 1);

        assert_eq!(result.exited, vec![4, 2]);
        assert_eq!(result.entered, vec![5, 6]);
    }

    #[test]
    fn leaving_a_group_for_a_root_state() {
        let result = boundary(&[2, 1], &[5], 1);

        assert_eq!(result.exited, vec![2, 1]);
        assert_eq!(result.entered, vec![5]);
    }

    #[test]
    fn empty_lists_produce_empty_boundary() {
        let result = boundary(&[], &[], 0);

        assert!(result.exited.is_empty());
        assert!(result.entered.is_empty());
    }

    prop_compose! {
        // Two definition chains, most specific first, ending in a common
        // ancestor suffix: `(from_only, to_only, shared)`.
        fn diverging_chains()(
            pool in prop::collection::hash_set(0usize..1000, 0..12),
            from_len in 0..4usize,
            to_len in 0..4usize,
        ) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
            let mut pool: Vec<usize> = pool.into_iter().collect();
            let from_only: Vec<usize> = pool.drain(..from_len.min(pool.len())).collect();
            let to_only: Vec<usize> = pool.drain(..to_len.min(pool.len())).collect();
            (from_only, to_only, pool)
        }
    }

    proptest! {
        #[test]
        fn only_levels_outside_the_shared_suffix_fire(
            (from_only, to_only, shared) in diverging_chains(),
        ) {
            prop_assume!(!from_only.is_empty() || !to_only.is_empty());
            let from: Vec<usize> = from_only.iter().chain(&shared).copied().collect();
            let to: Vec<usize> = to_only.iter().chain(&shared).copied().collect();

            let result = boundary(&from, &to, 1);

            let entered: Vec<usize> = to_only.iter().rev().copied().collect();
            prop_assert_eq!(result.exited, from_only);
            prop_assert_eq!(result.entered, entered);
        }

        #[test]
        fn identical_chains_reenter_only_the_leaf(
            chain in prop::collection::hash_set(0usize..1000, 1..8),
        ) {
            let chain: Vec<usize> = chain.into_iter().collect();

            let result = boundary(&chain, &chain, 1);

            prop_assert_eq!(result.exited, vec![chain[0]]);
            prop_assert_eq!(result.entered, vec![chain[0]]);
        }
    }
}
