//! Immutable records of transition attempts.

use crate::core::{Event, SideEffect, State};

/// Outcome of one `transition(event)` call.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition<S: State, E: Event, F: SideEffect> {
    /// A rule matched and the machine moved to `to_state` (which may equal
    /// `from_state`).
    Valid {
        from_state: S,
        event: E,
        to_state: S,
        side_effects: Vec<F>,
    },

    /// No rule matched. The machine stays in `from_state`.
    Invalid { from_state: S, event: E },
}

impl<S: State, E: Event, F: SideEffect> Transition<S, E, F> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn from_state(&self) -> &S {
        match self {
            Self::Valid { from_state, .. } | Self::Invalid { from_state, .. } => from_state,
        }
    }

    pub fn event(&self) -> &E {
        match self {
            Self::Valid { event, .. } | Self::Invalid { event, .. } => event,
        }
    }

    /// The state after the transition, for valid transitions.
    pub fn to_state(&self) -> Option<&S> {
        match self {
            Self::Valid { to_state, .. } => Some(to_state),
            Self::Invalid { .. } => None,
        }
    }

    /// Side effects in emission order. Empty for invalid transitions.
    pub fn side_effects(&self) -> &[F] {
        match self {
            Self::Valid { side_effects, .. } => side_effects,
            Self::Invalid { .. } => &[],
        }
    }
}
