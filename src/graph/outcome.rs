//! What a transition rule produces.

use crate::core::{SideEffect, State};

/// Where a rule wants the machine to go.
#[derive(Clone, Debug, PartialEq)]
pub enum Target<S: State> {
    /// A concrete state.
    State(S),
    /// An abstract group, resolved through history or the group's default.
    Group(S::Tag),
    /// Remain in the current state. Exit and enter listeners of the definitions
    /// declared for the current state's own tag still fire.
    Stay,
}

/// Target plus the side effects a rule emits, in emission order.
///
/// # Example
///
/// ```rust
/// use cascade::graph::{Outcome, Target};
/// # use cascade::core::Variant;
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// # enum DoorTag { Open, Closed }
/// # #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// # enum Door { Open, Closed }
/// # impl Variant for Door {
/// #     type Tag = DoorTag;
/// #     fn tag(&self) -> DoorTag {
/// #         match self { Self::Open => DoorTag::Open, Self::Closed => DoorTag::Closed }
/// #     }
/// # }
///
/// let outcome: Outcome<Door, &str> = Outcome::transition_to(Door::Open)
///     .emit("unlock")
///     .emit("swing");
///
/// assert_eq!(outcome.target(), &Target::State(Door::Open));
/// assert_eq!(outcome.side_effects(), &["unlock", "swing"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<S: State, F: SideEffect> {
    target: Target<S>,
    side_effects: Vec<F>,
}

impl<S: State, F: SideEffect> Outcome<S, F> {
    pub fn transition_to(state: S) -> Self {
        Self::new(Target::State(state))
    }

    pub fn transition_to_group(group: S::Tag) -> Self {
        Self::new(Target::Group(group))
    }

    pub fn dont_transition() -> Self {
        Self::new(Target::Stay)
    }

    /// Append one side effect.
    pub fn emit(mut self, side_effect: F) -> Self {
        self.side_effects.push(side_effect);
        self
    }

    /// Append several side effects, preserving their order.
    pub fn emit_all<I>(mut self, side_effects: I) -> Self
    where
        I: IntoIterator<Item = F>,
    {
        self.side_effects.extend(side_effects);
        self
    }

    pub fn target(&self) -> &Target<S> {
        &self.target
    }

    pub fn side_effects(&self) -> &[F] {
        &self.side_effects
    }

    pub fn into_parts(self) -> (Target<S>, Vec<F>) {
        (self.target, self.side_effects)
    }

    fn new(target: Target<S>) -> Self {
        Self {
            target,
            side_effects: Vec::new(),
        }
    }
}
