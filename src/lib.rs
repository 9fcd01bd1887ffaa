//! Cascade: a hierarchical finite state machine engine
//!
//! States and events are tagged sum types. Definitions are declared per
//! variant tag, grouped under abstract group tags through an explicit parent
//! table, and resolved with first-match-wins precedence from the most
//! specific definition outward. Entering a group resumes its last recorded
//! substate, or its declared default.
//!
//! # Core Concepts
//!
//! - **Variant**: classification of a state or event value by its tag
//! - **Graph**: the immutable declaration, built once by `GraphBuilder`
//! - **Transition**: a `Valid` or `Invalid` record of one `transition(event)` call
//! - **History**: the last concrete substate exited from each group
//! - **Machines**: a persistent `StateMachine` and an in-place `SharedStateMachine`
//!
//! # Example
//!
//! ```rust
//! use cascade::{GraphBuilder, Outcome, StateMachine, Variant};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
//! enum DoorTag {
//!     Open,
//!     Closed,
//! }
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! enum Door {
//!     Open,
//!     Closed,
//! }
//!
//! impl Variant for Door {
//!     type Tag = DoorTag;
//!
//!     fn tag(&self) -> DoorTag {
//!         match self {
//!             Self::Open => DoorTag::Open,
//!             Self::Closed => DoorTag::Closed,
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
//! enum PushTag {
//!     Push,
//! }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Push;
//!
//! impl Variant for Push {
//!     type Tag = PushTag;
//!
//!     fn tag(&self) -> PushTag {
//!         PushTag::Push
//!     }
//! }
//!
//! let machine = StateMachine::create(
//!     GraphBuilder::<Door, Push, &'static str>::new()
//!         .initial_state(Door::Closed)
//!         .state(DoorTag::Closed, |s| {
//!             s.on_event(PushTag::Push, |_, _| {
//!                 Outcome::transition_to(Door::Open).emit("creak")
//!             })
//!         })
//!         .state(DoorTag::Open, |s| s.on_enter(|_, _| vec!["draft"])),
//! )
//! .unwrap();
//!
//! let (machine, transition) = machine.transition(Push).unwrap();
//!
//! assert_eq!(machine.state(), &Door::Open);
//! assert_eq!(transition.side_effects(), &["creak", "draft"]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod graph;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, GraphBuilder, Overrides};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{CurrentState, History, Matcher, State, Variant};
pub use graph::{Graph, Outcome, Target};
pub use machine::{SharedStateMachine, StateMachine, Transition, TransitionError};
