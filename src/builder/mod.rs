//! Builder API for declaring state graphs.
//!
//! This module provides the fluent builders that assemble an immutable
//! [`Graph`](crate::graph::Graph): state and group definitions, the group
//! hierarchy, seed history and global listeners. It also provides
//! [`Overrides`] for deriving a new graph from an existing one.
//!
//! # Example
//!
//! ```rust
//! use cascade::builder::GraphBuilder;
//! use cascade::core::Variant;
//! use cascade::graph::Outcome;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
//! enum LightTag {
//!     Red,
//!     Green,
//! }
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! enum Light {
//!     Red,
//!     Green,
//! }
//!
//! impl Variant for Light {
//!     type Tag = LightTag;
//!
//!     fn tag(&self) -> LightTag {
//!         match self {
//!             Self::Red => LightTag::Red,
//!             Self::Green => LightTag::Green,
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
//! enum TimerTag {
//!     Tick,
//! }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Tick;
//!
//! impl Variant for Tick {
//!     type Tag = TimerTag;
//!
//!     fn tag(&self) -> TimerTag {
//!         TimerTag::Tick
//!     }
//! }
//!
//! let graph = GraphBuilder::<Light, Tick, ()>::new()
//!     .initial_state(Light::Red)
//!     .state(LightTag::Red, |s| {
//!         s.on_event(TimerTag::Tick, |_, _| Outcome::transition_to(Light::Green))
//!     })
//!     .state(LightTag::Green, |s| {
//!         s.on_event(TimerTag::Tick, |_, _| Outcome::transition_to(Light::Red))
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(graph.initial_state(), &Light::Red);
//! ```

pub mod definition;
pub mod error;
pub mod graph;
pub mod overrides;
pub(crate) mod validate;

pub use definition::DefinitionBuilder;
pub use error::{BuildError, GraphIssue};
pub use graph::GraphBuilder;
pub use overrides::Overrides;
