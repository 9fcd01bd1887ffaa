//! Core value types of the engine.
//!
//! This module contains the pure building blocks everything else is made of:
//! - Variant classification via the `Variant` trait and its tags
//! - Guard predicates and the matchers built from them
//! - The explicit group hierarchy table
//! - Immutable group history
//!
//! Nothing in this module performs side effects.

mod guard;
mod hierarchy;
mod history;
mod matcher;
mod state;

pub use guard::Guard;
pub use hierarchy::Hierarchy;
pub use history::{CurrentState, History};
pub use matcher::Matcher;
pub use state::{Event, SideEffect, State, Tag, Variant, VariantMismatch};
