//! Machines that apply events to a graph.
//!
//! Two variants share one resolver:
//! - [`StateMachine`]: a persistent snapshot; every transition returns a new
//!   machine and leaves the old one untouched.
//! - [`SharedStateMachine`]: a single state cell mutated in place, shareable
//!   across threads, with recursion detection and weakly held observers.

pub(crate) mod error;
pub(crate) mod observer;
mod persistent;
pub(crate) mod resolver;
mod shared;
pub(crate) mod transition;

pub use error::TransitionError;
pub use observer::TransitionObserver;
pub use persistent::StateMachine;
pub use shared::SharedStateMachine;
pub use transition::Transition;
