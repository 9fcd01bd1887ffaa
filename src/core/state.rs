//! Core traits for the values a state machine is built from.
//!
//! States and events are classified by a *tag*: a small copyable value naming
//! the logical variant (typically a field-less mirror of the enum). Tags are
//! what definitions, matchers and the hierarchy table are keyed on, so no
//! runtime reflection is ever needed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Identifier of a logical variant of a state or event.
///
/// Blanket-implemented for every type with the required bounds, so a plain
/// `#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]`
/// enum is enough.
pub trait Tag:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Tag for T where
    T: Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Error returned when a value is accessed as a variant it is not.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("expected variant {expected}, found {found}")]
pub struct VariantMismatch {
    pub expected: String,
    pub found: String,
}

/// A value that can report which logical variant it is.
///
/// # Example
///
/// ```rust
/// use cascade::core::Variant;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorTag {
///     Open,
///     Closed,
/// }
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open { angle: u8 },
///     Closed,
/// }
///
/// impl Variant for Door {
///     type Tag = DoorTag;
///
///     fn tag(&self) -> DoorTag {
///         match self {
///             Self::Open { .. } => DoorTag::Open,
///             Self::Closed => DoorTag::Closed,
///         }
///     }
/// }
///
/// let door = Door::Open { angle: 90 };
/// assert_eq!(door.tag(), DoorTag::Open);
/// assert!(door.expect_variant(DoorTag::Closed).is_err());
/// ```
pub trait Variant {
    type Tag: Tag;

    /// The logical variant of this value.
    fn tag(&self) -> Self::Tag;

    /// Check that this value is of variant `tag` before reading its payload.
    ///
    /// The mismatch is reported here, at the access site, rather than at
    /// transition time.
    fn expect_variant(&self, tag: Self::Tag) -> Result<&Self, VariantMismatch> {
        let found = self.tag();
        if found == tag {
            Ok(self)
        } else {
            Err(VariantMismatch {
                expected: format!("{tag:?}"),
                found: format!("{found:?}"),
            })
        }
    }
}

/// A state machine state.
///
/// States are immutable values. They must be serializable so that a running
/// machine's position (and history) can be checkpointed.
pub trait State:
    Variant + Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> State for T where
    T: Variant + Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// The cause of a transition. Events may carry payload.
pub trait Event: Variant + Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Event for T where T: Variant + Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Out-of-band signal emitted by a transition, usually a command for the caller.
pub trait SideEffect: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> SideEffect for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}
