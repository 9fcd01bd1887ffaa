//! Guard predicates attached to matchers.
//!
//! Guards are pure boolean functions that narrow which values a matcher
//! accepts. They hold no state and may be evaluated any number of times.

use std::fmt;
use std::sync::Arc;

/// Pure predicate over a state or event.
///
/// Guards are cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use cascade::core::Guard;
///
/// let positive = Guard::new(|n: &i32| *n > 0);
///
/// assert!(positive.check(&3));
/// assert!(!positive.check(&-1));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check whether `value` satisfies the guard.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Reading {
        Celsius(i32),
        Missing,
    }

    #[test]
    fn guard_allows_matching_values() {
        let guard = Guard::new(|r: &Reading| matches!(r, Reading::Celsius(_)));

        assert!(guard.check(&Reading::Celsius(20)));
        assert!(!guard.check(&Reading::Missing));
    }

    #[test]
    fn guard_can_inspect_payload() {
        let guard = Guard::new(|r: &Reading| matches!(r, Reading::Celsius(t) if *t >= 100));

        assert!(guard.check(&Reading::Celsius(100)));
        assert!(!guard.check(&Reading::Celsius(99)));
    }

    #[test]
    fn guard_is_deterministic() {
        let reading = Reading::Celsius(5);
        let guard = Guard::new(|r: &Reading| *r != Reading::Missing);

        assert_eq!(guard.check(&reading), guard.check(&reading));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|n: &u8| *n % 2 == 0);
        let cloned = guard.clone();

        assert_eq!(guard.check(&4), cloned.check(&4));
        assert_eq!(guard.check(&5), cloned.check(&5));
    }
}
