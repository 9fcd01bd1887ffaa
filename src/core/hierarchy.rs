//! Explicit parent-tag table for hierarchical states.
//!
//! The hierarchy is declared by the programmer at graph construction time.
//! Group tags are abstract: no state value reports a group tag, but
//! transitions may target one and definitions declared for a group apply to
//! all of its descendants.

use super::state::Tag;
use std::collections::{HashMap, HashSet};

/// Parent relation and group set over a tag type.
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy<T: Tag> {
    parents: HashMap<T, T>,
    groups: HashSet<T>,
}

impl<T: Tag> Default for Hierarchy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tag> Hierarchy<T> {
    /// Create an empty hierarchy where every tag is a root.
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
            groups: HashSet::new(),
        }
    }

    /// Declare `group` as an abstract group tag.
    pub fn add_group(&mut self, group: T) {
        self.groups.insert(group);
    }

    /// Declare `parent` as the parent of `child`.
    ///
    /// Returns the previously declared parent if it differs.
    pub fn set_parent(&mut self, child: T, parent: T) -> Option<T> {
        match self.parents.insert(child, parent) {
            Some(previous) if previous != parent => Some(previous),
            _ => None,
        }
    }

    pub fn parent_of(&self, tag: T) -> Option<T> {
        self.parents.get(&tag).copied()
    }

    pub fn is_group(&self, tag: T) -> bool {
        self.groups.contains(&tag)
    }

    /// All declared groups.
    pub fn groups(&self) -> impl Iterator<Item = T> + '_ {
        self.groups.iter().copied()
    }

    /// All declared `(child, parent)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.parents.iter().map(|(child, parent)| (*child, *parent))
    }

    /// The ancestor chain of `tag`, starting with `tag` itself and ending at
    /// its root: most specific first.
    ///
    /// Stops before revisiting a tag, so a cyclic table still terminates.
    pub fn chain(&self, tag: T) -> Vec<T> {
        let mut chain = vec![tag];
        let mut current = tag;
        while let Some(parent) = self.parent_of(current) {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Number of ancestors above `tag`.
    pub fn depth(&self, tag: T) -> usize {
        self.chain(tag).len() - 1
    }

    /// Whether `ancestor` appears in the chain of `tag`. A tag is its own
    /// descendant.
    pub fn is_descendant(&self, tag: T, ancestor: T) -> bool {
        self.chain(tag).contains(&ancestor)
    }

    /// Find a tag that is its own ancestor, if any.
    pub fn find_cycle(&self) -> Option<T> {
        self.parents.keys().copied().find(|&start| {
            let mut seen = HashSet::new();
            let mut current = start;
            while let Some(parent) = self.parent_of(current) {
                if parent == start {
                    return true;
                }
                if !seen.insert(parent) {
                    return false;
                }
                current = parent;
            }
            false
        })
    }
}
