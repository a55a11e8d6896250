// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Incremental change notifications.
//!
//! A [`ChangeSet`] is an ordered batch of [`Change`]s describing how a collection
//! moved from one state to the next. Applying every change set a stream yields,
//! in order, to an empty list reproduces the collection.
//!
//! ```
//! use livelist_core::{Change, ChangeSet};
//!
//! let mut list = Vec::new();
//!
//! ChangeSet::from_adds([1_u32, 2, 3]).apply_to(&mut list);
//! ChangeSet::from(vec![Change::Remove(2_u32)]).apply_to(&mut list);
//!
//! assert_eq!(list, vec![1, 3]);
//! ```

use crate::Keyed;

/// A single mutation of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    /// The item entered the collection.
    Add(T),
    /// The item left the collection.
    Remove(T),
    /// `previous` was swapped for `current`.
    ///
    /// Consumers that track per-item state treat this as removing `previous`
    /// and adding `current`.
    Replace {
        /// Item that left
        previous: T,
        /// Item that took its place
        current: T,
    },
    /// The item stayed in place but its contents changed.
    Refresh(T),
}

impl<T> Change<T> {
    /// The item this change leaves in the collection, if any.
    pub fn current(&self) -> Option<&T> {
        match self {
            Change::Add(item) | Change::Refresh(item) => Some(item),
            Change::Replace { current, .. } => Some(current),
            Change::Remove(_) => None,
        }
    }
}

/// An ordered batch of changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<T> {
    changes: Vec<Change<T>>,
}

impl<T> ChangeSet<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// A change set adding every item, in order.
    pub fn from_adds(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            changes: items.into_iter().map(Change::Add).collect(),
        }
    }

    pub fn push(&mut self, change: Change<T>) {
        self.changes.push(change);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Change<T>> {
        self.changes.iter()
    }

    /// Items added by this change set, in order.
    pub fn added(&self) -> impl Iterator<Item = &T> {
        self.changes.iter().filter_map(|change| match change {
            Change::Add(item) => Some(item),
            _ => None,
        })
    }

    /// Items removed by this change set, in order.
    pub fn removed(&self) -> impl Iterator<Item = &T> {
        self.changes.iter().filter_map(|change| match change {
            Change::Remove(item) => Some(item),
            _ => None,
        })
    }
}

impl<T: Keyed + Clone> ChangeSet<T> {
    /// Applies every change to `items`, matching items by key.
    ///
    /// Removals and refreshes of keys that are not present are ignored; a
    /// replacement whose `previous` is missing appends `current`.
    pub fn apply_to(&self, items: &mut Vec<T>) {
        for change in &self.changes {
            match change {
                Change::Add(item) => items.push(item.clone()),
                Change::Remove(item) => {
                    let key = item.key();
                    if let Some(index) = items.iter().position(|i| i.key() == key) {
                        items.remove(index);
                    }
                }
                Change::Replace { previous, current } => {
                    let key = previous.key();
                    match items.iter().position(|i| i.key() == key) {
                        Some(index) => items[index] = current.clone(),
                        None => items.push(current.clone()),
                    }
                }
                Change::Refresh(item) => {
                    let key = item.key();
                    if let Some(slot) = items.iter_mut().find(|i| i.key() == key) {
                        *slot = item.clone();
                    }
                }
            }
        }
    }
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Change<T>>> for ChangeSet<T> {
    fn from(changes: Vec<Change<T>>) -> Self {
        Self { changes }
    }
}

impl<T> IntoIterator for ChangeSet<T> {
    type Item = Change<T>;
    type IntoIter = std::vec::IntoIter<Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ChangeSet<T> {
    type Item = &'a Change<T>;
    type IntoIter = core::slice::Iter<'a, Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
