// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Mutable list publishing its mutations as change sets.
//!
//! [`SourceList`] is the entry point of a live collection pipeline. Every edit
//! produces one [`ChangeSet`] broadcast to all connected streams, and
//! [`connect`](SourceList::connect) starts a stream with a snapshot of the
//! current items, so a late subscriber still sees the whole collection.
//!
//! ```
//! use livelist_core::{SourceList, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let list = SourceList::<u32>::new();
//! list.add_range([1, 2]).unwrap();
//!
//! let mut changes = list.connect().unwrap();
//! list.remove(&1).unwrap();
//!
//! let initial = changes.next().await.unwrap().unwrap();
//! assert_eq!(initial.added().copied().collect::<Vec<_>>(), vec![1, 2]);
//!
//! let removal = changes.next().await.unwrap().unwrap();
//! assert_eq!(removal.removed().copied().collect::<Vec<_>>(), vec![1]);
//! # }
//! ```

use crate::{Change, ChangeSet, Keyed, LiveListError, StreamItem, Subject, SubjectError};
use core::pin::Pin;
use futures::stream::{self, Stream, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;

/// Stream of change sets produced by [`SourceList::connect`].
pub type ChangeStream<T> = Pin<Box<dyn Stream<Item = StreamItem<ChangeSet<T>>> + Send + 'static>>;

struct SourceListState<T: Clone + Send + 'static> {
    items: Vec<T>,
    subject: Subject<ChangeSet<T>>,
}

/// A thread-safe list whose edits are published as change sets.
///
/// Items are matched by [`Keyed::key`] for removal, replacement and refresh.
/// Clones share the same list.
pub struct SourceList<T: Keyed + Clone + Send + 'static> {
    state: Arc<Mutex<SourceListState<T>>>,
}

impl<T: Keyed + Clone + Send + 'static> SourceList<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SourceListState {
                items: Vec::new(),
                subject: Subject::new(),
            })),
        }
    }

    /// Streams the current items as one `Add` change set (skipped when the list
    /// is empty), followed by every later edit.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn connect(&self) -> Result<ChangeStream<T>, SubjectError> {
        let state = self.state.lock();
        let updates = state.subject.subscribe()?;
        let snapshot = (!state.items.is_empty())
            .then(|| StreamItem::Value(ChangeSet::from_adds(state.items.iter().cloned())));
        Ok(Box::pin(stream::iter(snapshot).chain(updates)))
    }

    /// Applies several edits atomically, publishing them as a single change set.
    ///
    /// Nothing is published when the closure makes no change.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed; the
    /// closure is not run in that case.
    pub fn edit<R>(&self, f: impl FnOnce(&mut ListEditor<'_, T>) -> R) -> Result<R, SubjectError> {
        let mut state = self.state.lock();
        if state.subject.is_closed() {
            return Err(SubjectError::Closed);
        }

        let SourceListState { items, subject } = &mut *state;
        let mut editor = ListEditor {
            items,
            changes: ChangeSet::new(),
        };
        let result = f(&mut editor);
        let changes = editor.changes;

        if !changes.is_empty() {
            subject.next(changes)?;
        }
        Ok(result)
    }

    /// Appends `item`; `Ok(false)` if an item with the same key is present.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn add(&self, item: T) -> Result<bool, SubjectError> {
        self.edit(|list| list.add(item))
    }

    /// Appends the items whose key is not present yet, returning how many were added.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn add_range(&self, items: impl IntoIterator<Item = T>) -> Result<usize, SubjectError> {
        self.edit(|list| list.add_range(items))
    }

    /// Removes the first item with the same key; `Ok(false)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn remove(&self, item: &T) -> Result<bool, SubjectError> {
        self.edit(|list| list.remove(item))
    }

    /// Swaps the item keyed like `previous` for `current`; `Ok(false)` if
    /// `previous` is absent or `current` duplicates another item's key.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn replace(&self, previous: &T, current: T) -> Result<bool, SubjectError> {
        self.edit(|list| list.replace(previous, current))
    }

    /// Publishes a `Refresh` for the item keyed like `item`, storing the new value.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn refresh(&self, item: T) -> Result<bool, SubjectError> {
        self.edit(|list| list.refresh(item))
    }

    /// # Errors
    ///
    /// Returns `SubjectError::Closed` once the list has completed or failed.
    pub fn clear(&self) -> Result<(), SubjectError> {
        self.edit(|list| list.clear())
    }

    /// Snapshot of the current items.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Fails every connected stream and closes the list.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the list was already closed.
    pub fn error(&self, err: LiveListError) -> Result<(), SubjectError> {
        self.state.lock().subject.error(err)
    }

    /// Completes every connected stream and closes the list. Idempotent.
    pub fn complete(&self) {
        self.state.lock().subject.close();
    }

    /// Number of connected streams still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subject.subscriber_count()
    }
}

impl<T: Keyed + Clone + Send + 'static> Default for SourceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed + Clone + Send + 'static> Clone for SourceList<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

/// Edit handle passed to [`SourceList::edit`]; records every change it makes.
pub struct ListEditor<'a, T> {
    items: &'a mut Vec<T>,
    changes: ChangeSet<T>,
}

impl<T: Keyed + Clone> ListEditor<'_, T> {
    /// Appends `item` unless an item with the same key is already present.
    ///
    /// Returns `false`, recording no change, for a duplicate key.
    pub fn add(&mut self, item: T) -> bool {
        if self.position(&item).is_some() {
            return false;
        }
        self.items.push(item.clone());
        self.changes.push(Change::Add(item));
        true
    }

    /// Adds every item whose key is not yet present; returns how many were added.
    pub fn add_range(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        items.into_iter().filter(|item| self.add(item.clone())).count()
    }

    pub fn remove(&mut self, item: &T) -> bool {
        match self.position(item) {
            Some(index) => {
                let removed = self.items.remove(index);
                self.changes.push(Change::Remove(removed));
                true
            }
            None => false,
        }
    }

    /// Swaps the item keyed like `previous` for `current`.
    ///
    /// Returns `false` if `previous` is absent or if `current` would duplicate
    /// the key of another item.
    pub fn replace(&mut self, previous: &T, current: T) -> bool {
        if current.key() != previous.key() && self.position(&current).is_some() {
            return false;
        }
        match self.position(previous) {
            Some(index) => {
                let previous = core::mem::replace(&mut self.items[index], current.clone());
                self.changes.push(Change::Replace { previous, current });
                true
            }
            None => false,
        }
    }

    pub fn refresh(&mut self, item: T) -> bool {
        match self.position(&item) {
            Some(index) => {
                self.items[index] = item.clone();
                self.changes.push(Change::Refresh(item));
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.changes.push(Change::Remove(item));
        }
    }

    /// Items as they stand after the edits made so far.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    fn position(&self, item: &T) -> Option<usize> {
        let key = item.key();
        self.items.iter().position(|i| i.key() == key)
    }
}
