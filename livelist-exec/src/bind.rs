// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Materialised views over change-set streams.

use crate::logging::warn;
use crate::subscribe::subscribe_impl;
use core::convert::Infallible;
use core::fmt;
use event_listener::Event;
use futures::Stream;
use livelist_core::{ChangeSet, Keyed, LiveListError, LiveTask, StreamItem};
use parking_lot::Mutex;
use std::sync::Arc;

/// Extension trait binding a change-set stream to a [`BoundList`].
pub trait BindExt<T>: Stream<Item = StreamItem<ChangeSet<T>>> + Sized
where
    T: Keyed + Clone + Send + 'static,
{
    /// Spawns a task that applies every change set of this stream to a list.
    ///
    /// The list starts empty and follows the stream until it ends or fails.
    /// Dropping the returned [`BoundList`] cancels the task, which drops the
    /// stream and everything it subscribed to.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    fn bind(self) -> BoundList<T>
    where
        Self: Send + 'static;
}

impl<S, T> BindExt<T> for S
where
    S: Stream<Item = StreamItem<ChangeSet<T>>>,
    T: Keyed + Clone + Send + 'static,
{
    fn bind(self) -> BoundList<T>
    where
        Self: Send + 'static,
    {
        let state = Arc::new(BoundState::new());
        let task_state = Arc::clone(&state);

        let task = LiveTask::spawn(move |cancel| async move {
            let apply_state = Arc::clone(&task_state);
            let outcome = subscribe_impl(
                self,
                move |changes: ChangeSet<T>, _| {
                    apply_state.apply(&changes);
                    async { Ok::<(), Infallible>(()) }
                },
                |never: Infallible| match never {},
                Some(cancel),
            )
            .await;
            task_state.finish(outcome.err());
        });

        BoundList { state, _task: task }
    }
}

struct BoundInner<T> {
    items: Vec<T>,
    error: Option<LiveListError>,
    completed: bool,
}

struct BoundState<T> {
    inner: Mutex<BoundInner<T>>,
    changed: Event,
}

impl<T: Keyed + Clone> BoundState<T> {
    fn new() -> Self {
        Self {
            inner: Mutex::new(BoundInner {
                items: Vec::new(),
                error: None,
                completed: false,
            }),
            changed: Event::new(),
        }
    }

    fn apply(&self, changes: &ChangeSet<T>) {
        changes.apply_to(&mut self.inner.lock().items);
        self.changed.notify(usize::MAX);
    }

    fn finish(&self, error: Option<LiveListError>) {
        {
            let mut inner = self.inner.lock();
            if let Some(err) = &error {
                warn!("bind: source failed, list is frozen: {}", err);
            }
            inner.error = error;
            inner.completed = true;
        }
        self.changed.notify(usize::MAX);
    }
}

/// A list kept in sync with a change-set stream by a background task.
///
/// Reads return snapshots; the list keeps changing behind them. Once the
/// stream ends the list holds its final content, and if the stream failed the
/// error is available through [`error`](Self::error).
pub struct BoundList<T> {
    state: Arc<BoundState<T>>,
    _task: LiveTask,
}

impl<T: Keyed + Clone> BoundList<T> {
    /// Snapshot of the current items in application order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.state.inner.lock().items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.inner.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.inner.lock().items.is_empty()
    }

    /// Returns `true` if an item with the same key as `item` is in the list.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        let key = item.key();
        self.state.inner.lock().items.iter().any(|i| i.key() == key)
    }

    /// The error that ended the stream, if any.
    #[must_use]
    pub fn error(&self) -> Option<LiveListError> {
        self.state.inner.lock().error.clone()
    }

    /// Returns `true` once the stream has ended, with or without an error.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.inner.lock().completed
    }

    /// Waits until `predicate` holds for the current items.
    ///
    /// Returns `true` as soon as it does, or `false` if the stream ends while
    /// it still does not.
    pub async fn wait_until(&self, mut predicate: impl FnMut(&[T]) -> bool) -> bool {
        loop {
            let listener = self.state.changed.listen();
            {
                let inner = self.state.inner.lock();
                if predicate(&inner.items) {
                    return true;
                }
                if inner.completed {
                    return false;
                }
            }
            listener.await;
        }
    }
}

impl<T> fmt::Debug for BoundList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.state.inner.lock();
        f.debug_struct("BoundList")
            .field("len", &inner.items.len())
            .field("completed", &inner.completed)
            .field("error", &inner.error)
            .finish()
    }
}
