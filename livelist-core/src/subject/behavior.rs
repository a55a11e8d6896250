// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::subscribers::Subscribers;
use super::SubjectStream;
use crate::{LiveListError, StreamItem, SubjectError};
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

struct BehaviorState<T> {
    value: T,
    subscribers: Subscribers<T>,
}

/// A hot subject with a current value that is replayed to new subscribers.
///
/// Updating the value and broadcasting it happen under one lock, so a
/// subscriber never misses an update that happened after its replayed value.
pub struct BehaviorSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<BehaviorState<T>>>,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(BehaviorState {
                value: initial,
                subscribers: Subscribers::new(),
            })),
        }
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> T {
        self.state.lock().value.clone()
    }

    /// Subscribe; the stream yields the current value first.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SubjectError> {
        let mut state = self.state.lock();
        let replay = StreamItem::Value(state.value.clone());
        let rx = state.subscribers.attach(Some(replay))?;
        Ok(Box::pin(rx))
    }

    /// Replaces the current value and broadcasts it.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed; the
    /// current value is left unchanged in that case.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.subscribers.is_closed() {
            return Err(SubjectError::Closed);
        }
        state.value = value.clone();
        state.subscribers.broadcast(&StreamItem::Value(value))
    }

    /// Sends a terminal error to all subscribers and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already closed.
    pub fn error(&self, err: LiveListError) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        let result = state.subscribers.broadcast(&StreamItem::Error(err));
        state.subscribers.close();
        result
    }

    /// Closes the subject, completing all subscriber streams. Idempotent.
    pub fn close(&self) {
        self.state.lock().subscribers.close();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().subscribers.is_closed()
    }

    /// Number of subscriptions whose stream is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.live_count()
    }
}

impl<T: Clone + Send + 'static> Clone for BehaviorSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + fmt::Debug + 'static> fmt::Debug for BehaviorSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BehaviorSubject")
            .field("value", &state.value)
            .field("closed", &state.subscribers.is_closed())
            .finish()
    }
}
