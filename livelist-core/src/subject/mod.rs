// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subjects.
//!
//! A [`Subject`] broadcasts each [`StreamItem<T>`] to all active subscribers.
//! A [`BehaviorSubject`] additionally holds a current value and replays it to
//! every new subscriber, so the first poll of a fresh subscription is ready
//! immediately.
//!
//! ## Characteristics
//!
//! - **Hot**: subscribers only see items sent after they subscribed (plus the
//!   replayed current value for [`BehaviorSubject`]).
//! - **Unbounded**: unbounded mpsc channels internally, no backpressure.
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//! - **Error/close**: errors reach all subscribers and terminate the subject.
//! - **Probe**: [`subscriber_count`](Subject::subscriber_count) only counts
//!   subscriptions whose stream is still alive, so dropping a stream is
//!   visible immediately.
//!
//! ## Example
//!
//! ```
//! use livelist_core::{BehaviorSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let included = BehaviorSubject::new(false);
//! let mut stream = included.subscribe().unwrap();
//!
//! included.next(true).unwrap();
//! included.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(false)));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(true)));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

mod behavior;
mod subscribers;

pub use behavior::BehaviorSubject;

use crate::{LiveListError, StreamItem, SubjectError};
use core::pin::Pin;
use futures::Stream;
use parking_lot::Mutex;
use std::sync::Arc;
use subscribers::Subscribers;

/// Stream handed out to subject subscribers.
pub type SubjectStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

/// A hot, unbounded subject that broadcasts items to all current subscribers.
///
/// See the [module documentation](self) for details.
pub struct Subject<T: Clone + Send + 'static> {
    state: Arc<Mutex<Subscribers<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    /// Creates a new open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Subscribers::new())),
        }
    }

    /// Subscribe to this subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SubjectError> {
        let rx = self.state.lock().attach(None)?;
        Ok(Box::pin(rx))
    }

    /// Send an item to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        self.state.lock().broadcast(&item)
    }

    /// Send a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Sends a terminal error to all subscribers and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already closed.
    pub fn error(&self, err: LiveListError) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        let result = state.broadcast(&StreamItem::Error(err));
        state.close();
        result
    }

    /// Closes the subject, completing all subscriber streams. Idempotent.
    pub fn close(&self) {
        self.state.lock().close();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().is_closed()
    }

    /// Number of subscriptions whose stream is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().live_count()
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
