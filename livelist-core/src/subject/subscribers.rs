// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{StreamItem, SubjectError};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Subscriber bookkeeping shared by [`Subject`](super::Subject) and
/// [`BehaviorSubject`](super::BehaviorSubject).
pub(crate) struct Subscribers<T> {
    closed: bool,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
}

impl<T: Clone> Subscribers<T> {
    pub(crate) const fn new() -> Self {
        Self {
            closed: false,
            senders: Vec::new(),
        }
    }

    /// Registers a new subscriber, queueing `replay` as its first item.
    ///
    /// Senders whose receiver is gone are dropped first, so a subject that is
    /// subscribed and released repeatedly without ever broadcasting stays bounded.
    pub(crate) fn attach(
        &mut self,
        replay: Option<StreamItem<T>>,
    ) -> Result<UnboundedReceiver<StreamItem<T>>, SubjectError> {
        if self.closed {
            return Err(SubjectError::Closed);
        }

        self.senders.retain(|tx| !tx.is_closed());
        let (tx, rx) = mpsc::unbounded();
        if let Some(item) = replay {
            // Cannot fail: the receiver is alive
            let _ = tx.unbounded_send(item);
        }
        self.senders.push(tx);
        Ok(rx)
    }

    /// Sends `item` to every live subscriber, forgetting dropped ones.
    pub(crate) fn broadcast(&mut self, item: &StreamItem<T>) -> Result<(), SubjectError> {
        if self.closed {
            return Err(SubjectError::Closed);
        }

        self.senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.senders.clear();
    }

    pub(crate) const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Subscribers whose receiving end is still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.senders.iter().filter(|tx| !tx.is_closed()).count()
    }
}
