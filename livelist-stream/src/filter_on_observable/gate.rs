// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{ConditionStream, ItemErrorPolicy};
use crate::logging::warn;
use core::hash::Hash;
use core::mem;
use core::task::{Context, Poll, Waker};
use futures::task::{self, ArcWake, AtomicWaker};
use livelist_core::{Change, ChangeSet, Keyed, LiveListError, Result, StreamItem};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub(super) type Selector<T, V> = Box<dyn Fn(&T) -> ConditionStream<V> + Send + Sync>;
pub(super) type Predicate<V> = Box<dyn Fn(&V) -> Result<bool> + Send + Sync>;

/// Keys whose condition stream was woken since the last round of polling.
///
/// `parent` holds the waker of the task polling the operator; it is woken
/// whenever a key is queued.
struct ReadyQueue<K> {
    keys: Mutex<HashSet<K>>,
    parent: AtomicWaker,
}

/// Waker handed to one condition stream; waking it queues its key.
struct ConditionWaker<K> {
    key: K,
    queue: Arc<ReadyQueue<K>>,
}

impl<K> ArcWake for ConditionWaker<K>
where
    K: Clone + Eq + Hash + Send + Sync,
{
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.queue.keys.lock().insert(arc_self.key.clone());
        arc_self.queue.parent.wake();
    }
}

/// One present item and its condition subscription.
///
/// `condition` is `None` once the condition completed or the item was isolated
/// after a failure; the item then keeps whatever membership it had.
struct Subscription<T, V> {
    item: T,
    condition: Option<ConditionStream<V>>,
    waker: Waker,
}

/// Subscription table plus result set.
///
/// Invariant: every key in `matched` is also a key of `subscriptions`.
pub(super) struct Gate<T: Keyed, V> {
    selector: Selector<T, V>,
    predicate: Predicate<V>,
    policy: ItemErrorPolicy,
    subscriptions: HashMap<T::Key, Subscription<T, V>>,
    matched: HashSet<T::Key>,
    ready: Arc<ReadyQueue<T::Key>>,
}

impl<T, V> Gate<T, V>
where
    T: Keyed + Clone,
{
    pub(super) fn new(
        selector: Selector<T, V>,
        predicate: Predicate<V>,
        policy: ItemErrorPolicy,
    ) -> Self {
        Self {
            selector,
            predicate,
            policy,
            subscriptions: HashMap::new(),
            matched: HashSet::new(),
            ready: Arc::new(ReadyQueue {
                keys: Mutex::new(HashSet::new()),
                parent: AtomicWaker::new(),
            }),
        }
    }

    /// Applies one upstream change set, appending the resulting changes to `out`.
    pub(super) fn apply(
        &mut self,
        changes: ChangeSet<T>,
        out: &mut ChangeSet<T>,
        cx: &mut Context<'_>,
    ) -> Result<()> {
        self.ready.parent.register(cx.waker());
        for change in changes {
            match change {
                Change::Add(item) => self.add(item, out)?,
                Change::Remove(item) => self.remove(&item, out),
                Change::Replace { previous, current } => {
                    self.remove(&previous, out);
                    self.add(current, out)?;
                }
                Change::Refresh(item) => self.refresh(item, out),
            }
        }
        Ok(())
    }

    /// Polls the conditions woken since the last round until each is pending
    /// or finished. Conditions that were not woken are left alone.
    pub(super) fn poll_conditions(
        &mut self,
        out: &mut ChangeSet<T>,
        cx: &mut Context<'_>,
    ) -> Result<()> {
        // Register before draining so a wake racing with this round is not lost
        self.ready.parent.register(cx.waker());
        let woken = mem::take(&mut *self.ready.keys.lock());

        for key in woken {
            self.poll_condition(&key, out)?;
        }
        Ok(())
    }

    /// Number of items with a condition stream still subscribed.
    pub(super) fn live_conditions(&self) -> usize {
        self.subscriptions
            .values()
            .filter(|sub| sub.condition.is_some())
            .count()
    }

    pub(super) fn matched(&self) -> usize {
        self.matched.len()
    }

    /// Releases every subscription.
    pub(super) fn clear(&mut self) {
        self.subscriptions.clear();
        self.matched.clear();
        self.ready.keys.lock().clear();
    }

    fn add(&mut self, item: T, out: &mut ChangeSet<T>) -> Result<()> {
        let key = item.key();
        if self.subscriptions.contains_key(&key) {
            return Err(LiveListError::duplicate_subscription(&key));
        }

        let condition = (self.selector)(&item);
        let waker = task::waker(Arc::new(ConditionWaker {
            key: key.clone(),
            queue: Arc::clone(&self.ready),
        }));
        self.subscriptions.insert(
            key.clone(),
            Subscription {
                item,
                condition: Some(condition),
                waker,
            },
        );

        // Drain whatever the condition has ready so the item settles now
        self.poll_condition(&key, out)
    }

    fn remove(&mut self, item: &T, out: &mut ChangeSet<T>) {
        let key = item.key();
        match self.subscriptions.remove(&key) {
            Some(sub) => {
                if self.matched.remove(&key) {
                    out.push(Change::Remove(sub.item));
                }
            }
            None => warn!("filter_on_observable: ignoring removal of unknown item {:?}", key),
        }
    }

    fn refresh(&mut self, item: T, out: &mut ChangeSet<T>) {
        let key = item.key();
        match self.subscriptions.get_mut(&key) {
            Some(sub) => {
                sub.item = item.clone();
                if self.matched.contains(&key) {
                    out.push(Change::Refresh(item));
                }
            }
            None => warn!("filter_on_observable: ignoring refresh of unknown item {:?}", key),
        }
    }

    /// Polls the condition of `key` with its own waker until it is pending.
    ///
    /// A stale key, removed or already detached, is a no-op.
    fn poll_condition(&mut self, key: &T::Key, out: &mut ChangeSet<T>) -> Result<()> {
        loop {
            let Some(sub) = self.subscriptions.get_mut(key) else {
                return Ok(());
            };
            let Some(condition) = sub.condition.as_mut() else {
                return Ok(());
            };
            let mut cx = Context::from_waker(&sub.waker);

            match condition.as_mut().poll_next(&mut cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => match (self.predicate)(&value) {
                    Ok(matched) => self.gate(key, matched, out),
                    Err(e) => {
                        return self.item_failure(key, LiveListError::predicate_error(key, e), out)
                    }
                },
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    return self.item_failure(key, LiveListError::condition_error(key, e), out)
                }
                Poll::Ready(None) => {
                    self.detach(key);
                    return Ok(());
                }
                Poll::Pending => return Ok(()),
            }
        }
    }

    /// Moves `key` in or out of the result set, recording the transition.
    fn gate(&mut self, key: &T::Key, matched: bool, out: &mut ChangeSet<T>) {
        let Some(sub) = self.subscriptions.get(key) else {
            return;
        };

        if matched {
            if self.matched.insert(key.clone()) {
                out.push(Change::Add(sub.item.clone()));
            }
        } else if self.matched.remove(key) {
            out.push(Change::Remove(sub.item.clone()));
        }
    }

    fn item_failure(
        &mut self,
        key: &T::Key,
        err: LiveListError,
        out: &mut ChangeSet<T>,
    ) -> Result<()> {
        match self.policy {
            ItemErrorPolicy::Terminate => Err(err),
            ItemErrorPolicy::Isolate => {
                warn!("filter_on_observable: isolating item after failure: {}", err);
                self.gate(key, false, out);
                self.detach(key);
                Ok(())
            }
        }
    }

    /// Drops the condition subscription of `key`, keeping the item in the table.
    fn detach(&mut self, key: &T::Key) {
        if let Some(sub) = self.subscriptions.get_mut(key) {
            sub.condition = None;
        }
    }
}
