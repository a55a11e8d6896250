// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtering of a live collection by a per-item, changing condition.
//!
//! The [`filter_on_observable`](FilterOnObservableExt::filter_on_observable)
//! operator derives a live collection whose membership depends on a stream of
//! values each item exposes, rather than on a fixed predicate over the item.
//! Think of a player list filtered by each player's own "included" flag: the
//! flag flips at any time and the filtered list follows.
//!
//! ## Behavior
//!
//! - **One subscription per item**: when an item is added upstream, the
//!   selector is called once and its condition stream is subscribed. When the
//!   item is removed, that subscription is dropped.
//! - **Settling**: values a condition stream has ready at subscription time,
//!   such as a [`BehaviorSubject`](livelist_core::BehaviorSubject) replay, are
//!   applied before the next upstream change is looked at. A freshly added item
//!   is already in or out when the batch that added it is emitted.
//! - **Idempotent**: a condition repeating the same outcome emits nothing.
//! - **Batching**: the changes caused by one upstream change set go out as one
//!   change set; so do the changes of one round of condition polling. Empty
//!   change sets are never emitted.
//! - **Replace** is handled as a removal followed by an addition, so the new
//!   item gets its own subscription.
//! - **Refresh** leaves the subscription alone and is forwarded only if the item
//!   is currently matched.
//! - **Completed conditions**: an item whose condition stream ends keeps its
//!   last membership.
//! - **Completion**: the operator ends once upstream has ended and no item has
//!   a live condition stream left.
//! - **Disposal**: dropping the operator drops the source and every condition
//!   subscription. Nothing can be emitted afterwards.
//!
//! Removal of an item that was never added is logged and ignored.
//!
//! ## Example
//!
//! ```rust
//! use livelist_core::{BehaviorSubject, SourceList};
//! use livelist_stream::FilterOnObservableExt;
//! use futures::StreamExt;
//! use std::sync::Arc;
//!
//! struct Player {
//!     included: BehaviorSubject<bool>,
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let players = SourceList::new();
//! let ann = Arc::new(Player { included: BehaviorSubject::new(false) });
//! players.add(Arc::clone(&ann)).unwrap();
//!
//! let mut available = players
//!     .connect()
//!     .unwrap()
//!     .filter_on_observable(|p: &Arc<Player>| p.included.clone(), |included: &bool| !*included);
//!
//! // Ann is not included, so she is available
//! let first = available.next().await.unwrap().unwrap();
//! assert_eq!(first.added().count(), 1);
//! assert_eq!(available.subscription_count(), 1);
//!
//! ann.included.next(true).unwrap();
//! let second = available.next().await.unwrap().unwrap();
//! assert_eq!(second.removed().count(), 1);
//! assert_eq!(available.matched_count(), 0);
//! # }
//! ```
//!
//! ## Errors
//!
//! With the default [`ItemErrorPolicy::Terminate`] every error is emitted once
//! as [`StreamItem::Error`](livelist_core::StreamItem::Error), all subscriptions
//! are released and the stream ends. Changes gathered during the same poll are
//! discarded.
//!
//! - upstream errors are forwarded unchanged
//! - condition stream errors become `LiveListError::ConditionStreamError`
//! - predicate errors become `LiveListError::PredicateError`
//! - adding an item that is already present is `LiveListError::DuplicateSubscription`
//!
//! With [`ItemErrorPolicy::Isolate`] condition and predicate errors only take
//! the failing item out of the result. Upstream errors and duplicate additions
//! stay terminal.
//!
//! ## See Also
//!
//! - [`SourceList`](livelist_core::SourceList) produces the change sets this
//!   operator consumes.

mod gate;
mod implementation;
mod options;

pub use implementation::{FilterOnObservable, FilterOnObservableExt};
pub use options::{FilterOnObservableOptions, ItemErrorPolicy};

use core::pin::Pin;
use futures::Stream;
use livelist_core::StreamItem;

/// Condition stream of one item, as returned by the selector.
pub type ConditionStream<V> = Pin<Box<dyn Stream<Item = StreamItem<V>> + Send + 'static>>;
