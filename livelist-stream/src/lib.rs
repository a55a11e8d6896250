// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators over live collections.
//!
//! A live collection travels as a stream of [`ChangeSet`]s wrapped in
//! [`StreamItem`]s. Operators in this crate consume such a stream and produce
//! another one of the same shape, so they chain like ordinary stream adapters.
//!
//! # Operators
//!
//! - **[`filter_on_observable`](FilterOnObservableExt::filter_on_observable)**:
//!   keeps the items whose own condition stream currently satisfies a predicate.
//!   Membership follows every emission of every item's condition while items
//!   come and go upstream.
//!
//! # Example
//!
//! ```
//! use livelist_core::{BehaviorSubject, SourceList};
//! use livelist_stream::FilterOnObservableExt;
//! use futures::StreamExt;
//! use std::sync::Arc;
//!
//! struct Task {
//!     done: BehaviorSubject<bool>,
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let list = SourceList::new();
//! let task = Arc::new(Task { done: BehaviorSubject::new(false) });
//! list.add(Arc::clone(&task)).unwrap();
//!
//! let mut pending = list
//!     .connect()
//!     .unwrap()
//!     .filter_on_observable(|t: &Arc<Task>| t.done.clone(), |done: &bool| !*done);
//!
//! let added = pending.next().await.unwrap().unwrap();
//! assert_eq!(added.added().count(), 1);
//!
//! task.done.next(true).unwrap();
//! let removed = pending.next().await.unwrap().unwrap();
//! assert_eq!(removed.removed().count(), 1);
//! # }
//! ```
//!
//! # Errors
//!
//! Errors are terminal by default: the operator forwards the first error it
//! meets, releases every subscription and ends. See
//! [`ItemErrorPolicy`] for confining condition and predicate failures to the
//! item that raised them.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
mod logging;
pub mod filter_on_observable;

pub use filter_on_observable::{
    ConditionStream, FilterOnObservable, FilterOnObservableExt, FilterOnObservableOptions,
    ItemErrorPolicy,
};
pub use livelist_core::{Change, ChangeSet, StreamItem};
