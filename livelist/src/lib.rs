// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # livelist
//!
//! Live collections whose membership follows per-item observable conditions.
//!
//! ## Overview
//!
//! A live collection is a stream of change sets. A [`SourceList`] produces
//! one, [`filter_on_observable`](FilterOnObservableExt::filter_on_observable)
//! derives a filtered one where every item decides its own membership through
//! a condition stream, and [`bind`](BindExt::bind) turns the result back into
//! a list you can read.
//!
//! ## Quick Start
//!
//! ```rust
//! use livelist::prelude::*;
//! use std::sync::Arc;
//!
//! struct Player {
//!     name: &'static str,
//!     included: BehaviorSubject<bool>,
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let squad = SourceList::new();
//! let ann = Arc::new(Player { name: "Ann", included: BehaviorSubject::new(false) });
//! let bob = Arc::new(Player { name: "Bob", included: BehaviorSubject::new(false) });
//! squad.add_range([Arc::clone(&ann), Arc::clone(&bob)])?;
//!
//! let available = squad
//!     .connect()?
//!     .filter_on_observable(|p: &Arc<Player>| p.included.clone(), |included: &bool| !*included)
//!     .bind();
//! assert!(available.wait_until(|players| players.len() == 2).await);
//!
//! ann.included.next(true)?;
//! assert!(available.wait_until(|players| players.len() == 1).await);
//! assert_eq!(available.items()[0].name, "Bob");
//! # Ok(())
//! # }
//! ```

pub use livelist_core::{
    BehaviorSubject, CancellationToken, Change, ChangeSet, IntoLiveListError, IntoStream, Keyed,
    LiveListError, LiveTask, Result, SourceList, StreamItem, Subject, SubjectError,
};
pub use livelist_exec::{BindExt, BoundList, SubscribeExt};
pub use livelist_stream::{
    ConditionStream, FilterOnObservable, FilterOnObservableExt, FilterOnObservableOptions,
    ItemErrorPolicy,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use livelist_core::{BehaviorSubject, Change, ChangeSet, Keyed, SourceList, StreamItem};
    pub use livelist_exec::{BindExt, SubscribeExt};
    pub use livelist_stream::{FilterOnObservableExt, FilterOnObservableOptions, ItemErrorPolicy};
}
