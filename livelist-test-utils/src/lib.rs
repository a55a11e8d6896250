// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the livelist workspace.
//!
//! Development and testing only, not for production code.
//!
//! # Key Types
//!
//! ## `Player`
//!
//! A squad member with an "included" flag held in a
//! [`BehaviorSubject<bool>`](livelist_core::BehaviorSubject). The flag is the
//! typical per-item condition a filter follows:
//!
//! ```rust
//! use livelist_test_utils::player::player_hennessey;
//!
//! let keeper = player_hennessey();
//! assert!(!keeper.is_included());
//!
//! keeper.include().unwrap();
//! assert!(keeper.is_included());
//! ```
//!
//! ## Channels
//!
//! [`test_channel`] and [`test_channel_with_errors`] hand out a sender for
//! imperative test setup and a stream of [`StreamItem`]s for the operator
//! under test.
//!
//! # Module Organization
//!
//! - `player` - `Player` fixture and the default squad
//! - `error_injection` - stream wrapper failing at a chosen position
//! - `helpers` - assertion and utility functions

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error_injection;
pub mod helpers;
pub mod player;

use futures::{Stream, StreamExt};
use livelist_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use error_injection::ErrorInjectingStream;
pub use helpers::{assert_no_element_emitted, next_change_set, unwrap_stream};
pub use player::Player;

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// # Example
///
/// ```rust
/// use livelist_core::ChangeSet;
/// use livelist_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
///
/// tx.send(ChangeSet::from_adds([1_u32])).unwrap();
///
/// let changes = stream.next().await.unwrap().unwrap();
/// assert_eq!(changes.len(), 1);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` for testing error propagation.
///
/// # Example
///
/// ```rust
/// use livelist_core::{ChangeSet, LiveListError, StreamItem};
/// use livelist_test_utils::test_channel_with_errors;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel_with_errors::<ChangeSet<u32>>();
///
/// tx.send(StreamItem::Error(LiveListError::stream_error("feed lost"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
