// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::player::Player;
use futures::stream::StreamExt;
use futures::Stream;
use livelist_core::{ChangeSet, StreamItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _state = stream.next() => {
            panic!(
                "Unexpected change emitted, expected no output."
            );
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Waits up to `timeout_ms` for the next item, panicking on timeout or end of stream.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Expected an item but the stream ended"),
        Err(_) => panic!("Timed out after {timeout_ms}ms waiting for an item"),
    }
}

/// Next change set of a live collection stream, panicking on an error item.
pub async fn next_change_set<S, T>(stream: &mut S) -> ChangeSet<T>
where
    S: Stream<Item = StreamItem<ChangeSet<T>>> + Unpin,
{
    match unwrap_stream(stream, 1000).await {
        StreamItem::Value(changes) => changes,
        StreamItem::Error(e) => panic!("Expected a change set, got error: {e}"),
    }
}

/// Sorted names of the players added by `changes`.
#[must_use]
pub fn added_names(changes: &ChangeSet<Arc<Player>>) -> Vec<String> {
    sorted_names(changes.added())
}

/// Sorted names of the players removed by `changes`.
#[must_use]
pub fn removed_names(changes: &ChangeSet<Arc<Player>>) -> Vec<String> {
    sorted_names(changes.removed())
}

/// Sorted names of `players`.
pub fn sorted_names<'a>(players: impl IntoIterator<Item = &'a Arc<Player>>) -> Vec<String> {
    let mut names: Vec<String> = players.into_iter().map(|p| p.name.clone()).collect();
    names.sort();
    names
}
