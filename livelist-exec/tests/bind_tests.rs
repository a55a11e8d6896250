// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use livelist_core::{ChangeSet, LiveListError, SourceList, StreamItem};
use livelist_exec::BindExt;
use livelist_stream::FilterOnObservableExt;
use livelist_test_utils::helpers::sorted_names;
use livelist_test_utils::player::{squad, Player};
use livelist_test_utils::test_channel_with_errors;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

const WAIT: Duration = Duration::from_secs(1);

/// Polls `condition` until it holds or a second has passed.
async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    condition()
}

#[tokio::test]
async fn test_bind_follows_source_list() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::new();
    list.add_range([1_u32, 2])?;
    let bound = list.connect()?.bind();
    assert!(timeout(WAIT, bound.wait_until(|items| items.len() == 2)).await?);

    // Act
    list.edit(|editor| {
        editor.remove(&1);
        editor.add(3);
        editor.add(4);
    })?;

    // Assert
    assert!(timeout(WAIT, bound.wait_until(|items| items == [2, 3, 4])).await?);
    assert!(bound.contains(&3));
    assert!(!bound.contains(&1));
    assert_eq!(bound.len(), 3);
    assert!(!bound.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_bind_starts_empty() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<u32>::new();

    // Act
    let bound = list.connect()?.bind();

    // Assert
    assert!(bound.is_empty());
    assert!(bound.error().is_none());
    Ok(())
}

#[tokio::test]
async fn test_bind_keeps_items_after_completion() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::new();
    list.add_range(["a", "b"])?;
    let bound = list.connect()?.bind();
    assert!(timeout(WAIT, bound.wait_until(|items| items.len() == 2)).await?);

    // Act
    list.complete();

    // Assert
    assert!(!timeout(WAIT, bound.wait_until(|items| items.is_empty())).await?);
    assert!(bound.is_completed());
    assert!(bound.error().is_none());
    assert_eq!(bound.items(), vec!["a", "b"]);
    Ok(())
}

#[tokio::test]
async fn test_bind_records_upstream_error() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors::<ChangeSet<u32>>();
    let bound = source.bind();
    tx.send(StreamItem::Value(ChangeSet::from_adds([10])))?;

    // Act
    tx.send(StreamItem::Error(LiveListError::stream_error("feed lost")))?;

    // Assert
    assert!(!timeout(WAIT, bound.wait_until(|_| false)).await?);
    assert!(bound.is_completed());
    assert!(matches!(
        bound.error(),
        Some(LiveListError::StreamProcessingError { .. })
    ));
    assert_eq!(bound.items(), vec![10]);
    Ok(())
}

#[tokio::test]
async fn test_bind_tracks_available_players() -> anyhow::Result<()> {
    // Arrange
    let (list, [hennessey, chester, williams]) = squad();
    let available = list
        .connect()?
        .filter_on_observable(|p: &Arc<Player>| p.included_changed(), |included: &bool| !*included)
        .bind();
    assert!(timeout(WAIT, available.wait_until(|items| items.len() == 3)).await?);

    // Act
    hennessey.include()?;
    williams.include()?;

    // Assert
    assert!(timeout(WAIT, available.wait_until(|items| items.len() == 1)).await?);
    assert_eq!(sorted_names(&available.items()), vec!["Chester"]);
    assert!(available.contains(&chester));

    williams.exclude()?;
    assert!(timeout(WAIT, available.wait_until(|items| items.len() == 2)).await?);
    assert_eq!(sorted_names(&available.items()), vec!["Chester", "Williams"]);
    Ok(())
}

#[tokio::test]
async fn test_dropping_bound_list_releases_subscriptions() -> anyhow::Result<()> {
    // Arrange
    let (list, players) = squad();
    let available = list
        .connect()?
        .filter_on_observable(|p: &Arc<Player>| p.included_changed(), |included: &bool| !*included)
        .bind();
    assert!(timeout(WAIT, available.wait_until(|items| items.len() == 3)).await?);
    assert!(players.iter().all(|p| p.subscriber_count() == 1));
    assert_eq!(list.subscriber_count(), 1);

    // Act
    drop(available);

    // Assert
    assert!(eventually(|| list.subscriber_count() == 0).await);
    assert!(eventually(|| players.iter().all(|p| p.subscriber_count() == 0)).await);
    Ok(())
}
