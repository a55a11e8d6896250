// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{FutureExt, StreamExt};
use livelist_core::{Change, ChangeSet, LiveListError, SourceList, StreamItem, SubjectError};

#[tokio::test]
async fn test_connect_replays_snapshot_then_edits() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<u32>::new();
    list.add_range([1, 2])?;

    // Act
    let mut stream = list.connect()?;
    list.add(3)?;

    // Assert
    assert_eq!(stream.next().await, Some(StreamItem::Value(ChangeSet::from_adds([1, 2]))));
    assert_eq!(stream.next().await, Some(StreamItem::Value(ChangeSet::from_adds([3]))));
    Ok(())
}

#[test]
fn test_connect_to_empty_list_has_no_snapshot() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();

    let mut stream = list.connect()?;

    assert!(stream.next().now_or_never().is_none());
    Ok(())
}

#[tokio::test]
async fn test_edit_publishes_one_change_set() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<u32>::new();
    list.add_range([1, 2, 3])?;
    let mut stream = list.connect()?;
    let _snapshot = stream.next().await;

    // Act
    let removed = list.edit(|l| {
        l.add(4);
        l.remove(&2)
    })?;

    // Assert
    assert!(removed);
    assert_eq!(
        stream.next().await,
        Some(StreamItem::Value(ChangeSet::from(vec![
            Change::Add(4),
            Change::Remove(2)
        ])))
    );
    assert_eq!(list.items(), vec![1, 3, 4]);
    Ok(())
}

#[test]
fn test_edit_without_changes_publishes_nothing() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();
    let mut stream = list.connect()?;

    assert!(!list.remove(&9)?);
    assert!(!list.refresh(9)?);

    assert!(stream.next().now_or_never().is_none());
    Ok(())
}

#[tokio::test]
async fn test_replace_and_refresh() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<String>::new();
    list.add("a".to_string())?;
    let mut stream = list.connect()?;
    let _snapshot = stream.next().await;

    // Act
    assert!(list.replace(&"a".to_string(), "b".to_string())?);
    assert!(list.refresh("b".to_string())?);

    // Assert
    assert_eq!(
        stream.next().await,
        Some(StreamItem::Value(ChangeSet::from(vec![Change::Replace {
            previous: "a".to_string(),
            current: "b".to_string(),
        }])))
    );
    assert_eq!(
        stream.next().await,
        Some(StreamItem::Value(ChangeSet::from(vec![Change::Refresh(
            "b".to_string()
        )])))
    );
    assert_eq!(list.items(), vec!["b".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_clear_removes_everything_in_order() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();
    list.add_range([1, 2])?;
    let mut stream = list.connect()?;
    let _snapshot = stream.next().await;

    list.clear()?;

    let cleared = stream.next().await.map(StreamItem::unwrap);
    assert_eq!(
        cleared.map(|c| c.removed().copied().collect::<Vec<_>>()),
        Some(vec![1, 2])
    );
    assert!(list.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_complete_ends_streams_and_rejects_edits() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();
    let mut stream = list.connect()?;

    list.complete();

    assert_eq!(stream.next().await, None);
    assert_eq!(list.add(1), Err(SubjectError::Closed));
    assert!(list.connect().is_err());
    assert_eq!(list.len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_error_reaches_connected_streams() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();
    let mut stream = list.connect()?;

    list.error(LiveListError::stream_error("feed lost"))?;

    assert!(matches!(stream.next().await, Some(StreamItem::Error(_))));
    assert_eq!(stream.next().await, None);
    Ok(())
}

#[test]
fn test_subscriber_count_tracks_dropped_streams() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();
    let stream = list.connect()?;
    assert_eq!(list.subscriber_count(), 1);

    drop(stream);

    assert_eq!(list.subscriber_count(), 0);
    Ok(())
}

#[test]
fn test_clones_share_items() -> anyhow::Result<()> {
    let list = SourceList::<u32>::new();
    let other = list.clone();

    other.add(5)?;

    assert_eq!(list.items(), vec![5]);
    Ok(())
}

#[tokio::test]
async fn test_add_rejects_duplicate_key() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<u32>::new();
    list.add(1)?;
    let mut stream = list.connect()?;
    let _snapshot = stream.next().await;

    // Act
    let added = list.add(1)?;

    // Assert
    assert!(!added);
    assert_eq!(list.items(), vec![1]);
    assert!(stream.next().now_or_never().is_none());
    Ok(())
}

#[test]
fn test_add_range_skips_duplicate_keys() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<u32>::new();
    list.add(2)?;

    // Act
    let added = list.add_range([1, 2, 3, 1])?;

    // Assert
    assert_eq!(added, 2);
    assert_eq!(list.items(), vec![2, 1, 3]);
    Ok(())
}

#[test]
fn test_replace_rejects_key_of_another_item() -> anyhow::Result<()> {
    // Arrange
    let list = SourceList::<u32>::new();
    list.add_range([1, 2])?;

    // Act
    let replaced = list.replace(&1, 2)?;

    // Assert
    assert!(!replaced);
    assert_eq!(list.items(), vec![1, 2]);
    Ok(())
}
