// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream;
use livelist_core::{CancellationToken, LiveListError, StreamItem};
use livelist_exec::SubscribeExt;
use livelist_test_utils::{test_channel, test_channel_with_errors};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};

#[derive(Debug, thiserror::Error)]
#[error("handler rejected {0}")]
struct Rejected(u32);

#[tokio::test]
async fn test_subscribe_processes_values_in_order() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let source = stream::iter([1_u32, 2, 3].map(StreamItem::Value));

    // Act
    source
        .subscribe(
            move |value, _| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().await.push(value);
                    Ok::<(), Rejected>(())
                }
            },
            |_: Rejected| {},
            None,
        )
        .await?;

    // Assert
    assert_eq!(*seen.lock().await, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn test_subscribe_reports_handler_errors_and_continues() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let errors = Arc::new(std::sync::Mutex::new(Vec::new()));
    let (sink, error_sink) = (Arc::clone(&seen), Arc::clone(&errors));
    let source = stream::iter([1_u32, 2, 3, 4].map(StreamItem::Value));

    // Act
    source
        .subscribe(
            move |value, _| {
                let sink = Arc::clone(&sink);
                async move {
                    if value % 2 == 0 {
                        return Err(Rejected(value));
                    }
                    sink.lock().await.push(value);
                    Ok(())
                }
            },
            move |err: Rejected| {
                if let Ok(mut errors) = error_sink.lock() {
                    errors.push(err.0);
                }
            },
            None,
        )
        .await?;

    // Assert
    assert_eq!(*seen.lock().await, vec![1, 3]);
    assert_eq!(*errors.lock().unwrap(), vec![2, 4]);
    Ok(())
}

#[tokio::test]
async fn test_subscribe_returns_upstream_error() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors::<u32>();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    tx.send(StreamItem::Value(7))?;
    tx.send(StreamItem::Error(LiveListError::stream_error("feed lost")))?;
    tx.send(StreamItem::Value(8))?;

    // Act
    let result = source
        .subscribe(
            move |value, _| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().await.push(value);
                    Ok::<(), Rejected>(())
                }
            },
            |_: Rejected| {},
            None,
        )
        .await;

    // Assert
    assert!(matches!(
        result,
        Err(LiveListError::StreamProcessingError { .. })
    ));
    assert_eq!(*seen.lock().await, vec![7]);
    Ok(())
}

#[tokio::test]
async fn test_subscribe_stops_on_cancellation() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let token = CancellationToken::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handle = tokio::spawn(source.subscribe(
        move |value, _| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().await.push(value);
                Ok::<(), Rejected>(())
            }
        },
        |_: Rejected| {},
        Some(token.clone()),
    ));
    tx.send(1)?;
    sleep(Duration::from_millis(50)).await;

    // Act
    token.cancel();
    let result = timeout(Duration::from_millis(500), handle).await??;

    // Assert
    assert!(result.is_ok());
    assert_eq!(*seen.lock().await, vec![1]);
    assert!(tx.send(2).is_err());
    Ok(())
}

#[tokio::test]
async fn test_subscribe_handler_can_cancel_through_its_token() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let token = CancellationToken::new();
    let source = stream::iter([1_u32, 2, 3, 4].map(StreamItem::Value));

    // Act
    source
        .subscribe(
            move |value, handler_token: CancellationToken| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().await.push(value);
                    if value == 2 {
                        handler_token.cancel();
                    }
                    Ok::<(), Rejected>(())
                }
            },
            |_: Rejected| {},
            Some(token.clone()),
        )
        .await?;

    // Assert
    assert_eq!(*seen.lock().await, vec![1, 2]);
    assert!(token.is_cancelled());
    Ok(())
}
