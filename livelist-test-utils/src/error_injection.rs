// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for error injection in streams.
//!
//! [`ErrorInjectingStream`] wraps plain values in `StreamItem::Value` and
//! yields a `StreamItem::Error` at a chosen position, which is how tests make
//! an upstream or a condition stream fail.

use futures::Stream;
use livelist_core::{LiveListError, StreamItem};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A stream wrapper that injects an error at a specified position.
///
/// # Examples
///
/// ```rust
/// use livelist_test_utils::ErrorInjectingStream;
/// use futures::{stream, StreamExt};
///
/// # async fn example() {
/// let mut flags = ErrorInjectingStream::new(stream::iter([true, false]), 1);
///
/// assert!(flags.next().await.unwrap().is_value());
/// assert!(flags.next().await.unwrap().is_error());
/// assert!(flags.next().await.is_none());
/// # }
/// ```
pub struct ErrorInjectingStream<S> {
    inner: S,
    error_at: usize,
    count: usize,
    done: bool,
}

impl<S> ErrorInjectingStream<S> {
    /// Yields an error as item number `error_at` (zero based), then ends.
    pub const fn new(inner: S, error_at: usize) -> Self {
        Self {
            inner,
            error_at,
            count: 0,
            done: false,
        }
    }
}

impl<S> Stream for ErrorInjectingStream<S>
where
    S: Stream + Unpin,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        if self.count == self.error_at {
            self.done = true;
            return Poll::Ready(Some(StreamItem::Error(LiveListError::stream_error(
                format!("Injected error at position {}", self.error_at),
            ))));
        }

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(value)) => {
                self.count += 1;
                Poll::Ready(Some(StreamItem::Value(value)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
