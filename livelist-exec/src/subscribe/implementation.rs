// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::{error, info};
use async_trait::async_trait;
use core::future::Future;
use core::pin::pin;
use futures::{Stream, StreamExt};
use livelist_core::{Result, StreamItem};
use tokio_util::sync::CancellationToken;

/// Extension trait providing async subscription capabilities for streams.
///
/// Every value is handed to the handler in arrival order, and the next value
/// is not pulled before the handler's future has completed.
#[async_trait]
pub trait SubscribeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Processes every value of the stream with `on_next_func`.
    ///
    /// Handler failures are reported to `on_error_callback` and do not stop
    /// the subscription. The subscription ends when the stream ends, when it
    /// yields an error, or when `cancellation_token` is cancelled. The token is
    /// also passed to every handler invocation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use livelist_core::StreamItem;
    /// use livelist_exec::SubscribeExt;
    /// use futures::stream;
    /// use std::sync::{Arc, Mutex};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    ///
    /// stream::iter([StreamItem::Value(1), StreamItem::Value(2)])
    ///     .subscribe(
    ///         move |value, _| {
    ///             let sink = Arc::clone(&sink);
    ///             async move {
    ///                 sink.lock().unwrap().push(value);
    ///                 Ok::<(), std::io::Error>(())
    ///             }
    ///         },
    ///         |_: std::io::Error| {},
    ///         None,
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the upstream [`LiveListError`](livelist_core::LiveListError)
    /// if the stream fails. Handler errors are never returned.
    async fn subscribe<F, Fut, E, OnError>(
        self,
        on_next_func: F,
        on_error_callback: OnError,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: Fn(T, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        OnError: Fn(E) + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static;
}

#[async_trait]
impl<S, T> SubscribeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe<F, Fut, E, OnError>(
        self,
        on_next_func: F,
        on_error_callback: OnError,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: Fn(T, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        OnError: Fn(E) + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        subscribe_impl(self, on_next_func, on_error_callback, cancellation_token).await
    }
}

pub(crate) async fn subscribe_impl<S, T, F, Fut, E, OnError>(
    stream: S,
    on_next_func: F,
    on_error_callback: OnError,
    cancellation_token: Option<CancellationToken>,
) -> Result<()>
where
    S: Stream<Item = StreamItem<T>>,
    F: Fn(T, CancellationToken) -> Fut,
    Fut: Future<Output = core::result::Result<(), E>>,
    OnError: Fn(E),
{
    let cancellation_token = cancellation_token.unwrap_or_default();
    let mut stream = pin!(stream);

    loop {
        let item = tokio::select! {
            biased;
            () = cancellation_token.cancelled() => {
                info!("subscribe: cancelled");
                return Ok(());
            }
            item = stream.next() => item,
        };

        match item {
            Some(StreamItem::Value(value)) => {
                if let Err(err) = on_next_func(value, cancellation_token.clone()).await {
                    on_error_callback(err);
                }
            }
            Some(StreamItem::Error(err)) => {
                error!("subscribe: upstream failed: {}", err);
                return Err(err);
            }
            None => return Ok(()),
        }
    }
}
