// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task handle with cooperative cancellation.

use core::future::Future;
use tokio_util::sync::CancellationToken;

/// Handle to a spawned background task, cancelled when dropped.
///
/// The spawned future receives a [`CancellationToken`] and is expected to stop
/// at its next checkpoint once the token fires. Dropping the handle cancels
/// the token, which is how consumers such as bound lists tear down the stream
/// chain they drive.
///
/// # Example
///
/// ```rust
/// use livelist_core::LiveTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = LiveTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct LiveTask {
    cancel: CancellationToken,
}

impl LiveTask {
    /// Spawns `f(token)` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signals the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LiveTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
