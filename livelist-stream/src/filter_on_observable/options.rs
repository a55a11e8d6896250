// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// What a condition-stream or predicate failure does to the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemErrorPolicy {
    /// Forward the error downstream and end the stream.
    #[default]
    Terminate,
    /// Drop only the failing item: it leaves the result set (emitting a
    /// `Remove` if it was matched) and stays out until upstream removes and
    /// re-adds it.
    Isolate,
}

/// Run-time options of [`FilterOnObservable`](super::FilterOnObservable).
///
/// ```
/// use livelist_stream::{FilterOnObservableOptions, ItemErrorPolicy};
///
/// let options = FilterOnObservableOptions::new().item_errors(ItemErrorPolicy::Isolate);
/// assert_eq!(options.item_errors, ItemErrorPolicy::Isolate);
/// assert_eq!(FilterOnObservableOptions::default().item_errors, ItemErrorPolicy::Terminate);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOnObservableOptions {
    pub item_errors: ItemErrorPolicy,
}

impl FilterOnObservableOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            item_errors: ItemErrorPolicy::Terminate,
        }
    }

    #[must_use]
    pub const fn item_errors(mut self, policy: ItemErrorPolicy) -> Self {
        self.item_errors = policy;
        self
    }

    /// Shorthand for `item_errors(ItemErrorPolicy::Isolate)`.
    #[must_use]
    pub const fn isolate_item_errors(self) -> Self {
        self.item_errors(ItemErrorPolicy::Isolate)
    }
}
