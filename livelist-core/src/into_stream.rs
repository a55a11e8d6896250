// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{BehaviorSubject, StreamItem, SubjectStream};
use futures::stream::{self, Stream};

/// A trait for types that can be converted into a `Stream`.
///
/// Condition selectors return `impl IntoStream`, so a selector can hand back a
/// plain stream or a [`BehaviorSubject`] it owns a handle to.
pub trait IntoStream {
    /// The type of items in the stream.
    type Item;
    /// The stream type that this object can be converted into.
    type Stream: Stream<Item = Self::Item>;

    /// Converts this object into a stream.
    fn into_stream(self) -> Self::Stream;
}

/// Any stream converts into itself.
impl<S> IntoStream for S
where
    S: Stream,
{
    type Item = S::Item;
    type Stream = S;

    fn into_stream(self) -> Self::Stream {
        self
    }
}

/// Subscribes to the subject. A closed subject converts into an empty stream,
/// the same thing a subscriber sees when the subject closes later on.
impl<T: Clone + Send + 'static> IntoStream for BehaviorSubject<T> {
    type Item = StreamItem<T>;
    type Stream = SubjectStream<T>;

    fn into_stream(self) -> Self::Stream {
        self.subscribe()
            .unwrap_or_else(|_| Box::pin(stream::empty()))
    }
}
