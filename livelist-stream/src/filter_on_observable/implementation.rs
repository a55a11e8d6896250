// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::gate::{Gate, Predicate, Selector};
use super::{ConditionStream, FilterOnObservableOptions};
use crate::logging::error;
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::FusedStream;
use futures::Stream;
use livelist_core::{ChangeSet, IntoStream, Keyed, LiveListError, Result, StreamItem};
use pin_project::pin_project;

/// Extension trait providing the `filter_on_observable` operator for change-set streams.
///
/// See the [module-level documentation](crate::filter_on_observable) for the
/// full behavior.
pub trait FilterOnObservableExt<T>: Stream<Item = StreamItem<ChangeSet<T>>> + Sized
where
    T: Keyed + Clone + Send + 'static,
{
    /// Keeps the items whose latest condition value satisfies `predicate`.
    ///
    /// `selector` is called once per added item and returns that item's
    /// condition stream. Every value the condition emits is run through
    /// `predicate`; a `true` brings the item into the result, a `false` takes it
    /// out. Each transition is emitted as a `Change::Add` or `Change::Remove`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use livelist_core::{BehaviorSubject, ChangeSet, StreamItem};
    /// use livelist_stream::FilterOnObservableExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let online = BehaviorSubject::new(true);
    /// let offline = BehaviorSubject::new(false);
    /// let (a, b) = (online.clone(), offline.clone());
    ///
    /// let source = stream::iter(vec![StreamItem::Value(ChangeSet::from_adds([1_u32, 2]))]);
    /// let mut reachable = source.filter_on_observable(
    ///     move |id: &u32| if *id == 1 { a.clone() } else { b.clone() },
    ///     |up: &bool| *up,
    /// );
    ///
    /// let first = reachable.next().await.unwrap().unwrap();
    /// assert_eq!(first.added().copied().collect::<Vec<_>>(), vec![1]);
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// The first upstream error, condition-stream error or duplicate `Add` is
    /// emitted once and ends the stream.
    fn filter_on_observable<V, IS>(
        self,
        selector: impl Fn(&T) -> IS + Send + Sync + 'static,
        predicate: impl Fn(&V) -> bool + Send + Sync + 'static,
    ) -> FilterOnObservable<Self, T, V>
    where
        V: Send + 'static,
        IS: IntoStream<Item = StreamItem<V>>,
        IS::Stream: Send + 'static;

    /// Like [`filter_on_observable`](Self::filter_on_observable) with a fallible
    /// predicate and explicit options.
    ///
    /// # Errors
    ///
    /// A predicate error becomes `LiveListError::PredicateError`. Whether it,
    /// and condition-stream errors, end the stream is decided by
    /// [`FilterOnObservableOptions::item_errors`].
    fn try_filter_on_observable<V, IS>(
        self,
        selector: impl Fn(&T) -> IS + Send + Sync + 'static,
        predicate: impl Fn(&V) -> Result<bool> + Send + Sync + 'static,
        options: FilterOnObservableOptions,
    ) -> FilterOnObservable<Self, T, V>
    where
        V: Send + 'static,
        IS: IntoStream<Item = StreamItem<V>>,
        IS::Stream: Send + 'static;
}

impl<S, T> FilterOnObservableExt<T> for S
where
    S: Stream<Item = StreamItem<ChangeSet<T>>>,
    T: Keyed + Clone + Send + 'static,
{
    fn filter_on_observable<V, IS>(
        self,
        selector: impl Fn(&T) -> IS + Send + Sync + 'static,
        predicate: impl Fn(&V) -> bool + Send + Sync + 'static,
    ) -> FilterOnObservable<Self, T, V>
    where
        V: Send + 'static,
        IS: IntoStream<Item = StreamItem<V>>,
        IS::Stream: Send + 'static,
    {
        FilterOnObservable::new(
            self,
            selector,
            move |value: &V| Ok(predicate(value)),
            FilterOnObservableOptions::default(),
        )
    }

    fn try_filter_on_observable<V, IS>(
        self,
        selector: impl Fn(&T) -> IS + Send + Sync + 'static,
        predicate: impl Fn(&V) -> Result<bool> + Send + Sync + 'static,
        options: FilterOnObservableOptions,
    ) -> FilterOnObservable<Self, T, V>
    where
        V: Send + 'static,
        IS: IntoStream<Item = StreamItem<V>>,
        IS::Stream: Send + 'static,
    {
        FilterOnObservable::new(self, selector, predicate, options)
    }
}

/// Stream returned by [`filter_on_observable`](FilterOnObservableExt::filter_on_observable).
///
/// Holds the source, one subscription per present item and the set of matched
/// items. Dropping it releases all of them.
#[pin_project]
pub struct FilterOnObservable<S, T: Keyed, V> {
    #[pin]
    source: Option<S>,
    gate: Gate<T, V>,
    terminated: bool,
}

impl<S, T, V> FilterOnObservable<S, T, V>
where
    S: Stream<Item = StreamItem<ChangeSet<T>>>,
    T: Keyed + Clone + Send + 'static,
    V: Send + 'static,
{
    pub fn new<IS>(
        source: S,
        selector: impl Fn(&T) -> IS + Send + Sync + 'static,
        predicate: impl Fn(&V) -> Result<bool> + Send + Sync + 'static,
        options: FilterOnObservableOptions,
    ) -> Self
    where
        IS: IntoStream<Item = StreamItem<V>>,
        IS::Stream: Send + 'static,
    {
        let selector: Selector<T, V> =
            Box::new(move |item: &T| -> ConditionStream<V> { Box::pin(selector(item).into_stream()) });
        let predicate: Predicate<V> = Box::new(predicate);

        Self {
            source: Some(source),
            gate: Gate::new(selector, predicate, options.item_errors),
            terminated: false,
        }
    }

    /// Number of items whose condition stream is still subscribed.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.gate.live_conditions()
    }

    /// Number of items currently in the result set.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.gate.matched()
    }
}

impl<S, T, V> Stream for FilterOnObservable<S, T, V>
where
    S: Stream<Item = StreamItem<ChangeSet<T>>>,
    T: Keyed + Clone,
{
    type Item = StreamItem<ChangeSet<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.terminated {
            return Poll::Ready(None);
        }

        let mut out = ChangeSet::new();

        while let Some(source) = this.source.as_mut().as_pin_mut() {
            match source.poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(changes))) => {
                    if let Err(e) = this.gate.apply(changes, &mut out, cx) {
                        return terminate(this.source, this.gate, this.terminated, e);
                    }
                    if !out.is_empty() {
                        return Poll::Ready(Some(StreamItem::Value(out)));
                    }
                }
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    return terminate(this.source, this.gate, this.terminated, e);
                }
                Poll::Ready(None) => this.source.set(None),
                Poll::Pending => break,
            }
        }

        if let Err(e) = this.gate.poll_conditions(&mut out, cx) {
            return terminate(this.source, this.gate, this.terminated, e);
        }
        if !out.is_empty() {
            return Poll::Ready(Some(StreamItem::Value(out)));
        }

        if this.source.is_none() && this.gate.live_conditions() == 0 {
            *this.terminated = true;
            this.gate.clear();
            return Poll::Ready(None);
        }

        Poll::Pending
    }
}

/// Ends the stream with `err`, releasing the source and every subscription.
fn terminate<S, T, V>(
    mut source: Pin<&mut Option<S>>,
    gate: &mut Gate<T, V>,
    terminated: &mut bool,
    err: LiveListError,
) -> Poll<Option<StreamItem<ChangeSet<T>>>>
where
    T: Keyed + Clone,
{
    error!("filter_on_observable: terminating after error: {}", err);
    source.set(None);
    gate.clear();
    *terminated = true;
    Poll::Ready(Some(StreamItem::Error(err)))
}

impl<S, T, V> FusedStream for FilterOnObservable<S, T, V>
where
    S: Stream<Item = StreamItem<ChangeSet<T>>>,
    T: Keyed + Clone,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<S, T: Keyed, V> fmt::Debug for FilterOnObservable<S, T, V>
where
    T: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOnObservable")
            .field("source_done", &self.source.is_none())
            .field("subscriptions", &self.gate.live_conditions())
            .field("matched", &self.gate.matched())
            .field("terminated", &self.terminated)
            .finish()
    }
}
