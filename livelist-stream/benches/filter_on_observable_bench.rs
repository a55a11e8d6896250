// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::executor::block_on;
use futures::stream::{self, StreamExt};
use livelist_core::{BehaviorSubject, ChangeSet, StreamItem};
use livelist_stream::FilterOnObservableExt;
use std::hint::black_box;

/// One flag per item, every other one raised.
fn make_flags(size: usize) -> Vec<BehaviorSubject<bool>> {
    (0..size).map(|i| BehaviorSubject::new(i % 2 == 0)).collect()
}

pub fn bench_filter_on_observable(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_on_observable_settle");
    let sizes = [100usize, 1000usize];
    let batch_sizes = [1usize, 100usize];

    for &size in &sizes {
        for &batch in &batch_sizes {
            let id = BenchmarkId::from_parameter(format!("m{size}_b{batch}"));
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(id, &(size, batch), |bencher, &(size, batch)| {
                bencher.iter(|| {
                    let ids: Vec<usize> = (0..size).collect();
                    let batches: Vec<_> = ids
                        .chunks(batch)
                        .map(|chunk| StreamItem::Value(ChangeSet::from_adds(chunk.iter().copied())))
                        .collect();

                    // One-shot conditions complete, so the operator ends with its source
                    let filtered = stream::iter(batches).filter_on_observable(
                        |i: &usize| stream::iter([StreamItem::Value(*i % 2 == 0)]),
                        |flag: &bool| *flag,
                    );

                    block_on(async move {
                        let mut s = Box::pin(filtered);
                        while let Some(v) = s.next().await {
                            black_box(v);
                        }
                    });
                });
            });
        }
    }

    group.finish();
}

pub fn bench_filter_on_observable_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_on_observable_toggle");
    let sizes = [100usize, 1000usize];

    for &size in &sizes {
        let id = BenchmarkId::from_parameter(format!("m{size}"));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(id, &size, |bencher, &size| {
            bencher.iter(|| {
                let flags = make_flags(size);
                let selector_flags = flags.clone();
                let source = stream::iter(vec![StreamItem::Value(ChangeSet::from_adds(0..size))])
                    .chain(stream::pending());
                let mut filtered = Box::pin(source.filter_on_observable(
                    move |i: &usize| selector_flags[*i].clone(),
                    |flag: &bool| *flag,
                ));

                block_on(async {
                    black_box(filtered.next().await);
                    for flag in &flags {
                        let _ = flag.next(!flag.value());
                    }
                    black_box(filtered.next().await);
                });
            });
        });
    }

    group.finish();
}
