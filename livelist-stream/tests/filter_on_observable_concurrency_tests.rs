// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use livelist_core::{Change, ChangeSet, SourceList};
use livelist_stream::FilterOnObservableExt;
use livelist_test_utils::player::Player;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Applies `changes` to a set of player identities, rejecting duplicates and orphans.
fn record(view: &mut HashSet<usize>, changes: ChangeSet<Arc<Player>>) {
    for change in changes {
        match change {
            Change::Add(p) => assert!(view.insert(Arc::as_ptr(&p) as usize), "duplicate add"),
            Change::Remove(p) => {
                assert!(view.remove(&(Arc::as_ptr(&p) as usize)), "orphan removal");
            }
            other => panic!("unexpected change {other:?}"),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_filter_on_observable_concurrent_toggling_converges() -> anyhow::Result<()> {
    // Arrange
    let players: Vec<Arc<Player>> = (0..16).map(|i| Player::new(format!("P{i}"))).collect();
    let list = SourceList::new();
    list.add_range(players.iter().cloned())?;
    let mut filtered = list
        .connect()?
        .filter_on_observable(|p: &Arc<Player>| p.included_changed(), |i: &bool| *i);

    // Act: every player flips its own flag from its own task
    let togglers: Vec<_> = players
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, player)| {
            tokio::spawn(async move {
                for round in 0..50 {
                    if (round + index) % 2 == 0 {
                        player.include()?;
                    } else {
                        player.exclude()?;
                    }
                    tokio::task::yield_now().await;
                }
                if index % 3 == 0 {
                    player.include()
                } else {
                    player.exclude()
                }
            })
        })
        .collect();

    let mut view: HashSet<usize> = HashSet::new();
    let consumer = async {
        while let Ok(Some(item)) = timeout(Duration::from_millis(300), filtered.next()).await {
            record(&mut view, item.unwrap());
        }
    };
    let (_, joined) = tokio::join!(consumer, futures::future::join_all(togglers));
    for result in joined {
        result??;
    }

    // Drain whatever arrived after the togglers finished
    while let Ok(Some(item)) = timeout(Duration::from_millis(300), filtered.next()).await {
        record(&mut view, item.unwrap());
    }

    // Assert
    let expected: HashSet<usize> = players
        .iter()
        .filter(|p| p.is_included())
        .map(|p| Arc::as_ptr(p) as usize)
        .collect();
    assert_eq!(expected.len(), 6);
    assert_eq!(view, expected);
    assert_eq!(filtered.matched_count(), 6);
    Ok(())
}
