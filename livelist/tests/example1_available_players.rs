// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use livelist::prelude::*;
use livelist_test_utils::helpers::sorted_names;
use livelist_test_utils::player::{squad, Player};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(1);

#[tokio::test]
async fn test_available_and_selected_players_stay_complementary() -> anyhow::Result<()> {
    // Build the two views a team-sheet screen shows over one squad
    let (list, [hennessey, chester, williams]) = squad();
    let available = list
        .connect()?
        .filter_on_observable(|p: &Arc<Player>| p.included_changed(), |included: &bool| !*included)
        .bind();
    let selected = list
        .connect()?
        .filter_on_observable(|p: &Arc<Player>| p.included_changed(), |included: &bool| *included)
        .bind();

    // Nobody is picked yet
    assert!(timeout(WAIT, available.wait_until(|p| p.len() == 3)).await?);
    assert!(selected.is_empty());

    // Pick two players
    hennessey.include()?;
    williams.include()?;

    assert!(timeout(WAIT, selected.wait_until(|p| p.len() == 2)).await?);
    assert!(timeout(WAIT, available.wait_until(|p| p.len() == 1)).await?);
    assert_eq!(sorted_names(&selected.items()), vec!["Hennessey", "Williams"]);
    assert_eq!(sorted_names(&available.items()), vec!["Chester"]);

    // Drop one back to the bench
    hennessey.exclude()?;

    assert!(timeout(WAIT, selected.wait_until(|p| p.len() == 1)).await?);
    assert!(timeout(WAIT, available.wait_until(|p| p.len() == 2)).await?);
    assert!(available.contains(&hennessey));
    assert!(available.contains(&chester));
    assert!(selected.contains(&williams));

    Ok(())
}

#[tokio::test]
async fn test_players_joining_and_leaving_the_squad() -> anyhow::Result<()> {
    let (list, [hennessey, _, _]) = squad();
    let available = list
        .connect()?
        .filter_on_observable(|p: &Arc<Player>| p.included_changed(), |included: &bool| !*included)
        .bind();
    assert!(timeout(WAIT, available.wait_until(|p| p.len() == 3)).await?);

    // A new signing is available straight away, a picked one is not
    let (rookie, veteran) = (Player::new("Rookie"), Player::new("Veteran"));
    veteran.include()?;
    list.add_range([Arc::clone(&rookie), Arc::clone(&veteran)])?;

    assert!(timeout(WAIT, available.wait_until(|p| p.len() == 4)).await?);
    assert!(available.contains(&rookie));
    assert!(!available.contains(&veteran));

    // Leaving the squad takes a player out whatever the flag says
    list.remove(&hennessey)?;
    assert!(timeout(WAIT, available.wait_until(|p| p.len() == 3)).await?);
    assert!(!available.contains(&hennessey));

    // The departed player's flag is no longer observed
    assert_eq!(hennessey.subscriber_count(), 0);

    Ok(())
}
