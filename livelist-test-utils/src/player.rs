// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use livelist_core::{BehaviorSubject, LiveListError, SourceList, SubjectError};
use std::fmt::{self, Display};
use std::sync::Arc;

/// A squad member whose "included" flag changes over time.
///
/// Players are shared as `Arc<Player>`, so two players with the same name are
/// still different items.
pub struct Player {
    pub name: String,
    included: BehaviorSubject<bool>,
}

impl Player {
    /// A player that is not included yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            included: BehaviorSubject::new(false),
        })
    }

    /// Condition stream source: replays the current flag, then every change.
    #[must_use]
    pub fn included_changed(&self) -> BehaviorSubject<bool> {
        self.included.clone()
    }

    /// # Errors
    ///
    /// Returns `SubjectError::Closed` after [`retire`](Self::retire) or [`fail`](Self::fail).
    pub fn include(&self) -> Result<(), SubjectError> {
        self.included.next(true)
    }

    /// # Errors
    ///
    /// Returns `SubjectError::Closed` after [`retire`](Self::retire) or [`fail`](Self::fail).
    pub fn exclude(&self) -> Result<(), SubjectError> {
        self.included.next(false)
    }

    #[must_use]
    pub fn is_included(&self) -> bool {
        self.included.value()
    }

    /// Fails the flag stream of every subscriber.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the flag was already closed.
    pub fn fail(&self, err: LiveListError) -> Result<(), SubjectError> {
        self.included.error(err)
    }

    /// Completes the flag stream, freezing its last value.
    pub fn retire(&self) {
        self.included.close();
    }

    /// Live subscriptions to this player's flag.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.included.subscriber_count()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("included", &self.is_included())
            .finish()
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player[name={}, included={}]", self.name, self.is_included())
    }
}

#[must_use]
pub fn player_hennessey() -> Arc<Player> {
    Player::new("Hennessey")
}

#[must_use]
pub fn player_chester() -> Arc<Player> {
    Player::new("Chester")
}

#[must_use]
pub fn player_williams() -> Arc<Player> {
    Player::new("Williams")
}

/// The default squad loaded into a fresh source list.
///
/// # Panics
///
/// Never in practice: a fresh list is open.
#[must_use]
pub fn squad() -> (SourceList<Arc<Player>>, [Arc<Player>; 3]) {
    let players = [player_hennessey(), player_chester(), player_williams()];
    let list = SourceList::new();
    list.add_range(players.iter().cloned())
        .unwrap_or_else(|_| unreachable!("fresh source list accepts edits"));
    (list, players)
}
