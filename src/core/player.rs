//! Player identification and the per-game roster.
//!
//! ## PlayerId
//!
//! Seat index into the roster. The first player is `PlayerId(0)`.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//! The engine keeps its roster of [`Player`]s in one.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of players seated in every game.
pub const PLAYER_COUNT: usize = 2;

/// Seat index of a player in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one, wrapping around the table.
    ///
    /// ```
    /// use sound_memory::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// A seated player.
///
/// Identity and name survive replays; only `score` is reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat in the roster.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Pairs matched this game.
    pub score: u32,
}

impl Player {
    /// Create a player with a zero score.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use sound_memory::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::new(2, |_| 0);
/// scores[PlayerId::new(1)] += 1;
/// assert_eq!(scores[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `player` is seated in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate mutably over values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Seat 1");
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(PlayerId::new(0).next(PLAYER_COUNT), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(PLAYER_COUNT), PlayerId::new(0));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    }

    #[test]
    fn test_player_new_has_zero_score() {
        let player = Player::new(PlayerId::new(1), "Ada");
        assert_eq!(player.score, 0);
        assert_eq!(player.name, "Ada");
    }

    #[test]
    fn test_roster_mutation() {
        let mut roster = PlayerMap::new(PLAYER_COUNT, |id| Player::new(id, format!("P{}", id.0)));

        roster[PlayerId::new(1)].score += 2;
        assert_eq!(roster[PlayerId::new(0)].score, 0);
        assert_eq!(roster[PlayerId::new(1)].score, 2);

        for player in roster.values_mut() {
            player.score = 0;
        }
        assert!(roster.values().all(|p| p.score == 0));
    }

    #[test]
    fn test_contains() {
        let map: PlayerMap<u32> = PlayerMap::new(2, |_| 0);
        assert!(map.contains(PlayerId::new(1)));
        assert!(!map.contains(PlayerId::new(2)));
    }

    #[test]
    fn test_iter_pairs_in_seat_order() {
        let map: PlayerMap<usize> = PlayerMap::new(3, |p| p.index() * 10);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (PlayerId::new(0), &0));
        assert_eq!(pairs[2], (PlayerId::new(2), &20));
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u32> = PlayerMap::new(0, |_| 0);
    }
}
