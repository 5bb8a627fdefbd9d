//! Tiles and the board.
//!
//! A board holds `TILE_COUNT` tiles. Each of the `PAIR_COUNT` tones appears
//! on exactly two of them. Tiles are matched by ear: the tone plays when a
//! tile is flipped, and the theme's symbol is only meaningful once matched.

use derive_more::{Display, Error};
use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Number of distinct tones on a board.
pub const PAIR_COUNT: usize = 8;

/// Number of tiles on a board.
pub const TILE_COUNT: usize = PAIR_COUNT * 2;

/// Position of a tile on the board, in `0..TILE_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Board position as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Tone category, in `0..PAIR_COUNT`. Two tiles match when their tones are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToneId(pub u8);

impl ToneId {
    /// Create a new tone ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Tone as an index, used for `tone mod len` table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ToneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tone({})", self.0)
    }
}

/// A single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub tone: ToneId,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Tile {
    /// Create a face-down, unmatched tile.
    #[must_use]
    pub const fn new(id: TileId, tone: ToneId) -> Self {
        Self {
            id,
            tone,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Can this tile be flipped by a selection?
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}

/// Failure to build a board from an explicit tone layout.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display("expected {expected} tiles, got {actual}")]
    WrongTileCount { expected: usize, actual: usize },

    #[display("tone {tone} is outside 0..{limit}")]
    ToneOutOfRange { tone: u8, limit: usize },

    #[display("tone {tone} appears {count} times, expected 2")]
    UnpairedTone { tone: u8, count: usize },
}

/// The ordered tile sequence.
///
/// Backed by `im::Vector` so state snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vector<Tile>,
}

impl Board {
    /// Deal a fresh board by shuffling the tone multiset.
    pub fn deal(rng: &mut GameRng) -> Self {
        let mut tones: Vec<ToneId> = (0..2)
            .flat_map(|_| (0..PAIR_COUNT as u8).map(ToneId))
            .collect();
        rng.shuffle(&mut tones);
        Self::from_tone_ids(tones)
    }

    /// Build a board from an explicit layout, one tone per position.
    ///
    /// ```
    /// use sound_memory::core::{Board, BoardError};
    ///
    /// let board = Board::from_tones(&[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7]).unwrap();
    /// assert_eq!(board.len(), 16);
    ///
    /// let err = Board::from_tones(&[0, 1]).unwrap_err();
    /// assert!(matches!(err, BoardError::WrongTileCount { .. }));
    /// ```
    pub fn from_tones(tones: &[u8]) -> Result<Self, BoardError> {
        if tones.len() != TILE_COUNT {
            return Err(BoardError::WrongTileCount {
                expected: TILE_COUNT,
                actual: tones.len(),
            });
        }

        let mut counts: FxHashMap<u8, usize> = FxHashMap::default();
        for &tone in tones {
            if tone as usize >= PAIR_COUNT {
                return Err(BoardError::ToneOutOfRange {
                    tone,
                    limit: PAIR_COUNT,
                });
            }
            *counts.entry(tone).or_insert(0) += 1;
        }

        for tone in 0..PAIR_COUNT as u8 {
            let count = counts.get(&tone).copied().unwrap_or(0);
            if count != 2 {
                return Err(BoardError::UnpairedTone { tone, count });
            }
        }

        Ok(Self::from_tone_ids(tones.iter().copied().map(ToneId)))
    }

    fn from_tone_ids(tones: impl IntoIterator<Item = ToneId>) -> Self {
        let tiles = tones
            .into_iter()
            .enumerate()
            .map(|(i, tone)| Tile::new(TileId(i as u8), tone))
            .collect();
        Self { tiles }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile. Unknown ids yield `None`.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    /// Iterate over tiles in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tiles carrying `tone`, in board order.
    #[must_use]
    pub fn positions_of(&self, tone: ToneId) -> SmallVec<[TileId; 2]> {
        self.tiles
            .iter()
            .filter(|t| t.tone == tone)
            .map(|t| t.id)
            .collect()
    }

    /// Number of tiles already matched.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_matched).count()
    }

    /// True once every tile is matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.tiles.iter().all(|t| t.is_matched)
    }

    /// Tone histogram, used by invariant checks.
    pub(crate) fn tone_counts(&self) -> FxHashMap<ToneId, usize> {
        let mut counts = FxHashMap::default();
        for tile in &self.tiles {
            *counts.entry(tile.tone).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_layout() -> Vec<u8> {
        (0..PAIR_COUNT as u8).flat_map(|t| [t, t]).collect()
    }

    #[test]
    fn test_deal_pairs_every_tone() {
        let mut rng = GameRng::new(42);
        let board = Board::deal(&mut rng);

        assert_eq!(board.len(), TILE_COUNT);
        for tone in 0..PAIR_COUNT as u8 {
            assert_eq!(board.positions_of(ToneId(tone)).len(), 2);
        }
    }

    #[test]
    fn test_deal_ids_follow_positions() {
        let mut rng = GameRng::new(3);
        let board = Board::deal(&mut rng);

        for (i, tile) in board.iter().enumerate() {
            assert_eq!(tile.id.index(), i);
            assert!(tile.is_selectable());
        }
    }

    #[test]
    fn test_from_tones_accepts_valid_layout() {
        let board = Board::from_tones(&sorted_layout()).unwrap();
        assert_eq!(board.get(TileId(3)).map(|t| t.tone), Some(ToneId(1)));
        assert_eq!(board.positions_of(ToneId(7)).as_slice(), &[TileId(14), TileId(15)]);
    }

    #[test]
    fn test_from_tones_rejects_out_of_range() {
        let mut layout = sorted_layout();
        layout[0] = 8;

        let err = Board::from_tones(&layout).unwrap_err();
        assert_eq!(err, BoardError::ToneOutOfRange { tone: 8, limit: PAIR_COUNT });
    }

    #[test]
    fn test_from_tones_rejects_triple() {
        let mut layout = sorted_layout();
        layout[2] = 0;

        let err = Board::from_tones(&layout).unwrap_err();
        assert_eq!(err, BoardError::UnpairedTone { tone: 0, count: 3 });
        assert_eq!(err.to_string(), "tone 0 appears 3 times, expected 2");
    }

    #[test]
    fn test_unknown_tile_is_none() {
        let board = Board::from_tones(&sorted_layout()).unwrap();
        assert!(board.get(TileId(16)).is_none());
        assert!(board.get(TileId(255)).is_none());
    }

    #[test]
    fn test_matched_count() {
        let mut board = Board::from_tones(&sorted_layout()).unwrap();
        assert_eq!(board.matched_count(), 0);
        assert!(!board.all_matched());

        for tile in [TileId(0), TileId(1)] {
            board.get_mut(tile).unwrap().is_matched = true;
        }
        assert_eq!(board.matched_count(), 2);
    }
}
