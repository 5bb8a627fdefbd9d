//! Game state: the single source of truth a presentation layer renders.
//!
//! ## GameState
//!
//! - Board (tiles in position order)
//! - Roster and whose turn it is
//! - Selection buffer (0-2 face-up, unresolved tiles)
//! - Turn counter, game-over flag and winner
//! - Active theme (display only)
//!
//! Cloning is cheap: the board is an `im::Vector`.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
use super::tile::{Board, Tile, TileId, ToneId, PAIR_COUNT, TILE_COUNT};
use crate::rules::GameResult;
use crate::theme::{Theme, TileFace};

/// Face-up tiles awaiting resolution, in selection order.
pub type Selection = SmallVec<[TileId; 2]>;

/// Tiles flipped per turn.
pub const SELECTION_SIZE: usize = 2;

/// A violated global invariant, reported by [`GameState::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum StateError {
    #[display("board has {actual} tiles")]
    WrongTileCount { actual: usize },

    #[display("{tone} appears {count} times")]
    UnpairedTone { tone: ToneId, count: usize },

    #[display("selection holds {len} tiles")]
    SelectionOverflow { len: usize },

    #[display("{tile} is selected but missing, matched or face down")]
    InvalidSelection { tile: TileId },

    #[display("{tile} is face up without being selected or matched")]
    StrayFaceUp { tile: TileId },

    #[display("current player {player} is not seated")]
    InvalidCurrentPlayer { player: PlayerId },

    #[display("scores total {total} but {matched_pairs} pairs are matched")]
    ScoreMismatch { total: u32, matched_pairs: usize },

    #[display("game_over is {game_over} but all_matched is {all_matched}")]
    GameOverMismatch { game_over: bool, all_matched: bool },
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub players: PlayerMap<Player>,
    pub current_player: PlayerId,
    pub selection: Selection,
    /// Starts at 1, advances only on a missed pair.
    pub turn_count: u32,
    pub game_over: bool,
    /// `None` while playing, and also after a tie. Check `game_over`.
    pub winner: Option<PlayerId>,
    pub theme: Theme,
}

impl GameState {
    /// Initial state over a freshly dealt board.
    #[must_use]
    pub fn new(player_names: &[String; PLAYER_COUNT], board: Board, theme: Theme) -> Self {
        Self {
            board,
            players: PlayerMap::new(PLAYER_COUNT, |id| Player::new(id, player_names[id.index()].clone())),
            current_player: PlayerId::new(0),
            selection: Selection::new(),
            turn_count: 1,
            game_over: false,
            winner: None,
            theme,
        }
    }

    /// Reset for another game on `board`. Names and theme are kept.
    pub(crate) fn restart(&mut self, board: Board) {
        self.board = board;
        for player in self.players.values_mut() {
            player.score = 0;
        }
        self.current_player = PlayerId::new(0);
        self.selection.clear();
        self.turn_count = 1;
        self.game_over = false;
        self.winner = None;
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.board.get(id)
    }

    /// Two tiles are face up and waiting to resolve.
    #[must_use]
    pub fn is_selection_full(&self) -> bool {
        self.selection.len() >= SELECTION_SIZE
    }

    /// The presentation layer should not accept clicks.
    #[must_use]
    pub fn is_board_locked(&self) -> bool {
        self.is_selection_full() || self.game_over
    }

    /// Sum of all scores.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.players.values().map(|p| p.score).sum()
    }

    /// First player holding the top score, once anyone has scored.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        let max = self.players.values().map(|p| p.score).max()?;
        if max == 0 {
            return None;
        }
        self.players
            .iter()
            .find(|(_, p)| p.score == max)
            .map(|(id, _)| id)
    }

    /// Players by score, highest first. Ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by(|a, b| b.score.cmp(&a.score));
        players
    }

    /// Final result, or `None` while the game is running.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        if !self.game_over {
            return None;
        }
        Some(match self.winner {
            Some(player) => GameResult::Winner(player),
            None => GameResult::Tie,
        })
    }

    /// How `id` should be drawn under the active theme.
    #[must_use]
    pub fn face(&self, id: TileId) -> Option<TileFace> {
        self.board.get(id).map(|tile| self.theme.config().face(tile))
    }

    /// Check every global invariant.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.board.len() != TILE_COUNT {
            return Err(StateError::WrongTileCount {
                actual: self.board.len(),
            });
        }

        let counts = self.board.tone_counts();
        for tone in (0..PAIR_COUNT as u8).map(ToneId) {
            let count = counts.get(&tone).copied().unwrap_or(0);
            if count != 2 {
                return Err(StateError::UnpairedTone { tone, count });
            }
        }

        if self.selection.len() > SELECTION_SIZE {
            return Err(StateError::SelectionOverflow {
                len: self.selection.len(),
            });
        }

        for &id in &self.selection {
            match self.board.get(id) {
                Some(tile) if tile.is_flipped && !tile.is_matched => {}
                _ => return Err(StateError::InvalidSelection { tile: id }),
            }
        }

        if let Some(stray) = self
            .board
            .iter()
            .find(|t| t.is_flipped && !t.is_matched && !self.selection.contains(&t.id))
        {
            return Err(StateError::StrayFaceUp { tile: stray.id });
        }

        if !self.players.contains(self.current_player) {
            return Err(StateError::InvalidCurrentPlayer {
                player: self.current_player,
            });
        }

        let matched_pairs = self.board.matched_count() / 2;
        let total = self.total_score();
        if total as usize != matched_pairs {
            return Err(StateError::ScoreMismatch { total, matched_pairs });
        }

        let all_matched = self.board.all_matched();
        if self.game_over != all_matched {
            return Err(StateError::GameOverMismatch {
                game_over: self.game_over,
                all_matched,
            });
        }

        Ok(())
    }
}
