//! Results reported by engine operations.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId, PlayerMap, TileId, ToneId};
use crate::schedule::ResolutionTicket;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// One player holds the top score alone.
    Winner(PlayerId),
    /// Two or more players share the top score.
    Tie,
}

impl GameResult {
    /// Decide the result from final scores.
    ///
    /// Any tie at the top score, between however many players, is a `Tie`.
    #[must_use]
    pub fn from_scores(players: &PlayerMap<Player>) -> Self {
        let max = players.values().map(|p| p.score).max().unwrap_or(0);
        let mut leaders = players.iter().filter(|(_, p)| p.score == max);

        match (leaders.next(), leaders.next()) {
            (Some((id, _)), None) => GameResult::Winner(id),
            _ => GameResult::Tie,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winner, if there is exactly one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Tie => None,
        }
    }
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    GameOver,
    /// Two tiles are already waiting to resolve.
    SelectionFull,
    UnknownTile,
    /// Already flipped or matched.
    AlreadyFaceUp,
}

/// What `select_tile` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// No state change.
    Ignored(IgnoreReason),
    /// First tile of the turn is face up.
    Flipped,
    /// Second tile is face up; resolution is scheduled.
    AwaitingResolution(ResolutionTicket),
}

impl SelectOutcome {
    /// Did the selection change state?
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SelectOutcome::Ignored(_))
    }
}

/// How a resolved pair played out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Tones matched; `scorer` keeps the turn.
    Matched { scorer: PlayerId, tone: ToneId },
    /// Tones differed; play passes to `next_player`.
    Missed { next_player: PlayerId },
}

/// Report of one resolved turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The two tiles, in selection order.
    pub tiles: [TileId; 2],
    pub outcome: TurnOutcome,
    /// Set when this resolution ended the game.
    pub result: Option<GameResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(scores: &[u32]) -> PlayerMap<Player> {
        PlayerMap::new(scores.len(), |id| Player {
            id,
            name: format!("P{}", id.0),
            score: scores[id.index()],
        })
    }

    #[test]
    fn test_unique_top_score_wins() {
        assert_eq!(GameResult::from_scores(&roster(&[5, 3])), GameResult::Winner(PlayerId::new(0)));
        assert_eq!(GameResult::from_scores(&roster(&[2, 6])), GameResult::Winner(PlayerId::new(1)));
    }

    #[test]
    fn test_shared_top_score_ties() {
        assert_eq!(GameResult::from_scores(&roster(&[4, 4])), GameResult::Tie);
        assert_eq!(GameResult::from_scores(&roster(&[3, 1, 3])), GameResult::Tie);
    }

    #[test]
    fn test_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert_eq!(result.winner(), Some(PlayerId::new(1)));

        assert!(!GameResult::Tie.is_winner(PlayerId::new(0)));
        assert_eq!(GameResult::Tie.winner(), None);
    }

    #[test]
    fn test_ignored_is_not_accepted() {
        assert!(!SelectOutcome::Ignored(IgnoreReason::GameOver).is_accepted());
        assert!(SelectOutcome::Flipped.is_accepted());
    }
}
