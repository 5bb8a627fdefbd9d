//! The match engine.
//!
//! Owns the [`GameState`] and applies the rules:
//!
//! 1. `select_tile` flips up to two tiles per turn.
//! 2. The second flip arms a timer for `resolve_delay`; the board ignores
//!    selections until it fires.
//! 3. Resolution compares tones. A match scores and keeps the turn; a miss
//!    flips both back, passes the turn and bumps the turn counter.
//! 4. When every tile is matched the game ends. A unique top scorer wins;
//!    any tie at the top is a tie.
//!
//! ## Timing
//!
//! The engine never sleeps or spawns. Drive it with [`MatchEngine::tick`]
//! from an event loop, or arm a host timer and pass the ticket back to
//! [`MatchEngine::resolve_due`]. Dropping the engine (or calling
//! [`MatchEngine::shutdown`]) discards any pending resolution.
//!
//! ## Example
//!
//! ```
//! use sound_memory::audio::SilentAudio;
//! use sound_memory::core::{Board, MatchConfig, TileId};
//! use sound_memory::rules::{MatchEngine, SelectOutcome};
//! use sound_memory::schedule::ManualClock;
//!
//! let board = Board::from_tones(&[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7]).unwrap();
//! let clock = ManualClock::new();
//! let mut engine = MatchEngine::with_board(MatchConfig::default(), board, SilentAudio, clock.clone());
//!
//! engine.select_tile(TileId::new(0));
//! let outcome = engine.select_tile(TileId::new(1));
//! assert!(matches!(outcome, SelectOutcome::AwaitingResolution(_)));
//!
//! clock.advance(engine.config().resolve_delay);
//! let resolution = engine.tick().unwrap();
//! assert_eq!(engine.state().current().score, 1);
//! assert!(resolution.result.is_none());
//! ```

use tracing::{debug, info, trace, warn};

use super::outcome::{GameResult, IgnoreReason, Resolution, SelectOutcome, TurnOutcome};
use crate::audio::{AudioCue, AudioSink, SilentAudio};
use crate::core::{Board, GameRng, GameRngState, GameState, MatchConfig, TileId};
use crate::schedule::{Clock, ResolutionTicket, ResolutionTimer, SystemClock};
use crate::theme::Theme;

/// Turn-resolution state machine for one table.
pub struct MatchEngine<A = SilentAudio, C = SystemClock> {
    state: GameState,
    config: MatchConfig,
    rng: GameRng,
    timer: ResolutionTimer,
    audio: A,
    clock: C,
}

impl MatchEngine {
    /// Engine with no audio and wall-clock timing.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_parts(config, SilentAudio, SystemClock::new())
    }
}

impl<A: AudioSink, C: Clock> MatchEngine<A, C> {
    /// Engine with a freshly dealt board.
    pub fn with_parts(config: MatchConfig, audio: A, clock: C) -> Self {
        let mut rng = Self::rng_for(&config);
        let board = Board::deal(&mut rng);
        Self::assemble(config, rng, board, audio, clock)
    }

    /// Engine starting on a fixed board. Replays still deal from the RNG.
    pub fn with_board(config: MatchConfig, board: Board, audio: A, clock: C) -> Self {
        let rng = Self::rng_for(&config);
        Self::assemble(config, rng, board, audio, clock)
    }

    fn rng_for(config: &MatchConfig) -> GameRng {
        config.seed.map_or_else(GameRng::from_entropy, GameRng::new)
    }

    fn assemble(config: MatchConfig, rng: GameRng, board: Board, audio: A, clock: C) -> Self {
        let state = GameState::new(&config.player_names, board, config.theme);
        info!(seed = rng.seed(), theme = %config.theme, "new match");

        Self {
            state,
            config,
            rng,
            timer: ResolutionTimer::new(),
            audio,
            clock,
        }
    }

    // === Read access ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state. O(1) for the board.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// RNG position, enough to reproduce every future deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Ticket of the scheduled resolution, if any.
    #[must_use]
    pub fn pending_resolution(&self) -> Option<ResolutionTicket> {
        self.timer.pending()
    }

    /// Time until the scheduled resolution is due.
    #[must_use]
    pub fn time_until_resolution(&self) -> Option<std::time::Duration> {
        self.timer.remaining(self.clock.now())
    }

    // === Events ===

    /// Flip a tile for the current player.
    ///
    /// Ignored without any state change when the game is over, two tiles
    /// are already waiting, the id is off the board, or the tile is already
    /// face up. The click cue fires for anything past the first two checks.
    pub fn select_tile(&mut self, id: TileId) -> SelectOutcome {
        if self.state.game_over {
            return Self::ignore(id, IgnoreReason::GameOver);
        }
        if self.state.is_selection_full() {
            return Self::ignore(id, IgnoreReason::SelectionFull);
        }

        self.emit(AudioCue::Click);

        let tone = match self.state.board.get(id) {
            None => return Self::ignore(id, IgnoreReason::UnknownTile),
            Some(tile) if !tile.is_selectable() => {
                return Self::ignore(id, IgnoreReason::AlreadyFaceUp)
            }
            Some(tile) => tile.tone,
        };

        if let Some(tile) = self.state.board.get_mut(id) {
            tile.is_flipped = true;
        }
        self.state.selection.push(id);
        debug!(tile = %id, %tone, player = %self.state.current_player, "tile flipped");
        self.emit(AudioCue::Tone(tone));

        let outcome = if self.state.is_selection_full() {
            let ticket = self.timer.schedule(self.clock.now(), self.config.resolve_delay);
            debug!(epoch = ticket.epoch(), due = ?ticket.due(), "resolution scheduled");
            SelectOutcome::AwaitingResolution(ticket)
        } else {
            SelectOutcome::Flipped
        };

        self.debug_check();
        outcome
    }

    /// Resolve the pending selection if its delay has elapsed.
    pub fn tick(&mut self) -> Option<Resolution> {
        if !self.timer.is_due(self.clock.now()) {
            return None;
        }
        self.resolve_selection()
    }

    /// Resolve on behalf of a host timer armed with `ticket`.
    ///
    /// Only the ticket itself is checked, not the clock, so a host timer
    /// firing slightly early still resolves. Cancelled or already-resolved
    /// tickets are ignored.
    pub fn resolve_due(&mut self, ticket: ResolutionTicket) -> Option<Resolution> {
        if !self.timer.is_current(ticket) {
            trace!(epoch = ticket.epoch(), "stale resolution ticket");
            return None;
        }
        self.resolve_selection()
    }

    /// Resolve the two selected tiles now, cancelling any timer.
    ///
    /// Returns `None` unless exactly two tiles are waiting.
    pub fn resolve_selection(&mut self) -> Option<Resolution> {
        self.timer.cancel();

        let [first, second] = match *self.state.selection.as_slice() {
            [a, b] => [a, b],
            _ => return None,
        };
        let (tone_a, tone_b) = match (self.state.board.get(first), self.state.board.get(second)) {
            (Some(a), Some(b)) => (a.tone, b.tone),
            _ => {
                self.state.selection.clear();
                return None;
            }
        };

        let player = self.state.current_player;
        let outcome = if tone_a == tone_b {
            for id in [first, second] {
                if let Some(tile) = self.state.board.get_mut(id) {
                    tile.is_matched = true;
                    tile.is_flipped = true;
                }
            }
            self.state.players[player].score += 1;
            info!(
                %player,
                tone = %tone_a,
                score = self.state.players[player].score,
                "pair matched"
            );
            self.emit(AudioCue::Match);
            TurnOutcome::Matched {
                scorer: player,
                tone: tone_a,
            }
        } else {
            for id in [first, second] {
                if let Some(tile) = self.state.board.get_mut(id) {
                    tile.is_flipped = false;
                }
            }
            let next = player.next(self.state.players.player_count());
            self.state.current_player = next;
            self.state.turn_count += 1;
            debug!(%player, next = %next, turn = self.state.turn_count, "pair missed");
            TurnOutcome::Missed { next_player: next }
        };

        self.state.selection.clear();
        let result = self.finish_if_complete();

        self.debug_check();
        Some(Resolution {
            tiles: [first, second],
            outcome,
            result,
        })
    }

    /// Deal a new board and reset scores, turn and winner.
    ///
    /// Safe at any time. Player names and the theme carry over; a pending
    /// resolution is discarded.
    pub fn play_again(&mut self) {
        self.emit(AudioCue::Click);
        if let Some(ticket) = self.timer.cancel() {
            debug!(epoch = ticket.epoch(), "pending resolution discarded by replay");
        }

        let board = Board::deal(&mut self.rng);
        self.state.restart(board);
        info!(seed = self.rng.seed(), theme = %self.state.theme, "replay dealt");

        self.debug_check();
    }

    /// Switch the display theme. Rules are unaffected.
    pub fn set_theme(&mut self, theme: Theme) {
        self.emit(AudioCue::Click);
        self.state.theme = theme;
        debug!(%theme, "theme changed");
    }

    /// Cancel the pending resolution before tearing down the host.
    ///
    /// Returns the cancelled ticket.
    pub fn shutdown(&mut self) -> Option<ResolutionTicket> {
        let cancelled = self.timer.cancel();
        if let Some(ticket) = cancelled {
            debug!(epoch = ticket.epoch(), "pending resolution cancelled on shutdown");
        }
        cancelled
    }

    // === Internals ===

    fn finish_if_complete(&mut self) -> Option<GameResult> {
        if self.state.game_over || !self.state.board.all_matched() {
            return None;
        }

        let result = GameResult::from_scores(&self.state.players);
        self.state.game_over = true;
        self.state.winner = result.winner();
        info!(?result, turns = self.state.turn_count, "game over");
        self.emit(AudioCue::Victory);

        Some(result)
    }

    fn ignore(id: TileId, reason: IgnoreReason) -> SelectOutcome {
        trace!(tile = %id, ?reason, "selection ignored");
        SelectOutcome::Ignored(reason)
    }

    fn emit(&mut self, cue: AudioCue) {
        if let Err(err) = self.audio.play(cue) {
            warn!(error = %err, "audio cue failed");
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.state.validate(), Ok(()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use crate::core::{PlayerId, ToneId};
    use crate::schedule::ManualClock;

    /// Tile 0 and 5 share tone 3; tiles 1 and 2 differ.
    const LAYOUT: [u8; 16] = [3, 5, 6, 0, 1, 3, 0, 1, 2, 2, 4, 4, 5, 6, 7, 7];

    fn engine() -> (MatchEngine<CueRecorder, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let board = Board::from_tones(&LAYOUT).unwrap();
        let config = MatchConfig::default().with_seed(1);
        let engine = MatchEngine::with_board(config, board, CueRecorder::new(), clock.clone());
        (engine, clock)
    }

    #[test]
    fn test_first_flip_plays_click_then_tone() {
        let (mut engine, _) = engine();

        assert_eq!(engine.select_tile(TileId(0)), SelectOutcome::Flipped);
        assert_eq!(engine.audio().cues(), &[AudioCue::Click, AudioCue::Tone(ToneId(3))]);
        assert!(engine.state().tile(TileId(0)).unwrap().is_flipped);
        assert_eq!(engine.state().selection.as_slice(), &[TileId(0)]);
    }

    #[test]
    fn test_tick_waits_for_delay() {
        let (mut engine, clock) = engine();
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(5));

        clock.advance(std::time::Duration::from_millis(999));
        assert!(engine.tick().is_none());
        assert!(engine.state().is_board_locked());

        clock.advance(std::time::Duration::from_millis(1));
        let resolution = engine.tick().unwrap();
        assert_eq!(
            resolution.outcome,
            TurnOutcome::Matched {
                scorer: PlayerId::new(0),
                tone: ToneId(3)
            }
        );
        assert!(engine.pending_resolution().is_none());
    }

    #[test]
    fn test_unknown_tile_clicks_but_changes_nothing() {
        let (mut engine, _) = engine();
        let before = engine.snapshot();

        assert_eq!(
            engine.select_tile(TileId(40)),
            SelectOutcome::Ignored(IgnoreReason::UnknownTile)
        );
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.audio().cues(), &[AudioCue::Click]);
    }

    #[test]
    fn test_full_selection_is_silent() {
        let (mut engine, _) = engine();
        engine.select_tile(TileId(1));
        engine.select_tile(TileId(2));
        engine.audio_mut().drain();

        assert_eq!(
            engine.select_tile(TileId(3)),
            SelectOutcome::Ignored(IgnoreReason::SelectionFull)
        );
        assert!(engine.audio().cues().is_empty());
    }

    #[test]
    fn test_resolve_selection_needs_two_tiles() {
        let (mut engine, _) = engine();
        assert!(engine.resolve_selection().is_none());

        engine.select_tile(TileId(0));
        assert!(engine.resolve_selection().is_none());
        assert_eq!(engine.state().selection.len(), 1);
    }

    #[test]
    fn test_set_theme_keeps_board() {
        let (mut engine, _) = engine();
        let board = engine.state().board.clone();

        engine.set_theme(Theme::Minecraft);
        assert_eq!(engine.state().theme, Theme::Minecraft);
        assert_eq!(engine.state().board, board);
        assert_eq!(engine.audio().cues(), &[AudioCue::Click]);
    }
}
