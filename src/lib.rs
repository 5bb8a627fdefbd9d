//! # sound-memory
//!
//! Two-player memory game where tiles are matched by ear. Each tile hides
//! one of eight tones; flip two per turn, and if the tones agree the pair
//! is yours and you go again.
//!
//! ## Design
//!
//! 1. **One state machine**: `MatchEngine` owns the state and all rules.
//!    Presentation layers read snapshots and send events.
//!
//! 2. **No hidden time**: the delay between the second flip and resolution
//!    is an explicit, cancelable timer over an injectable `Clock`.
//!
//! 3. **Best-effort sound**: audio is a fire-and-forget `AudioSink`.
//!    Failures are logged and never touch game state.
//!
//! 4. **Deterministic deals**: boards are shuffled by a seeded ChaCha8 RNG.
//!
//! ## Modules
//!
//! - `core`: Players, tiles, board, state, RNG, configuration
//! - `theme`: Display themes (symbols and colors per tone)
//! - `audio`: Audio cues, sinks and synthesis descriptions
//! - `schedule`: Clocks and the resolution timer
//! - `rules`: The match engine and its outcomes
//! - `wasm`: Browser bindings (feature `wasm`)

pub mod core;
pub mod theme;
pub mod audio;
pub mod schedule;
pub mod rules;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardError, GameRng, GameRngState, GameState, MatchConfig, Player, PlayerId, PlayerMap,
    StateError, Tile, TileId, ToneId, PAIR_COUNT, PLAYER_COUNT, TILE_COUNT,
};

pub use crate::theme::{Theme, ThemeConfig, TileFace};

pub use crate::audio::{AudioCue, AudioError, AudioSink, CueRecorder, SilentAudio};

pub use crate::schedule::{Clock, ManualClock, ResolutionTicket, ResolutionTimer, SystemClock};

pub use crate::rules::{
    GameResult, IgnoreReason, MatchEngine, Resolution, SelectOutcome, TurnOutcome,
};
