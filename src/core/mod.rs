//! Core types: players, tiles, board, state, RNG, configuration.

pub mod player;
pub mod tile;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use tile::{Board, BoardError, Tile, TileId, ToneId, PAIR_COUNT, TILE_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{MatchConfig, DEFAULT_RESOLVE_DELAY};
pub use state::{GameState, Selection, StateError, SELECTION_SIZE};
