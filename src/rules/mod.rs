//! Turn-resolution rules.
//!
//! `MatchEngine` is the only component with game logic. It accepts three
//! inbound events (select, replay, theme change), owns the delayed
//! resolution, and exposes the resulting `GameState` for rendering.

pub mod engine;
mod outcome;

pub use engine::MatchEngine;
pub use outcome::{GameResult, IgnoreReason, Resolution, SelectOutcome, TurnOutcome};
