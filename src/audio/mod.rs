//! Audio collaborator seam.
//!
//! The engine announces sounds as [`AudioCue`]s through an [`AudioSink`].
//! Sound is best-effort: a failing sink is logged and ignored, and the
//! game state transition that triggered the cue completes regardless.
//!
//! ## Sinks
//!
//! - [`SilentAudio`]: drops every cue (headless play, tests).
//! - [`CueRecorder`]: queues cues for a host to drain and synthesize,
//!   e.g. the browser bindings.
//!
//! [`synth`] describes how each cue sounds, so hosts don't have to.

mod sinks;
pub mod synth;

pub use sinks::{CueRecorder, SilentAudio};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::core::ToneId;

/// A sound the engine asks the host to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "cue", content = "tone", rename_all = "lowercase")]
pub enum AudioCue {
    /// UI click on a selection or button press.
    Click,
    /// The identifying tone of a freshly flipped tile.
    Tone(ToneId),
    /// A pair was matched.
    Match,
    /// The game just ended.
    Victory,
}

impl std::fmt::Display for AudioCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioCue::Click => write!(f, "click"),
            AudioCue::Tone(tone) => write!(f, "tone {}", tone.0),
            AudioCue::Match => write!(f, "match"),
            AudioCue::Victory => write!(f, "victory"),
        }
    }
}

/// An audio sink failed to play a cue.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
#[display("failed to play {cue}: {message}")]
pub struct AudioError {
    pub cue: AudioCue,
    pub message: String,
}

impl AudioError {
    pub fn new(cue: AudioCue, message: impl Into<String>) -> Self {
        Self {
            cue,
            message: message.into(),
        }
    }
}

/// Fire-and-forget sound output.
///
/// Implement the four `play_*` methods; the engine dispatches through
/// [`AudioSink::play`].
pub trait AudioSink {
    /// Play the tone identifying a tile.
    fn play_tone(&mut self, tone: ToneId) -> Result<(), AudioError>;

    /// Play the UI click.
    fn play_click(&mut self) -> Result<(), AudioError>;

    /// Play the pair-matched chime.
    fn play_match(&mut self) -> Result<(), AudioError>;

    /// Play the end-of-game fanfare.
    fn play_victory(&mut self) -> Result<(), AudioError>;

    /// Dispatch a cue to the matching `play_*` method.
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        match cue {
            AudioCue::Click => self.play_click(),
            AudioCue::Tone(tone) => self.play_tone(tone),
            AudioCue::Match => self.play_match(),
            AudioCue::Victory => self.play_victory(),
        }
    }
}
