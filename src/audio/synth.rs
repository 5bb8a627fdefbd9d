//! Synthesis descriptions for each cue.
//!
//! A cue is one or more oscillator [`Voice`]s, each with a linear
//! attack/release gain envelope:
//!
//! ```text
//! gain
//!  peak ┤   /\
//!       │  /  \
//!     0 ┼─/────\──── time
//!         0  attack  end
//! ```
//!
//! Hosts with a Web Audio style API can schedule the voices directly.

use serde::Serialize;
use smallvec::SmallVec;
use std::time::Duration;

use super::AudioCue;

/// Tile tones, C4 up to C5 on the major scale. Indexed by `tone mod len`.
pub const TONE_FREQUENCIES_HZ: [f32; 8] = [
    261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25,
];

/// Root of the victory arpeggio (C4).
pub const VICTORY_ROOT_HZ: f32 = 261.63;

/// Semitone steps of the victory arpeggio.
pub const VICTORY_SEMITONES: [u8; 6] = [0, 2, 4, 7, 9, 12];

const VICTORY_NOTE_SPACING: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Linear gain envelope: 0 → `peak` over `attack`, back to 0 at `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Envelope {
    pub peak: f32,
    pub attack: Duration,
    pub end: Duration,
}

impl Envelope {
    const fn new(peak: f32, attack_ms: u64, end_ms: u64) -> Self {
        Self {
            peak,
            attack: Duration::from_millis(attack_ms),
            end: Duration::from_millis(end_ms),
        }
    }
}

/// One oscillator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Voice {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    /// Delay after the cue fires before this voice starts.
    pub offset: Duration,
    pub envelope: Envelope,
}

impl Voice {
    const fn at(waveform: Waveform, frequency_hz: f32, envelope: Envelope) -> Self {
        Self {
            waveform,
            frequency_hz,
            offset: Duration::ZERO,
            envelope,
        }
    }
}

impl AudioCue {
    /// Voices that make up this cue.
    ///
    /// ```
    /// use sound_memory::audio::AudioCue;
    ///
    /// assert_eq!(AudioCue::Match.voices().len(), 2);
    /// assert_eq!(AudioCue::Victory.voices().len(), 6);
    /// ```
    #[must_use]
    pub fn voices(self) -> SmallVec<[Voice; 6]> {
        match self {
            AudioCue::Tone(tone) => {
                let hz = TONE_FREQUENCIES_HZ[tone.index() % TONE_FREQUENCIES_HZ.len()];
                smallvec::smallvec![Voice::at(Waveform::Sine, hz, Envelope::new(0.5, 50, 800))]
            }
            AudioCue::Click => {
                smallvec::smallvec![Voice::at(Waveform::Sine, 800.0, Envelope::new(0.3, 10, 100))]
            }
            AudioCue::Match => {
                let envelope = Envelope::new(0.3, 50, 400);
                smallvec::smallvec![
                    Voice::at(Waveform::Sine, 440.0, envelope),
                    Voice::at(Waveform::Sine, 880.0, envelope),
                ]
            }
            AudioCue::Victory => VICTORY_SEMITONES
                .iter()
                .enumerate()
                .map(|(i, &step)| Voice {
                    waveform: Waveform::Triangle,
                    frequency_hz: VICTORY_ROOT_HZ * 2f32.powf(f32::from(step) / 12.0),
                    offset: VICTORY_NOTE_SPACING * i as u32,
                    envelope: Envelope::new(0.3, 50, 300),
                })
                .collect(),
        }
    }
}
