//! Stock audio sinks.

use crate::core::ToneId;

use super::{AudioCue, AudioError, AudioSink};

/// Sink that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_tone(&mut self, _tone: ToneId) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_click(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_match(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_victory(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sink that queues cues in emission order.
///
/// Hosts that synthesize sound themselves drain the queue after each
/// engine call.
#[derive(Clone, Debug, Default)]
pub struct CueRecorder {
    cues: Vec<AudioCue>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues queued since the last drain.
    #[must_use]
    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }

    /// Take all queued cues.
    pub fn drain(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}

impl AudioSink for CueRecorder {
    fn play_tone(&mut self, tone: ToneId) -> Result<(), AudioError> {
        self.cues.push(AudioCue::Tone(tone));
        Ok(())
    }

    fn play_click(&mut self) -> Result<(), AudioError> {
        self.cues.push(AudioCue::Click);
        Ok(())
    }

    fn play_match(&mut self) -> Result<(), AudioError> {
        self.cues.push(AudioCue::Match);
        Ok(())
    }

    fn play_victory(&mut self) -> Result<(), AudioError> {
        self.cues.push(AudioCue::Victory);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut recorder = CueRecorder::new();
        recorder.play_click().unwrap();
        recorder.play_match().unwrap();

        assert_eq!(recorder.drain(), vec![AudioCue::Click, AudioCue::Match]);
        assert!(recorder.cues().is_empty());
    }

    #[test]
    fn test_silent_accepts_everything() {
        let mut silent = SilentAudio;
        assert!(silent.play(AudioCue::Tone(ToneId(7))).is_ok());
        assert!(silent.play(AudioCue::Victory).is_ok());
    }
}
