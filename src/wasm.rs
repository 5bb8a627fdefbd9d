//! WASM bindings for a browser front end.
//!
//! The page owns rendering and Web Audio. It forwards clicks to `select`,
//! calls `tick` from `requestAnimationFrame` with the frame timestamp, and
//! after every call drains cues and re-reads `snapshot`.

#![cfg(feature = "wasm")]

use serde::Serialize;
use smallvec::SmallVec;
use std::time::Duration;
use wasm_bindgen::prelude::*;

use crate::audio::synth::Voice;
use crate::audio::{AudioCue, CueRecorder};
use crate::core::{MatchConfig, TileId};
use crate::rules::MatchEngine;
use crate::schedule::{Clock, ManualClock};
use crate::theme::{Theme, ThemeConfig};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

#[derive(Serialize)]
struct CueWithVoices {
    cue: AudioCue,
    voices: SmallVec<[Voice; 6]>,
}

#[derive(Serialize)]
struct ThemeEntry {
    key: &'static str,
    #[serde(flatten)]
    config: &'static ThemeConfig,
}

/// One table, driven by page time.
#[wasm_bindgen]
pub struct WasmMatch {
    engine: MatchEngine<CueRecorder, ManualClock>,
}

#[wasm_bindgen]
impl WasmMatch {
    /// New match dealt from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmMatch {
        let config = MatchConfig::default().with_seed(seed);
        Self {
            engine: MatchEngine::with_parts(config, CueRecorder::new(), ManualClock::new()),
        }
    }

    /// Select a tile. Returns whether the click changed state.
    pub fn select(&mut self, tile: u32, now_ms: f64) -> bool {
        self.engine.clock().set(millis(now_ms));
        match u8::try_from(tile) {
            Ok(id) => self.engine.select_tile(TileId::new(id)).is_accepted(),
            Err(_) => false,
        }
    }

    /// Advance page time; returns the resolution if one fired, else `null`.
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        self.engine.clock().set(millis(now_ms));
        match self.engine.tick() {
            Some(resolution) => to_js(&resolution),
            None => Ok(JsValue::NULL),
        }
    }

    /// Milliseconds until the pending resolution, if any.
    pub fn ms_until_resolution(&self, now_ms: f64) -> Option<f64> {
        self.engine.clock().set(millis(now_ms));
        self.engine
            .time_until_resolution()
            .map(|d| d.as_secs_f64() * 1000.0)
    }

    /// Full game state.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(self.engine.state())
    }

    pub fn play_again(&mut self) {
        self.engine.play_again();
    }

    /// Switch theme by key (`"classic"`, `"minecraft"`).
    pub fn set_theme(&mut self, key: &str) -> Result<(), JsError> {
        let theme: Theme = key
            .parse()
            .map_err(|e| JsError::new(&format!("Unknown theme {}: {}", key, e)))?;
        self.engine.set_theme(theme);
        Ok(())
    }

    /// Cues emitted since the last drain, each with its synthesis voices.
    pub fn drain_cues(&mut self) -> Result<JsValue, JsError> {
        let cues: Vec<CueWithVoices> = self
            .engine
            .audio_mut()
            .drain()
            .into_iter()
            .map(|cue| CueWithVoices {
                cue,
                voices: cue.voices(),
            })
            .collect();
        to_js(&cues)
    }

    /// Cancel any pending resolution before the page navigates away.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    /// Current clock reading in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.engine.clock().now().as_secs_f64() * 1000.0
    }
}

/// All themes with their display tables.
#[wasm_bindgen]
pub fn themes() -> Result<JsValue, JsError> {
    let entries: Vec<ThemeEntry> = Theme::all()
        .map(|theme| ThemeEntry {
            key: theme.key(),
            config: theme.config(),
        })
        .collect();
    to_js(&entries)
}
