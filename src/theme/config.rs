//! Theme lookup tables.

use serde::Serialize;
use strum::EnumCount;

use super::Theme;
use crate::core::{Tile, ToneId};

/// Display data for one theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    /// Human-readable name.
    pub name: &'static str,
    /// Glyph shown in the theme picker.
    pub icon: &'static str,
    /// Symbols indexed by `tone mod len`.
    pub symbols: &'static [&'static str],
    /// Hex colors indexed by `tone mod len`.
    pub colors: &'static [&'static str],
}

/// Indexed by `Theme as usize`.
pub(super) static THEME_CONFIGS: [ThemeConfig; Theme::COUNT] = [
    ThemeConfig {
        name: "Classic",
        icon: "♫",
        symbols: &["♪", "♫", "♬", "♩", "♭", "♮", "♯", "𝄞"],
        colors: &[
            "#ef4444", "#3b82f6", "#22c55e", "#eab308", "#ec4899", "#a855f7", "#6366f1", "#f97316",
        ],
    },
    ThemeConfig {
        name: "Minecraft",
        icon: "⛏️",
        symbols: &["🌳", "⛏️", "🗡️", "🏹", "💎", "🧟", "🐑", "🌟"],
        colors: &[
            "#059669", "#44403c", "#27272a", "#b45309", "#06b6d4", "#166534", "#e2e8f0", "#eab308",
        ],
    },
];

/// What the presentation layer should draw for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TileFace {
    /// Face down.
    Hidden,
    /// Flipped while awaiting resolution. Color stays neutral.
    Revealed { symbol: &'static str },
    /// Permanently face up.
    Matched {
        symbol: &'static str,
        color: &'static str,
    },
}

impl ThemeConfig {
    /// Symbol for a tone.
    #[must_use]
    pub fn symbol_for(&self, tone: ToneId) -> &'static str {
        self.symbols[tone.index() % self.symbols.len()]
    }

    /// Color for a tone.
    #[must_use]
    pub fn color_for(&self, tone: ToneId) -> &'static str {
        self.colors[tone.index() % self.colors.len()]
    }

    /// Face to render for `tile` under this theme.
    #[must_use]
    pub fn face(&self, tile: &Tile) -> TileFace {
        if tile.is_matched {
            TileFace::Matched {
                symbol: self.symbol_for(tile.tone),
                color: self.color_for(tile.tone),
            }
        } else if tile.is_flipped {
            TileFace::Revealed {
                symbol: self.symbol_for(tile.tone),
            }
        } else {
            TileFace::Hidden
        }
    }
}
