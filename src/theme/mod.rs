//! Visual themes.
//!
//! Themes never affect rules. A theme maps a tone to a display symbol and
//! color by `tone mod len`, so any theme works with any board.

mod config;

pub use config::{ThemeConfig, TileFace};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Closed set of available themes.
///
/// Keys parse from and print as lowercase strings:
///
/// ```
/// use sound_memory::theme::Theme;
///
/// let theme: Theme = "minecraft".parse().unwrap();
/// assert_eq!(theme, Theme::Minecraft);
/// assert_eq!(theme.key(), "minecraft");
/// assert!("neon".parse::<Theme>().is_err());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Minecraft,
}

impl Theme {
    /// Configuration key, e.g. `"classic"`.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Display configuration for this theme.
    #[must_use]
    pub fn config(self) -> &'static ThemeConfig {
        &config::THEME_CONFIGS[self as usize]
    }

    /// All themes in declaration order.
    pub fn all() -> impl Iterator<Item = Theme> {
        Theme::iter()
    }
}
