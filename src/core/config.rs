//! Match configuration.
//!
//! The ruleset is fixed (two players, sixteen tiles). What a host may tune:
//! - Player names
//! - Delay between the second flip and turn resolution
//! - RNG seed (omit for an entropy-seeded session)
//! - Starting theme

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::player::PLAYER_COUNT;
use crate::theme::Theme;

/// Default delay between the second flip and resolution.
pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_millis(1000);

/// Configuration for a `MatchEngine`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Names in seat order.
    pub player_names: [String; PLAYER_COUNT],

    /// How long both selected tiles stay face up before the turn resolves.
    /// The board rejects selections for this whole window.
    pub resolve_delay: Duration,

    /// Seed for dealing. `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Theme in effect at start. Survives replays.
    pub theme: Theme,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            resolve_delay: DEFAULT_RESOLVE_DELAY,
            seed: None,
            theme: Theme::default(),
        }
    }
}

impl MatchConfig {
    /// Set both player names, in seat order.
    #[must_use]
    pub fn with_player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }

    /// Set the resolution delay.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    /// Fix the RNG seed for a reproducible session.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.player_names, ["Player 1", "Player 2"]);
        assert_eq!(config.resolve_delay, Duration::from_secs(1));
        assert_eq!(config.seed, None);
        assert_eq!(config.theme, Theme::Classic);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::default()
            .with_player_names("Ada", "Grace")
            .with_resolve_delay(Duration::from_millis(250))
            .with_seed(9)
            .with_theme(Theme::Minecraft);

        assert_eq!(config.player_names[1], "Grace");
        assert_eq!(config.resolve_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.theme, Theme::Minecraft);
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::default().with_seed(123);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
