//! Engine configuration.
//!
//! The three resolution delays are tunable constants, not rules of the game.
//! Defaults follow the reference client:
//! - `match_delay_ms`: 500 (both cards stay face up before locking in)
//! - `mismatch_delay_ms`: 1000 (longer, so the player can study the miss)
//! - `win_delay_ms`: 500 (measured from the final match transition)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Default delay before a matching pair locks in.
pub const DEFAULT_MATCH_DELAY_MS: u64 = 500;

/// Default delay before a mismatched pair flips back.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;

/// Default delay between the final match and the win announcement.
pub const DEFAULT_WIN_DELAY_MS: u64 = 500;

/// Configuration for a `MatchEngine`.
///
/// Delays are kept at full `Duration` precision; the serialized form uses
/// whole milliseconds (`match_delay_ms`, `mismatch_delay_ms`, `win_delay_ms`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay before a matching pair transitions to Matched.
    #[serde(rename = "match_delay_ms", with = "millis")]
    match_delay: Duration,

    /// Delay before a mismatched pair flips back to Hidden.
    #[serde(rename = "mismatch_delay_ms", with = "millis")]
    mismatch_delay: Duration,

    /// Delay between the last match and `GameWon`.
    #[serde(rename = "win_delay_ms", with = "millis")]
    win_delay: Duration,

    /// Number of players sharing the board (1-255).
    pub player_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_delay: Duration::from_millis(DEFAULT_MATCH_DELAY_MS),
            mismatch_delay: Duration::from_millis(DEFAULT_MISMATCH_DELAY_MS),
            win_delay: Duration::from_millis(DEFAULT_WIN_DELAY_MS),
            player_count: 1,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with the reference delays and one player.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match delay.
    #[must_use]
    pub fn with_match_delay(mut self, delay: Duration) -> Self {
        self.match_delay = delay;
        self
    }

    /// Set the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Set the win announcement delay.
    #[must_use]
    pub fn with_win_delay(mut self, delay: Duration) -> Self {
        self.win_delay = delay;
        self
    }

    /// Set the number of players taking turns.
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Delay before a matching pair locks in.
    #[must_use]
    pub fn match_delay(&self) -> Duration {
        self.match_delay
    }

    /// Delay before a mismatched pair flips back.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    /// Delay between the final match and the win announcement.
    #[must_use]
    pub fn win_delay(&self) -> Duration {
        self.win_delay
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        Ok(())
    }
}

/// Serde adapter for delays stored as whole milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
