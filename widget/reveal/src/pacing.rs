//! Reveal pacing: per-character delay derived from reply length.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pacing policy for the character reveal.
///
/// The per-character delay is the reveal budget divided by the reply length,
/// clamped between floor and ceiling: long replies reveal faster per
/// character, short ones no faster than the floor, which bounds the whole
/// animation to a roughly fixed visible duration for typical lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pacing {
    /// Target budget for the whole animation, in milliseconds.
    pub budget_ms: u64,
    /// Minimum delay per character, in milliseconds.
    pub floor_ms: u64,
    /// Maximum delay per character, in milliseconds.
    pub ceiling_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            budget_ms: 1_500,
            floor_ms: 20,
            ceiling_ms: 40,
        }
    }
}

impl Pacing {
    /// Delay between ticks for a reply of `char_count` characters.
    ///
    /// A zero-length reply schedules no ticks, so its delay is zero.
    pub fn per_char_delay(&self, char_count: usize) -> Duration {
        if char_count == 0 {
            return Duration::ZERO;
        }
        let raw = self.budget_ms as f64 / char_count as f64;
        let ms = raw.min(self.ceiling_ms as f64).max(self.floor_ms as f64);
        Duration::from_secs_f64(ms / 1_000.0)
    }
}
