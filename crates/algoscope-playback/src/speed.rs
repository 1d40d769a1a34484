//! Playback speed and its tick interval.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// User-facing playback speed in `[1, 100]`; higher is faster.
///
/// The tick interval is `101 - speed` milliseconds, captured when a session
/// starts. Changing the speed mid-run affects the next run only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(100);

    /// Create a speed, clamping into `[1, 100]`.
    pub fn new(value: u8) -> Self {
        Speed(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Milliseconds between ticks at this speed.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(101 - u64::from(self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(50)
    }
}
