//! Frame clock
//!
//! Turns successive host timestamps (milliseconds) into a bounded delta.
//! The first timestamp only primes the clock, and every later delta is
//! clamped to `MAX_DELTA_MS` so a long pause never produces a jump.

/// Longest delta ever simulated in one step, about 15 logical frames per second
pub const MAX_DELTA_MS: f64 = 1000.0 / 15.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clock {
    last_timestamp: Option<f64>, // ms, None until the first frame
    delta_ms: f64, // clamped, 0 <= delta_ms <= MAX_DELTA_MS
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `timestamp_ms` and report whether a usable delta exists.
    /// Returns `false` on the first call after construction or `reset`.
    pub fn advance(&mut self, timestamp_ms: f64) -> bool {
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            self.delta_ms = 0.0;
            return false;
        };

        self.delta_ms = (timestamp_ms - last).clamp(0.0, MAX_DELTA_MS);
        true
    }

    /// Forget every observed timestamp
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Simulation seconds for the last accepted frame
    pub fn dt_seconds(&self, speed: f64) -> f64 {
        self.delta_ms / 1000.0 * speed
    }

    pub fn fps(&self) -> f64 {
        if self.delta_ms > 0.0 {
            1000.0 / self.delta_ms
        } else {
            0.0
        }
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}
