//! Pausable game clock
//!
//! Time only advances while the clock is running; the host feeds frame
//! deltas, the clock decides whether they count.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    elapsed: f32,
    running: bool,
}

impl GameClock {
    /// A stopped clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds counted while running
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Count a frame delta if running. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if self.running && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Whole seconds left of `limit`, never below zero
    pub fn remaining_whole_secs(&self, limit: f32) -> u32 {
        (limit - self.elapsed).floor().max(0.0) as u32
    }
}
