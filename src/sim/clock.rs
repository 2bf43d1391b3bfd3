//! Tick source for a run
//!
//! Converts elapsed wall time into whole fine (motion) and coarse (countdown)
//! ticks through per-rate accumulators. Only approximately periodic: callers
//! must not assume exact wall-clock intervals between ticks.
//!
//! A stopped clock yields nothing and `stop` clears the accumulated phase, so
//! no tick can land after a session has been torn down.

use serde::{Deserialize, Serialize};

/// Whole ticks covered by one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ticks {
    pub fine: u32,
    pub coarse: u32,
}

/// Two-rate periodic tick source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    fine_period_ms: u64,
    coarse_period_ms: u64,
    running: bool,
    fine_acc_ms: u64,
    coarse_acc_ms: u64,
}

impl Clock {
    pub fn new(fine_period_ms: u64, coarse_period_ms: u64) -> Self {
        Self {
            fine_period_ms,
            coarse_period_ms,
            running: false,
            fine_acc_ms: 0,
            coarse_acc_ms: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin emitting ticks. The first tick of each rate lands one full
    /// period after start.
    pub fn start(&mut self) {
        self.running = true;
        self.fine_acc_ms = 0;
        self.coarse_acc_ms = 0;
    }

    /// Stop and drop any partially accumulated tick. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.fine_acc_ms = 0;
        self.coarse_acc_ms = 0;
    }

    /// Feed elapsed wall time; returns the whole ticks it covers, carrying
    /// the remainder forward. Yields nothing while stopped.
    pub fn advance(&mut self, elapsed_ms: u64) -> Ticks {
        if !self.running {
            return Ticks::default();
        }
        self.fine_acc_ms += elapsed_ms;
        self.coarse_acc_ms += elapsed_ms;
        let fine = (self.fine_acc_ms / self.fine_period_ms) as u32;
        let coarse = (self.coarse_acc_ms / self.coarse_period_ms) as u32;
        self.fine_acc_ms %= self.fine_period_ms;
        self.coarse_acc_ms %= self.coarse_period_ms;
        Ticks { fine, coarse }
    }
}
