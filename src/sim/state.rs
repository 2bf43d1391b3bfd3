//! Run-local state types
//!
//! Everything a single run owns lives here; a new run rebuilds all of it from
//! scratch, so nothing can leak from one run into the next.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DEDUCTION_TTL_MS;

/// Current phase of the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunPhase {
    /// In the menu, no run active
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run finished, final score frozen until dismissal or replay
    Ended,
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Assigned monotonically at spawn; spawn order drives the scoring scan.
    pub id: u32,
    /// Horizontal position as percent of field width (0 = left edge, 100 =
    /// right edge). May exceed 100 when the minimum-gap rule pushes a spawn
    /// further off-screen.
    pub position: f32,
    /// True once the character has cleared it
    pub scored: bool,
}

/// The player character. It never moves horizontally; the only state is the
/// jump arc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    pub jumping: bool,
    /// When the current jump ends, run-clock ms
    reset_at_ms: Option<u64>,
}

impl Character {
    /// Begin a jump. A tap while airborne is a no-op: no queuing, no
    /// double-jump.
    pub fn tap(&mut self, now_ms: u64, jump_duration_ms: u64) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.reset_at_ms = Some(now_ms + jump_duration_ms);
        true
    }

    /// Land automatically once the jump duration has elapsed. Each tap arms
    /// exactly one reset deadline, so this can never double-fire.
    pub fn update(&mut self, now_ms: u64) {
        if let Some(reset_at) = self.reset_at_ms
            && now_ms >= reset_at
        {
            self.jumping = false;
            self.reset_at_ms = None;
        }
    }

    /// Drop back to the ground immediately (run teardown).
    pub fn ground(&mut self) {
        self.jumping = false;
        self.reset_at_ms = None;
    }
}

/// A transient floating score-deduction display event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deduction {
    pub id: u32,
    /// Signed amount shown to the player, zero or negative
    pub value: i64,
    /// Run-clock ms at creation
    pub born_ms: u64,
}

impl Deduction {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.born_ms)
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) >= DEDUCTION_TTL_MS
    }
}

/// Seed wrapper: every run of a session is reproducible from the session seed
/// and the run index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Decorrelated RNG stream for the nth run of the session.
    pub fn run_rng(&self, run_index: u32) -> Pcg32 {
        let run_seed = (run_index as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(self.seed);
        Pcg32::seed_from_u64(run_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_while_airborne_is_a_no_op() {
        let mut character = Character::default();
        assert!(character.tap(0, 480));
        assert!(!character.tap(100, 480));
        assert!(character.jumping);
    }

    #[test]
    fn jump_resets_after_fixed_duration() {
        let mut character = Character::default();
        character.tap(0, 480);
        character.update(479);
        assert!(character.jumping);
        character.update(480);
        assert!(!character.jumping);
    }

    #[test]
    fn rapid_retap_near_landing_keeps_the_new_jump() {
        let mut character = Character::default();
        character.tap(0, 480);
        character.update(480);
        // New jump right at the landing edge; the old deadline must not
        // knock it back down.
        assert!(character.tap(480, 480));
        character.update(500);
        assert!(character.jumping);
        character.update(960);
        assert!(!character.jumping);
    }

    #[test]
    fn deduction_expires_after_ttl() {
        let deduction = Deduction {
            id: 1,
            value: -10,
            born_ms: 5000,
        };
        assert!(!deduction.expired(5999));
        assert!(deduction.expired(6000));
        assert_eq!(deduction.age_ms(5400), 400);
    }

    #[test]
    fn run_rng_streams_differ_per_run() {
        use rand::Rng;
        let rng_state = RngState::new(42);
        let a: u64 = rng_state.run_rng(1).random();
        let b: u64 = rng_state.run_rng(2).random();
        assert_ne!(a, b);
        // Same run index replays the same stream
        let a2: u64 = rng_state.run_rng(1).random();
        assert_eq!(a, a2);
    }
}
