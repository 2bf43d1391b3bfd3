//! Run lifecycle state machine
//!
//! Owns exactly one run at a time: the clock, the obstacle field, the
//! character, and the scoring cadences. Every mutation flows through
//! [`RunSession::advance`], so the periodic activities (motion, collision
//! scan, passive score, countdown, spawn renewal, jump reset) are serialized
//! by construction even though they overlap in wall-clock time.
//!
//! Teardown is structural: leaving `Playing` stops the clock and every
//! cadence lives inside the session, so there is no timer that could fire
//! against a finished run.

use rand_pcg::Pcg32;

use super::clock::Clock;
use super::collision::{Resolution, resolve};
use super::field::ObstacleField;
use super::state::{Character, Deduction, Obstacle, RngState, RunPhase};
use crate::economy::Economy;
use crate::tuning::Tuning;

/// Input for one advance call
#[derive(Debug, Clone, Copy, Default)]
pub struct RunInput {
    /// Jump tap. Rate-unlimited; the jump guard debounces, not the input
    /// layer.
    pub tap: bool,
}

/// One ticket-gated, time-boxed play session
#[derive(Debug, Clone)]
pub struct RunSession {
    tuning: Tuning,
    phase: RunPhase,
    rng_state: RngState,
    runs_started: u32,
    rng: Pcg32,
    clock: Clock,
    /// Run-local timeline, ms since Playing entry, fine-tick granularity
    now_ms: u64,
    elapsed_secs: u32,
    score: u64,
    field: ObstacleField,
    character: Character,
    deductions: Vec<Deduction>,
    next_deduction_id: u32,
    collision_acc_ms: u64,
    passive_acc_ms: u64,
}

impl RunSession {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        let clock = Clock::new(tuning.fine_tick_ms, tuning.coarse_tick_ms);
        Self {
            tuning,
            phase: RunPhase::Idle,
            rng_state,
            runs_started: 0,
            rng: rng_state.run_rng(0),
            clock,
            now_ms: 0,
            elapsed_secs: 0,
            score: 0,
            field: ObstacleField::new(),
            character: Character::default(),
            deductions: Vec::new(),
            next_deduction_id: 1,
            collision_acc_ms: 0,
            passive_acc_ms: 0,
        }
    }

    // === Presentation boundary ===

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Live run score; frozen once the run has ended.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.tuning.run_duration_secs.saturating_sub(self.elapsed_secs)
    }

    /// Live obstacles in spawn order, for rendering.
    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn is_jumping(&self) -> bool {
        self.character.jumping
    }

    /// Transient floating deduction events; ages come from [`Self::now_ms`].
    pub fn deductions(&self) -> &[Deduction] {
        &self.deductions
    }

    /// Run-local clock, ms since the current run began.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Final score of the finished run; None unless the session is at Ended.
    pub fn final_score(&self) -> Option<u64> {
        match self.phase {
            RunPhase::Ended => Some(self.score),
            _ => None,
        }
    }

    // === Transitions ===

    /// Idle/Ended to Playing. Consumes one ticket and rebuilds all run state;
    /// rejected silently when no tickets remain.
    pub fn start(&mut self, economy: &mut Economy) -> bool {
        if self.phase == RunPhase::Playing {
            return false;
        }
        if !economy.consume_ticket() {
            log::debug!("run start rejected: no tickets");
            return false;
        }
        self.runs_started += 1;
        self.rng = self.rng_state.run_rng(self.runs_started);
        self.phase = RunPhase::Playing;
        self.now_ms = 0;
        self.elapsed_secs = 0;
        self.score = 0;
        self.field = ObstacleField::new();
        self.character = Character::default();
        self.deductions.clear();
        self.collision_acc_ms = 0;
        self.passive_acc_ms = 0;
        self.clock.start();
        log::info!(
            "run {} started, {} tickets left",
            self.runs_started,
            economy.tickets()
        );
        true
    }

    /// Ended to Idle: back to the menu, transient display state cleared.
    pub fn dismiss(&mut self) {
        if self.phase != RunPhase::Ended {
            return;
        }
        self.phase = RunPhase::Idle;
        self.deductions.clear();
    }

    /// Ended to Playing shortcut, ticket-gated identically to `start`.
    pub fn play_again(&mut self, economy: &mut Economy) -> bool {
        if self.phase != RunPhase::Ended {
            return false;
        }
        self.start(economy)
    }

    /// Advance the run by elapsed wall time. The single serialized entry
    /// point for every periodic activity. Outside of Playing this absorbs
    /// everything, including taps queued behind a game-over.
    pub fn advance(&mut self, economy: &mut Economy, input: RunInput, wall_ms: u64) {
        if self.phase != RunPhase::Playing {
            return;
        }
        let ticks = self.clock.advance(wall_ms);

        if input.tap {
            self.character.tap(self.now_ms, self.tuning.jump_duration_ms);
        }

        // The countdown is the sole authority for ending the run; once it
        // fires, the rest of this window is dropped on the floor.
        for _ in 0..ticks.coarse {
            self.elapsed_secs += 1;
            if self.elapsed_secs >= self.tuning.run_duration_secs {
                self.end_run();
                return;
            }
        }

        for _ in 0..ticks.fine {
            self.now_ms += self.tuning.fine_tick_ms;
            self.step_fine(economy);
        }
    }

    fn end_run(&mut self) {
        self.clock.stop();
        self.character.ground();
        self.field = ObstacleField::new();
        self.phase = RunPhase::Ended;
        log::info!("run {} ended with score {}", self.runs_started, self.score);
    }

    /// One motion tick: jump bookkeeping, spawn renewal, scroll, and the two
    /// slower scoring cadences.
    fn step_fine(&mut self, economy: &mut Economy) {
        self.character.update(self.now_ms);
        self.field.tick_spawn(self.now_ms, &mut self.rng, &self.tuning);
        self.field.advance(&self.tuning);

        let now_ms = self.now_ms;
        self.deductions.retain(|d| !d.expired(now_ms));

        self.collision_acc_ms += self.tuning.fine_tick_ms;
        if self.collision_acc_ms >= self.tuning.collision_check_interval_ms {
            self.collision_acc_ms -= self.tuning.collision_check_interval_ms;
            self.scan_collisions(economy);
        }

        self.passive_acc_ms += self.tuning.fine_tick_ms;
        if self.passive_acc_ms >= self.tuning.passive_score_interval_ms {
            self.passive_acc_ms -= self.tuning.passive_score_interval_ms;
            self.apply_delta(economy, self.tuning.passive_score);
        }
    }

    /// One scoring scan over the field, in spawn order. Each resolution is
    /// applied immediately, so a pass earlier in the scan raises the score a
    /// later collision halves.
    fn scan_collisions(&mut self, economy: &mut Economy) {
        let obstacles: Vec<Obstacle> = self.field.obstacles().to_vec();
        for obstacle in &obstacles {
            match resolve(&self.character, obstacle, self.tuning.field_width_px) {
                Resolution::Collision => {
                    // Half of the score before the hit; at zero this deducts
                    // nothing and the totals stay put.
                    let deduction = (self.score / 2) as i64;
                    self.field.remove(obstacle.id);
                    self.apply_delta(economy, -deduction);
                    self.push_deduction(-deduction);
                    log::debug!(
                        "collision with obstacle {} cost {} points",
                        obstacle.id,
                        deduction
                    );
                }
                Resolution::Pass => {
                    self.field.mark_scored(obstacle.id);
                    self.apply_delta(economy, self.tuning.pass_score);
                }
                Resolution::Untouched => {}
            }
        }
    }

    /// Uniform delta rule for passes, collisions and passive score: negative
    /// halves run and total independently from their own prior values,
    /// non-negative adds exactly.
    fn apply_delta(&mut self, economy: &mut Economy, delta: i64) {
        if delta < 0 {
            self.score /= 2;
        } else {
            self.score += delta as u64;
        }
        economy.apply_delta(delta);
    }

    fn push_deduction(&mut self, value: i64) {
        let id = self.next_deduction_id;
        self.next_deduction_id += 1;
        self.deductions.push(Deduction {
            id,
            value,
            born_ms: self.now_ms,
        });
    }
}
