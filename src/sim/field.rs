//! Obstacle spawning and scroll motion
//!
//! Spawn cadence is a renewal process: every spawn attempt draws the delay
//! until the next one. Motion is a fixed step per fine tick. Decoupling the
//! two produces irregular obstacle density while the minimum-gap rule keeps
//! every pair jumpable.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::consts::{DESPAWN_POSITION, SPAWN_EDGE};
use crate::tuning::Tuning;

/// The ordered set of live obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Live obstacles, ascending by id (spawn order)
    obstacles: Vec<Obstacle>,
    /// Anchor for the next spawn's minimum-gap rule: the rightmost live
    /// position, or SPAWN_EDGE when the field is empty
    last_spawn_position: f32,
    /// Run-clock deadline of the next spawn attempt
    next_spawn_at_ms: u64,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            last_spawn_position: SPAWN_EDGE,
            next_spawn_at_ms: 0,
            next_id: 1,
        }
    }

    /// Live obstacles in spawn order.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Renewal-process spawn driver: fires once the deadline passes, then
    /// redraws the delay to the next attempt. Rescheduling happens even when
    /// the attempt was dropped at the cap.
    pub fn tick_spawn(&mut self, now_ms: u64, rng: &mut Pcg32, tuning: &Tuning) {
        if now_ms < self.next_spawn_at_ms {
            return;
        }
        self.spawn(rng, tuning);
        let (min_delay, max_delay) = tuning.spawn_delay_range;
        self.next_spawn_at_ms = now_ms + rng.random_range(min_delay..=max_delay);
    }

    /// Insert a new obstacle off-screen right, at least the drawn gap beyond
    /// the rightmost live obstacle. No-op at the live-obstacle cap.
    pub fn spawn(&mut self, rng: &mut Pcg32, tuning: &Tuning) -> Option<u32> {
        if self.obstacles.len() >= tuning.max_obstacles {
            return None;
        }
        let (min_gap, max_gap) = tuning.spawn_gap_range;
        let gap = rng.random_range(min_gap..=max_gap);
        let position = (self.last_spawn_position + gap).max(SPAWN_EDGE);
        self.last_spawn_position = position;
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            position,
            scored: false,
        });
        Some(id)
    }

    /// One motion step: scroll everything left, drop what fell off-screen,
    /// then re-anchor the spawn gap to what remains.
    pub fn advance(&mut self, tuning: &Tuning) {
        let step = tuning.movement.step_percent(tuning.field_width_px);
        for obstacle in &mut self.obstacles {
            obstacle.position -= step;
        }
        self.obstacles.retain(|o| o.position > DESPAWN_POSITION);
        self.rebase_last_spawn();
    }

    /// Remove a single obstacle (a collision charge). At most one collision
    /// is ever charged per obstacle because it leaves the live set here.
    pub fn remove(&mut self, id: u32) {
        self.obstacles.retain(|o| o.id != id);
    }

    /// Flag an obstacle as cleared. It stays live until the off-screen rule
    /// removes it.
    pub fn mark_scored(&mut self, id: u32) {
        if let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id == id) {
            obstacle.scored = true;
        }
    }

    fn rebase_last_spawn(&mut self) {
        self.last_spawn_position = self
            .obstacles
            .iter()
            .map(|o| o.position)
            .reduce(f32::max)
            .unwrap_or(SPAWN_EDGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::MovementSpeed;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn spawns_keep_the_minimum_gap() {
        let mut field = ObstacleField::new();
        let mut rng = rng();
        let tuning = tuning();
        let (min_gap, _) = tuning.spawn_gap_range;

        for _ in 0..tuning.max_obstacles {
            let rightmost = field.last_spawn_position;
            field.spawn(&mut rng, &tuning);
            let spawned = field.obstacles().last().unwrap();
            assert!(spawned.position >= rightmost + min_gap);
            assert!(spawned.position >= 100.0);
        }
    }

    #[test]
    fn spawn_is_a_no_op_at_the_cap() {
        let mut field = ObstacleField::new();
        let mut rng = rng();
        let tuning = tuning();
        for _ in 0..tuning.max_obstacles {
            assert!(field.spawn(&mut rng, &tuning).is_some());
        }
        assert!(field.spawn(&mut rng, &tuning).is_none());
        assert_eq!(field.len(), tuning.max_obstacles);
    }

    #[test]
    fn advance_scrolls_left_and_despawns() {
        let mut field = ObstacleField::new();
        let mut rng = rng();
        let mut tuning = tuning();
        tuning.movement = MovementSpeed::PercentPerTick(50.0);
        field.spawn(&mut rng, &tuning);
        let start = field.obstacles()[0].position;

        field.advance(&tuning);
        assert_eq!(field.obstacles()[0].position, start - 50.0);

        // Scroll until past the off-screen threshold
        while !field.is_empty() {
            field.advance(&tuning);
        }
        // With the field empty the spawn anchor drops back to the right edge
        assert_eq!(field.last_spawn_position, 100.0);
    }

    #[test]
    fn anchor_rebases_to_the_rightmost_survivor() {
        let mut field = ObstacleField::new();
        let mut rng = rng();
        let tuning = tuning();
        field.spawn(&mut rng, &tuning);
        field.spawn(&mut rng, &tuning);
        let rightmost_id = field.obstacles()[1].id;

        field.remove(rightmost_id);
        field.advance(&tuning);
        let survivor = field.obstacles()[0].position;
        assert_eq!(field.last_spawn_position, survivor);
    }

    #[test]
    fn spawn_driver_is_a_renewal_process() {
        let mut field = ObstacleField::new();
        let mut rng = rng();
        let tuning = tuning();
        let (min_delay, max_delay) = tuning.spawn_delay_range;

        // First attempt fires immediately
        field.tick_spawn(0, &mut rng, &tuning);
        assert_eq!(field.len(), 1);
        let deadline = field.next_spawn_at_ms;
        assert!(deadline >= min_delay && deadline <= max_delay);

        // Nothing happens before the redrawn deadline
        field.tick_spawn(deadline - 1, &mut rng, &tuning);
        assert_eq!(field.len(), 1);

        field.tick_spawn(deadline, &mut rng, &tuning);
        assert_eq!(field.len(), 2);
        assert!(field.next_spawn_at_ms > deadline);
    }

    #[test]
    fn mark_scored_flags_without_removing() {
        let mut field = ObstacleField::new();
        let mut rng = rng();
        let tuning = tuning();
        let id = field.spawn(&mut rng, &tuning).unwrap();
        field.mark_scored(id);
        assert_eq!(field.len(), 1);
        assert!(field.obstacles()[0].scored);
    }
}
