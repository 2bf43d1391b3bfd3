//! Hitbox geometry and collision/pass classification
//!
//! The scoring scan runs on its own cadence, less often than motion. Jump
//! duration and spawn gaps are large relative to the check period, so the
//! coarser scan cannot miss a physically meaningful overlap.

use glam::Vec2;

use super::state::{Character, Obstacle};
use crate::consts::{
    CHARACTER_HEIGHT, CHARACTER_LEFT, CHARACTER_WIDTH, JUMP_CLEARANCE, OBSTACLE_HEIGHT,
    OBSTACLE_WIDTH,
};
use crate::percent_to_px;

/// Axis-aligned box in pixel space, y growing upward from the ground line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Collidable box for the character in its current jump state. Airborne, the
/// underside rises above the obstacle top edge.
pub fn character_hitbox(character: &Character) -> Aabb {
    let bottom = if character.jumping { JUMP_CLEARANCE } else { 0.0 };
    Aabb::new(
        Vec2::new(CHARACTER_LEFT, bottom),
        Vec2::new(CHARACTER_LEFT + CHARACTER_WIDTH, bottom + CHARACTER_HEIGHT),
    )
}

/// Collidable box for an obstacle. The top edge sits just above the ground
/// line, independent of anything the character does.
pub fn obstacle_hitbox(obstacle: &Obstacle, field_width: f32) -> Aabb {
    let left = percent_to_px(obstacle.position, field_width);
    Aabb::new(
        Vec2::new(left, 0.0),
        Vec2::new(left + OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
    )
}

/// Outcome of one scoring scan for a single obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Boxes intersect: halve the score and drop the obstacle
    Collision,
    /// Character's left edge is fully past the obstacle: award the pass score
    Pass,
    Untouched,
}

/// Classify one obstacle against the character's current hitbox. Obstacles
/// already scored are exempt from both branches.
pub fn resolve(character: &Character, obstacle: &Obstacle, field_width: f32) -> Resolution {
    if obstacle.scored {
        return Resolution::Untouched;
    }
    let character_box = character_hitbox(character);
    let obstacle_box = obstacle_hitbox(obstacle, field_width);
    if character_box.overlaps(&obstacle_box) {
        Resolution::Collision
    } else if character_box.min.x > obstacle_box.max.x {
        Resolution::Pass
    } else {
        Resolution::Untouched
    }
}
