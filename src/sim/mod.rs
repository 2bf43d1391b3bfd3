//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by spawn id)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod field;
pub mod session;
pub mod state;

pub use clock::{Clock, Ticks};
pub use collision::{Aabb, Resolution, character_hitbox, obstacle_hitbox, resolve};
pub use field::ObstacleField;
pub use session::{RunInput, RunSession};
pub use state::{Character, Deduction, Obstacle, RngState, RunPhase};
