//! Cactus Dash - a ticket-gated endless-runner mini-game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle field, collisions, run lifecycle)
//! - `economy`: Process-wide ticket and score ledger
//! - `tuning`: Data-driven game balance

pub mod economy;
pub mod sim;
pub mod tuning;

pub use economy::Economy;
pub use tuning::{MovementSpeed, Tuning, TuningPreset};

/// Game geometry constants
pub mod consts {
    /// Obstacles are dropped once their position falls below this (percent of
    /// field width).
    pub const DESPAWN_POSITION: f32 = -20.0;
    /// Fresh obstacles never appear left of this position (percent); 100 is
    /// the right edge of the field.
    pub const SPAWN_EDGE: f32 = 100.0;

    /// Obstacle hitbox, pixels. The top edge sits a fixed height above the
    /// ground line regardless of anything the character does.
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Character hitbox, pixels. The character never moves horizontally; the
    /// field scrolls past it instead.
    pub const CHARACTER_LEFT: f32 = 30.0;
    pub const CHARACTER_WIDTH: f32 = 30.0;
    pub const CHARACTER_HEIGHT: f32 = 44.0;
    /// Height of the character's underside at the top of a jump. Above
    /// OBSTACLE_HEIGHT, so an airborne character clears every cactus.
    pub const JUMP_CLEARANCE: f32 = 48.0;

    /// Lifetime of a floating deduction display event.
    pub const DEDUCTION_TTL_MS: u64 = 1000;
}

/// Convert a field-percent coordinate to pixels for the given field width.
#[inline]
pub fn percent_to_px(percent: f32, field_width: f32) -> f32 {
    percent / 100.0 * field_width
}

/// Convert a pixel distance to field-percent for the given field width.
#[inline]
pub fn px_to_percent(px: f32, field_width: f32) -> f32 {
    px / field_width * 100.0
}
