//! Data-driven game balance
//!
//! Two shipped tunings of the same engine, expressed as presets over a single
//! parameter set. Baseline is the default; Tuned packs the field denser and
//! scrolls it faster.

use serde::{Deserialize, Serialize};

use crate::px_to_percent;

/// Balance preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    #[default]
    Baseline,
    Tuned,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Baseline => "Baseline",
            TuningPreset::Tuned => "Tuned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "baseline" | "base" => Some(TuningPreset::Baseline),
            "tuned" => Some(TuningPreset::Tuned),
            _ => None,
        }
    }
}

/// How obstacle scroll speed is expressed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementSpeed {
    /// Flat percent of field width per motion tick.
    PercentPerTick(f32),
    /// Pixels per motion tick, converted through the current field width.
    /// Keeps apparent speed constant when the container is resized.
    PixelsPerTick(f32),
}

impl MovementSpeed {
    /// Scroll step in field-percent for one motion tick.
    pub fn step_percent(&self, field_width: f32) -> f32 {
        match *self {
            MovementSpeed::PercentPerTick(percent) => percent,
            MovementSpeed::PixelsPerTick(px) => px_to_percent(px, field_width),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Length of one run, seconds
    pub run_duration_secs: u32,
    /// Tickets a fresh economy starts with
    pub starting_tickets: u32,

    // === Obstacle field ===
    /// Cap on concurrently live obstacles; spawns are dropped at the cap
    pub max_obstacles: usize,
    /// Horizontal gap between consecutive spawns, percent of field width
    pub spawn_gap_range: (f32, f32),
    /// Delay between spawn attempts, ms; redrawn after every attempt
    pub spawn_delay_range: (u64, u64),
    /// Scroll rate
    pub movement: MovementSpeed,
    /// Rendered field width, pixels
    pub field_width_px: f32,

    // === Character ===
    /// Fixed jump arc length, ms (not input-modulated)
    pub jump_duration_ms: u64,

    // === Scoring ===
    /// Award for clearing an obstacle
    pub pass_score: i64,
    /// Award for plain survival, every `passive_score_interval_ms`
    pub passive_score: i64,
    pub passive_score_interval_ms: u64,
    /// Cadence of the collision/scoring scan, ms
    pub collision_check_interval_ms: u64,

    // === Clock ===
    /// Motion tick period, ms
    pub fine_tick_ms: u64,
    /// Countdown tick period, ms
    pub coarse_tick_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            run_duration_secs: 30,
            starting_tickets: 5,

            max_obstacles: 10,
            spawn_gap_range: (20.0, 60.0),
            spawn_delay_range: (160, 400),
            movement: MovementSpeed::PercentPerTick(1.2),
            field_width_px: 300.0,

            jump_duration_ms: 480,

            pass_score: 10,
            passive_score: 1,
            passive_score_interval_ms: 2400,
            collision_check_interval_ms: 100,

            fine_tick_ms: 16,
            coarse_tick_ms: 1000,
        }
    }
}

impl Tuning {
    /// Build the parameter set for a named preset.
    pub fn from_preset(preset: TuningPreset) -> Self {
        match preset {
            TuningPreset::Baseline => Self::default(),
            TuningPreset::Tuned => Self {
                max_obstacles: 20,
                spawn_gap_range: (30.0, 50.0),
                spawn_delay_range: (200, 360),
                movement: MovementSpeed::PixelsPerTick(4.5),
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_default() {
        let baseline = Tuning::from_preset(TuningPreset::Baseline);
        assert_eq!(baseline.max_obstacles, 10);
        assert_eq!(baseline.spawn_gap_range, (20.0, 60.0));
        assert_eq!(baseline.spawn_delay_range, (160, 400));
        assert_eq!(baseline.run_duration_secs, 30);
        assert_eq!(baseline.starting_tickets, 5);
    }

    #[test]
    fn tuned_preset_overrides_field_density() {
        let tuned = Tuning::from_preset(TuningPreset::Tuned);
        assert_eq!(tuned.max_obstacles, 20);
        assert_eq!(tuned.spawn_gap_range, (30.0, 50.0));
        assert_eq!(tuned.spawn_delay_range, (200, 360));
        // Shared parameters follow the baseline
        assert_eq!(tuned.jump_duration_ms, 480);
        assert_eq!(tuned.collision_check_interval_ms, 100);
    }

    #[test]
    fn movement_step_converts_pixels_through_field_width() {
        assert_eq!(MovementSpeed::PercentPerTick(1.2).step_percent(300.0), 1.2);
        // 4.5 px on a 300 px field is 1.5 percent
        let step = MovementSpeed::PixelsPerTick(4.5).step_percent(300.0);
        assert!((step - 1.5).abs() < 1e-5);
        // Same pixel speed on a wider field is a smaller percent step
        let step = MovementSpeed::PixelsPerTick(4.5).step_percent(600.0);
        assert!((step - 0.75).abs() < 1e-5);
    }

    #[test]
    fn preset_round_trips_through_str() {
        for preset in [TuningPreset::Baseline, TuningPreset::Tuned] {
            assert_eq!(TuningPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(TuningPreset::from_str("nope"), None);
    }
}
