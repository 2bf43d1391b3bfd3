//! Cactus Dash entry point
//!
//! Headless demo driver: a scripted player spends every ticket, tapping
//! whenever an obstacle gets close, and the run results land in the log.

use std::time::{SystemTime, UNIX_EPOCH};

use cactus_dash::economy::Economy;
use cactus_dash::sim::{RunInput, RunPhase, RunSession};
use cactus_dash::tuning::{Tuning, TuningPreset};

fn main() {
    env_logger::init();

    let preset = std::env::args()
        .nth(1)
        .and_then(|arg| TuningPreset::from_str(&arg))
        .unwrap_or_default();
    let tuning = Tuning::from_preset(preset);
    log::info!("Cactus Dash starting with the {} tuning", preset.as_str());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("session seed: {}", seed);

    let mut economy = Economy::new(tuning.starting_tickets);
    let fine_tick_ms = tuning.fine_tick_ms;
    let mut session = RunSession::new(seed, tuning);

    while session.start(&mut economy) {
        while session.phase() == RunPhase::Playing {
            // Tap when an unscored obstacle is about to reach the character.
            let tap = session
                .obstacles()
                .iter()
                .any(|o| !o.scored && o.position <= 24.0 && o.position > 6.0);
            session.advance(&mut economy, RunInput { tap }, fine_tick_ms);
        }
        log::info!(
            "run finished: score {} | total {} | tickets {}",
            session.final_score().unwrap_or(0),
            economy.total_score(),
            economy.tickets()
        );
        session.dismiss();
    }

    println!(
        "out of tickets - final total score {}",
        economy.total_score()
    );
}
