//! Score-driven difficulty curve
//!
//! Each parameter is capped-linear in the score: it moves a fixed amount per
//! point and stops at a clamp so the game stays playable at any score.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Parameters derived from the current score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Obstacle scroll speed (pixels/tick)
    pub speed: f32,
    /// Vertical size of new gaps
    pub gap_height: f32,
    /// Ticks between spawn attempts
    pub spawn_interval: u32,
}

/// Difficulty for a given score. Pure; called every tick.
pub fn difficulty_for(score: u32, tuning: &Tuning) -> Difficulty {
    let s = score as f32;

    let speed = tuning.base_speed + (s * tuning.speed_per_point).min(tuning.max_speed_bonus);
    let gap_height =
        (tuning.base_gap_height - s * tuning.gap_shrink_per_point).max(tuning.min_gap_height);

    let shrink = (s * tuning.spawn_interval_per_point).floor() as u32;
    let spawn_interval = tuning
        .base_spawn_interval
        .saturating_sub(shrink)
        .max(tuning.min_spawn_interval);

    Difficulty {
        speed,
        gap_height,
        spawn_interval,
    }
}
