//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a run can be retuned from
//! JSON without touching code. `Tuning::default()` reproduces the classic feel.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{HopperError, Result};

/// Gameplay constants (per tick, canvas pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Decorative strip under the ground line; the ground line is `field_height - ground_strip`
    pub ground_strip: f32,
    pub ground_tile_width: f32,

    // === Actor ===
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub ceiling: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub wing_period: u32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub spawn_offset: f32,
    pub min_clearance: f32,
    pub gap_margin: f32,
    pub red_variant_chance: f64,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_per_point: f32,
    pub max_speed_bonus: f32,
    pub base_gap_height: f32,
    pub gap_shrink_per_point: f32,
    pub min_gap_height: f32,
    pub base_spawn_interval: u32,
    pub spawn_interval_per_point: f32,
    pub min_spawn_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_strip: GROUND_STRIP_HEIGHT,
            ground_tile_width: GROUND_TILE_WIDTH,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            ceiling: ACTOR_CEILING,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            wing_period: WING_PERIOD,

            obstacle_width: OBSTACLE_WIDTH,
            spawn_offset: SPAWN_OFFSET,
            min_clearance: MIN_CLEARANCE,
            gap_margin: GAP_MARGIN,
            red_variant_chance: RED_VARIANT_CHANCE,

            base_speed: BASE_SPEED,
            speed_per_point: SPEED_PER_POINT,
            max_speed_bonus: MAX_SPEED_BONUS,
            base_gap_height: BASE_GAP_HEIGHT,
            gap_shrink_per_point: GAP_SHRINK_PER_POINT,
            min_gap_height: MIN_GAP_HEIGHT,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_interval_per_point: SPAWN_INTERVAL_PER_POINT,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the ground line (collision floor)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_strip
    }

    /// Actor spawn height (middle of the canvas)
    #[inline]
    pub fn spawn_y(&self) -> f32 {
        self.field_height / 2.0
    }

    /// Reject values that would make the difficulty curve non-monotonic or
    /// leave no room to place a gap.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(HopperError::InvalidTuning(msg.to_string()));

        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return fail("field dimensions must be positive");
        }
        if self.ground_strip < 0.0 || self.ground_strip >= self.field_height {
            return fail("ground strip must fit inside the field");
        }
        if self.actor_width <= 0.0 || self.actor_height <= 0.0 || self.obstacle_width <= 0.0 {
            return fail("entity sizes must be positive");
        }
        if self.wing_period == 0 {
            return fail("wing_period must be at least 1");
        }
        if self.speed_per_point < 0.0 || self.max_speed_bonus < 0.0 {
            return fail("speed must not decrease with score");
        }
        if self.gap_shrink_per_point < 0.0 || self.min_gap_height > self.base_gap_height {
            return fail("gap height must not grow with score");
        }
        if self.min_gap_height <= 0.0 {
            return fail("min_gap_height must be positive");
        }
        if self.spawn_interval_per_point < 0.0
            || self.min_spawn_interval > self.base_spawn_interval
        {
            return fail("spawn interval must not grow with score");
        }
        if !(0.0..=1.0).contains(&self.red_variant_chance) {
            return fail("red_variant_chance must be within [0, 1]");
        }
        // The widest gap (score 0) must still fit between the margins
        if self.base_gap_height + 2.0 * self.gap_margin > self.ground_y() {
            return fail("gap plus margins taller than the playable field");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ground_y(), 400.0);
        assert_eq!(tuning.spawn_y(), 256.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.3);
        assert_eq!(tuning.flap_impulse, FLAP_IMPULSE);
    }

    #[test]
    fn test_rejects_growing_gap() {
        let json = r#"{ "gap_shrink_per_point": -1.0 }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(HopperError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_rejects_gap_taller_than_field() {
        let tuning = Tuning {
            base_gap_height: 380.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
