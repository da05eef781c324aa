//! Sky Hopper - a one-button gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, obstacles, collisions, scoring)
//! - `run`: Run controller (high score, ranking hand-off, audio cues)
//! - `highscores`: Best score record and bounded top-N ranking
//! - `persistence`: Key/value record storage
//! - `platform`: Native/browser storage backends, asset preload gate, wasm facade
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod run;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{HopperError, Result};
pub use highscores::{BestScore, BlankNamePolicy, Ranking, RankingEntry};
pub use run::RunController;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// All values are per tick (one tick per rendered frame) and in canvas pixels.
/// They seed `Tuning::default()`; the simulation only reads them through `Tuning`.
pub mod consts {
    /// Canvas dimensions
    pub const FIELD_WIDTH: f32 = 288.0;
    pub const FIELD_HEIGHT: f32 = 512.0;
    /// Height of the decorative ground strip below the ground line
    pub const GROUND_STRIP_HEIGHT: f32 = 112.0;
    /// Width of one ground tile (scroll wraps at this width)
    pub const GROUND_TILE_WIDTH: f32 = 336.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 120.0;
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;
    /// Highest the actor may travel (above the visible field)
    pub const ACTOR_CEILING: f32 = -40.0;
    /// Ticks between wing frame changes
    pub const WING_PERIOD: u32 = 5;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.45;
    /// Upward velocity set by an impulse (pixels/tick)
    pub const FLAP_IMPULSE: f32 = 7.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    /// Spawn x is this far beyond the right edge
    pub const SPAWN_OFFSET: f32 = 10.0;
    /// Minimum gap between newest obstacle's right edge and the field's right edge
    pub const MIN_CLEARANCE: f32 = 140.0;
    /// Gaps keep this distance from the field top and the ground line
    pub const GAP_MARGIN: f32 = 40.0;
    /// Probability a new obstacle uses the red variant
    pub const RED_VARIANT_CHANCE: f64 = 0.45;

    /// Difficulty curve
    pub const BASE_SPEED: f32 = 2.2;
    pub const SPEED_PER_POINT: f32 = 0.03;
    pub const MAX_SPEED_BONUS: f32 = 3.3;
    pub const BASE_GAP_HEIGHT: f32 = 200.0;
    pub const GAP_SHRINK_PER_POINT: f32 = 2.0;
    pub const MIN_GAP_HEIGHT: f32 = 120.0;
    pub const BASE_SPAWN_INTERVAL: u32 = 110;
    pub const SPAWN_INTERVAL_PER_POINT: f32 = 0.6;
    pub const MIN_SPAWN_INTERVAL: u32 = 50;
}
