//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and storage:
//! - One tick per rendered frame (constants are per tick)
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest-first)

pub mod actor;
pub mod difficulty;
pub mod geometry;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::{Actor, WingFrame};
pub use difficulty::{Difficulty, difficulty_for};
pub use geometry::{Rect, overlaps};
pub use obstacle::{Obstacle, ObstacleVariant};
pub use state::{CrashCause, GameEvent, GamePhase, ObstacleView, Snapshot, World};
pub use tick::{TickInput, step, tick};
