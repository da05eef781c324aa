//! World state and lifecycle
//!
//! A single owned `World` holds everything a run mutates. Difficulty is never
//! stored: it is derived from the score whenever it is needed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, WingFrame};
use super::difficulty::{Difficulty, difficulty_for};
use super::geometry::Rect;
use super::obstacle::{Obstacle, ObstacleVariant, clearance_ok, spawn_obstacle};
use crate::error::Result;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Idle,
    /// Active gameplay
    Running,
    /// Frozen by the player; the driver stops stepping
    Paused,
    /// Run ended by a crash; state is frozen for display
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Ground,
}

/// Events produced by world operations, consumed by the run controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    Paused,
    Resumed,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    pub actor: Actor,
    /// Oldest first
    pub obstacles: Vec<Obstacle>,
    /// Ticks since the last successful spawn
    pub spawn_counter: u32,
    /// Decorative ground offset, wraps at `ground_tile_width`
    pub ground_scroll: f32,
    /// Ticks since run start
    pub ticks: u64,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create an idle world; `seed` drives gap placement and variants.
    /// Fails if `tuning` does not validate.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let actor = Actor::new(&tuning);
        Ok(Self {
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            actor,
            obstacles: Vec::new(),
            spawn_counter: 0,
            ground_scroll: 0.0,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Difficulty for the current score
    pub fn difficulty(&self) -> Difficulty {
        difficulty_for(self.score, &self.tuning)
    }

    fn clear_run(&mut self) {
        self.score = 0;
        self.obstacles.clear();
        self.actor.reset(&self.tuning);
        self.spawn_counter = 0;
        self.ground_scroll = 0.0;
        self.ticks = 0;
    }

    /// Begin a fresh run. Valid from Idle or Ended; ignored otherwise.
    pub fn start(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Idle | GamePhase::Ended => {
                self.clear_run();
                self.phase = GamePhase::Running;
                log::info!("Run started");
                Some(GameEvent::Started)
            }
            _ => None,
        }
    }

    /// Return to Idle with a cleared field
    pub fn reset(&mut self) {
        self.clear_run();
        self.phase = GamePhase::Idle;
    }

    /// Running <-> Paused. Nothing else changes.
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                Some(GameEvent::Paused)
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                Some(GameEvent::Resumed)
            }
            _ => None,
        }
    }

    /// The player's one button: starts a run when idle or ended, flaps when running
    pub fn apply_impulse(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Idle | GamePhase::Ended => self.start(),
            GamePhase::Running => {
                self.actor.apply_impulse(&self.tuning);
                Some(GameEvent::Flapped)
            }
            GamePhase::Paused => None,
        }
    }

    /// Count one tick toward the next spawn and create an obstacle when both
    /// the interval and the clearance allow it. The counter is only reset on
    /// a successful spawn.
    pub fn try_spawn(&mut self, difficulty: &Difficulty) -> bool {
        self.spawn_counter = self.spawn_counter.saturating_add(1);
        if self.spawn_counter < difficulty.spawn_interval {
            return false;
        }
        if !clearance_ok(self.obstacles.last(), &self.tuning) {
            return false;
        }

        let obstacle = spawn_obstacle(&mut self.rng, difficulty.gap_height, &self.tuning);
        log::debug!(
            "Spawned {:?} obstacle, gap center {:.1}, height {:.1}",
            obstacle.variant,
            obstacle.gap_center,
            obstacle.gap_height
        );
        self.obstacles.push(obstacle);
        self.spawn_counter = 0;
        true
    }

    /// Scroll the decorative ground strip
    pub fn scroll_ground(&mut self, speed: f32) {
        let tile = self.tuning.ground_tile_width;
        if tile > 0.0 {
            self.ground_scroll = (self.ground_scroll - speed) % tile;
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            actor: self.actor.rect(),
            actor_velocity: self.actor.vy,
            wing: self.actor.frame,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    top: o.top_rect(),
                    bottom: o.bottom_rect(),
                    variant: o.variant,
                    passed: o.passed,
                })
                .collect(),
            ground_y: self.tuning.ground_y(),
            ground_scroll: self.ground_scroll,
        }
    }
}

/// Render view of one obstacle
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub top: Rect,
    pub bottom: Rect,
    pub variant: ObstacleVariant,
    pub passed: bool,
}

/// Render view of the whole world
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub actor: Rect,
    pub actor_velocity: f32,
    pub wing: WingFrame,
    pub obstacles: Vec<ObstacleView>,
    pub ground_y: f32,
    pub ground_scroll: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HopperError;

    #[test]
    fn test_new_world_is_idle() {
        let world = World::new(Tuning::default(), 1).unwrap();
        assert_eq!(world.phase, GamePhase::Idle);
        assert_eq!(world.score, 0);
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            red_variant_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            World::new(tuning, 1),
            Err(HopperError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_impulse_while_idle_starts() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        let vy_before = world.actor.vy;
        assert_eq!(world.apply_impulse(), Some(GameEvent::Started));
        assert_eq!(world.phase, GamePhase::Running);
        // Starting does not flap
        assert_eq!(world.actor.vy, vy_before);
        assert_eq!(world.apply_impulse(), Some(GameEvent::Flapped));
        assert_eq!(world.actor.vy, -world.tuning.flap_impulse);
    }

    #[test]
    fn test_pause_toggle_only_from_running() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        assert_eq!(world.toggle_pause(), None);
        world.start();
        assert_eq!(world.toggle_pause(), Some(GameEvent::Paused));
        assert_eq!(world.phase, GamePhase::Paused);
        // Impulses are ignored while paused
        assert_eq!(world.apply_impulse(), None);
        assert_eq!(world.toggle_pause(), Some(GameEvent::Resumed));
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_start_clears_previous_run() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        world.start();
        world.score = 9;
        world.spawn_counter = 40;
        world.ground_scroll = -12.0;
        world.phase = GamePhase::Ended;
        let d = world.difficulty();
        world.spawn_counter = d.spawn_interval;
        world.try_spawn(&d);
        assert!(!world.obstacles.is_empty());

        assert_eq!(world.start(), Some(GameEvent::Started));
        assert_eq!(world.score, 0);
        assert!(world.obstacles.is_empty());
        assert_eq!(world.spawn_counter, 0);
        assert_eq!(world.ground_scroll, 0.0);
        assert_eq!(world.actor.y, world.tuning.spawn_y());
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        world.start();
        world.score = 3;
        assert_eq!(world.start(), None);
        assert_eq!(world.score, 3);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut world = World::new(Tuning::default(), 3).unwrap();
        world.start();
        let d = world.difficulty();
        for _ in 1..d.spawn_interval {
            assert!(!world.try_spawn(&d));
        }
        assert!(world.try_spawn(&d));
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.spawn_counter, 0);
    }

    #[test]
    fn test_spawn_rejected_by_clearance_keeps_counter() {
        let mut world = World::new(Tuning::default(), 3).unwrap();
        world.start();
        let d = world.difficulty();
        world.spawn_counter = d.spawn_interval;
        assert!(world.try_spawn(&d));

        // Newest obstacle is still at the right edge, so clearance fails
        world.spawn_counter = d.spawn_interval;
        assert!(!world.try_spawn(&d));
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.spawn_counter, d.spawn_interval + 1);

        // Once it has scrolled far enough, the next attempt succeeds
        world.obstacles[0].x = 0.0;
        assert!(world.try_spawn(&d));
        assert_eq!(world.obstacles.len(), 2);
        assert_eq!(world.spawn_counter, 0);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = World::new(Tuning::default(), 42).unwrap();
        let mut b = World::new(Tuning::default(), 42).unwrap();
        a.start();
        b.start();
        let d = a.difficulty();
        for _ in 0..3 {
            a.spawn_counter = d.spawn_interval;
            b.spawn_counter = d.spawn_interval;
            a.obstacles.iter_mut().for_each(|o| o.x = 0.0);
            b.obstacles.iter_mut().for_each(|o| o.x = 0.0);
            a.try_spawn(&d);
            b.try_spawn(&d);
        }
        let gaps_a: Vec<f32> = a.obstacles.iter().map(|o| o.gap_center).collect();
        let gaps_b: Vec<f32> = b.obstacles.iter().map(|o| o.gap_center).collect();
        assert_eq!(gaps_a.len(), 3);
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn test_ground_scroll_wraps() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        for _ in 0..200 {
            world.scroll_ground(5.0);
            assert!(world.ground_scroll <= 0.0);
            assert!(world.ground_scroll > -world.tuning.ground_tile_width);
        }
    }

    #[test]
    fn test_snapshot_mirrors_world() {
        let mut world = World::new(Tuning::default(), 5).unwrap();
        world.start();
        let d = world.difficulty();
        world.spawn_counter = d.spawn_interval;
        world.try_spawn(&d);
        let snap = world.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].bottom.bottom(), snap.ground_y);
        assert_eq!(snap.actor, world.actor.rect());
    }
}
