//! The falling, flapping player character

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// Wing animation frame (renderer maps it to a sprite)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WingFrame {
    Down,
    #[default]
    Mid,
    Up,
}

impl WingFrame {
    pub fn next(self) -> Self {
        match self {
            WingFrame::Down => WingFrame::Mid,
            WingFrame::Mid => WingFrame::Up,
            WingFrame::Up => WingFrame::Down,
        }
    }
}

/// Player character. `x` never changes during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (positive = falling)
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub frame: WingFrame,
    /// Ticks since spawn, drives the wing animation
    ticks: u32,
}

impl Actor {
    /// Spawn at the tuning's start point, at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.actor_x,
            y: tuning.spawn_y(),
            vy: 0.0,
            width: tuning.actor_width,
            height: tuning.actor_height,
            frame: WingFrame::default(),
            ticks: 0,
        }
    }

    /// Return to the spawn state in place
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Upward kick: velocity is replaced, not added to
    pub fn apply_impulse(&mut self, tuning: &Tuning) {
        self.vy = -tuning.flap_impulse;
    }

    /// Integrate one tick of gravity and advance the wing animation
    pub fn tick(&mut self, tuning: &Tuning) {
        self.vy += tuning.gravity;
        self.y += self.vy;
        if self.y < tuning.ceiling {
            self.y = tuning.ceiling;
        }

        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % tuning.wing_period.max(1) == 0 {
            self.frame = self.frame.next();
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Vertical center (used by the autopilot)
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        let y0 = actor.y;
        actor.tick(&tuning);
        assert!((actor.vy - 0.45).abs() < 1e-6);
        assert!((actor.y - (y0 + 0.45)).abs() < 1e-4);
        actor.tick(&tuning);
        assert!((actor.vy - 0.9).abs() < 1e-6);
        assert!((actor.y - (y0 + 1.35)).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_follows_closed_form() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.vy = 3.0;
        actor.apply_impulse(&tuning);
        assert_eq!(actor.vy, -tuning.flap_impulse);

        for t in 1..=30 {
            actor.tick(&tuning);
            let expected = -tuning.flap_impulse + tuning.gravity * t as f32;
            assert!((actor.vy - expected).abs() < 1e-4, "tick {t}");
        }
    }

    #[test]
    fn test_ceiling_clamp() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.y = tuning.ceiling + 1.0;
        actor.vy = -20.0;
        actor.tick(&tuning);
        assert_eq!(actor.y, tuning.ceiling);
    }

    #[test]
    fn test_wing_cycles_every_period() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        assert_eq!(actor.frame, WingFrame::Mid);
        for _ in 0..4 {
            actor.tick(&tuning);
        }
        assert_eq!(actor.frame, WingFrame::Mid);
        actor.tick(&tuning);
        assert_eq!(actor.frame, WingFrame::Up);
        for _ in 0..5 {
            actor.tick(&tuning);
        }
        assert_eq!(actor.frame, WingFrame::Down);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        for _ in 0..12 {
            actor.tick(&tuning);
        }
        actor.reset(&tuning);
        assert_eq!(actor.y, tuning.spawn_y());
        assert_eq!(actor.vy, 0.0);
        assert_eq!(actor.frame, WingFrame::Mid);
    }
}
