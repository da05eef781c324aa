//! Scrolling gap-pair obstacles
//!
//! An obstacle is two solid columns with a passable gap between them. The
//! stored vertical value is always the gap's *center*; both solid rectangles
//! are derived from it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, overlaps};
use crate::tuning::Tuning;

/// Cosmetic obstacle variant (renderer maps it to a sprite)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleVariant {
    #[default]
    Green,
    Red,
}

impl ObstacleVariant {
    /// Weighted coin flip: red with the given probability
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, red_chance: f64) -> Self {
        if rng.random_bool(red_chance) {
            ObstacleVariant::Red
        } else {
            ObstacleVariant::Green
        }
    }
}

/// A gap-pair entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Vertical center of the gap
    pub gap_center: f32,
    pub gap_height: f32,
    /// Ground line the bottom column extends to
    pub ground_y: f32,
    /// Set once the actor has cleared this obstacle
    pub passed: bool,
    pub variant: ObstacleVariant,
}

impl Obstacle {
    pub fn new(
        x: f32,
        gap_center: f32,
        gap_height: f32,
        variant: ObstacleVariant,
        tuning: &Tuning,
    ) -> Self {
        Self {
            x,
            width: tuning.obstacle_width,
            gap_center,
            gap_height,
            ground_y: tuning.ground_y(),
            passed: false,
            variant,
        }
    }

    /// Scroll left by `speed`
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Right edge has crossed the field's left boundary
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    /// Trailing edge is strictly behind `actor_x`
    pub fn has_cleared(&self, actor_x: f32) -> bool {
        self.right() < actor_x
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    /// Solid column from the field top down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top())
    }

    /// Solid column from the gap down to the ground line
    pub fn bottom_rect(&self) -> Rect {
        let top = self.gap_bottom();
        Rect::new(self.x, top, self.width, self.ground_y - top)
    }

    pub fn collides_with(&self, actor: &Rect) -> bool {
        overlaps(actor, &self.top_rect()) || overlaps(actor, &self.bottom_rect())
    }
}

/// Range of legal gap centers for a gap of `gap_height`
pub fn gap_center_range(gap_height: f32, tuning: &Tuning) -> (f32, f32) {
    let half = gap_height / 2.0;
    let min = tuning.gap_margin + half;
    let max = tuning.ground_y() - tuning.gap_margin - half;
    (min, max.max(min))
}

/// Build a new obstacle at the spawn boundary with a random gap and variant
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R, gap_height: f32, tuning: &Tuning) -> Obstacle {
    let (min, max) = gap_center_range(gap_height, tuning);
    let gap_center = rng.random_range(min..=max);
    let variant = ObstacleVariant::roll(rng, tuning.red_variant_chance);
    Obstacle::new(
        tuning.field_width + tuning.spawn_offset,
        gap_center,
        gap_height,
        variant,
        tuning,
    )
}

/// Whether a new obstacle may spawn given the most recent one
pub fn clearance_ok(newest: Option<&Obstacle>, tuning: &Tuning) -> bool {
    match newest {
        Some(last) => last.right() <= tuning.field_width - tuning.min_clearance,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle_at(x: f32, gap_center: f32) -> Obstacle {
        Obstacle::new(x, gap_center, 100.0, ObstacleVariant::Green, &Tuning::default())
    }

    #[test]
    fn test_rects_frame_the_gap() {
        let o = obstacle_at(100.0, 200.0);
        let top = o.top_rect();
        let bottom = o.bottom_rect();
        assert_eq!(top.y(), 0.0);
        assert_eq!(top.bottom(), 150.0);
        assert_eq!(bottom.y(), 250.0);
        // Bottom column stops at the ground line, not the canvas bottom
        assert_eq!(bottom.bottom(), 400.0);
        assert_eq!(top.size.x, 52.0);
    }

    #[test]
    fn test_actor_in_gap_does_not_collide() {
        let o = obstacle_at(100.0, 200.0);
        let actor = Rect::new(110.0, 180.0, 34.0, 24.0);
        assert!(!o.collides_with(&actor));
    }

    #[test]
    fn test_actor_hits_top_and_bottom() {
        let o = obstacle_at(100.0, 200.0);
        let high = Rect::new(110.0, 140.0, 34.0, 24.0);
        let low = Rect::new(110.0, 240.0, 34.0, 24.0);
        assert!(o.collides_with(&high));
        assert!(o.collides_with(&low));
    }

    #[test]
    fn test_actor_touching_gap_edge_is_safe() {
        let o = obstacle_at(100.0, 200.0);
        // Top of actor exactly on the top column's bottom edge
        let touching = Rect::new(110.0, 150.0, 34.0, 24.0);
        assert!(!o.collides_with(&touching));
    }

    #[test]
    fn test_offscreen_and_cleared() {
        let mut o = obstacle_at(10.0, 200.0);
        assert!(!o.is_offscreen());
        assert!(!o.has_cleared(62.0));
        o.advance(0.5);
        assert!(o.has_cleared(62.0));
        o.advance(62.0);
        assert!(o.is_offscreen());
    }

    #[test]
    fn test_spawned_gap_stays_inside_margins() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for gap in [200.0, 160.0, 120.0] {
            for _ in 0..200 {
                let o = spawn_obstacle(&mut rng, gap, &tuning);
                assert!(o.gap_top() >= tuning.gap_margin - 1e-3);
                assert!(o.gap_bottom() <= tuning.ground_y() - tuning.gap_margin + 1e-3);
                assert_eq!(o.x, tuning.field_width + tuning.spawn_offset);
                assert!(!o.passed);
            }
        }
    }

    #[test]
    fn test_variant_roll_extremes() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(ObstacleVariant::roll(&mut rng, 0.0), ObstacleVariant::Green);
        assert_eq!(ObstacleVariant::roll(&mut rng, 1.0), ObstacleVariant::Red);
    }

    #[test]
    fn test_default_variant_mix() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let rolls = 10_000;
        let red = (0..rolls)
            .filter(|_| ObstacleVariant::roll(&mut rng, tuning.red_variant_chance) == ObstacleVariant::Red)
            .count();
        let share = red as f64 / rolls as f64;
        assert!((0.42..=0.48).contains(&share), "red share {share}");
    }

    #[test]
    fn test_clearance() {
        let tuning = Tuning::default();
        assert!(clearance_ok(None, &tuning));
        // Right edge at 200 > 288 - 140
        let near = obstacle_at(148.0, 200.0);
        assert!(!clearance_ok(Some(&near), &tuning));
        // Right edge at exactly 148
        let far = obstacle_at(96.0, 200.0);
        assert!(clearance_ok(Some(&far), &tuning));
    }
}
