//! Per-frame simulation tick
//!
//! Core game loop: one call per rendered frame. Physics constants are per
//! tick, so the simulation runs at whatever rate the driver calls it.

use super::state::{CrashCause, GameEvent, GamePhase, World};

/// Logical inputs collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// The one button (key press / pointer press)
    pub impulse: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Demo mode - the built-in pilot plays the game
    pub autopilot: bool,
}

/// Apply inputs, then advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.toggle_pause {
        events.extend(world.toggle_pause());
    }

    let flap = input.impulse || (input.autopilot && autopilot_wants_flap(world));
    if flap {
        events.extend(world.apply_impulse());
    }

    events.extend(step(world));
    events
}

/// Advance a running world by one tick. Does nothing unless Running.
///
/// Order: actor, spawn, obstacles oldest-first (advance, score, collide,
/// prune), ground. The first crash ends the tick.
pub fn step(world: &mut World) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.phase != GamePhase::Running {
        return events;
    }

    world.ticks += 1;
    let difficulty = world.difficulty();

    world.actor.tick(&world.tuning);
    world.try_spawn(&difficulty);
    world.scroll_ground(difficulty.speed);

    let actor_box = world.actor.rect();
    let actor_x = world.actor.x;

    let mut i = 0;
    while i < world.obstacles.len() {
        let obstacle = &mut world.obstacles[i];
        obstacle.advance(difficulty.speed);

        if !obstacle.passed && obstacle.has_cleared(actor_x) {
            obstacle.passed = true;
            world.score += 1;
            events.push(GameEvent::Scored { score: world.score });
        }

        if obstacle.collides_with(&actor_box) {
            events.push(crash(world, CrashCause::Obstacle));
            return events;
        }

        if obstacle.is_offscreen() {
            world.obstacles.remove(i);
        } else {
            i += 1;
        }
    }

    if world.actor.bottom() >= world.tuning.ground_y() {
        events.push(crash(world, CrashCause::Ground));
    }

    events
}

fn crash(world: &mut World, cause: CrashCause) -> GameEvent {
    world.phase = GamePhase::Ended;
    log::info!(
        "Run ended by {:?} after {} ticks, score {}",
        cause,
        world.ticks,
        world.score
    );
    GameEvent::Crashed {
        cause,
        score: world.score,
    }
}

/// How far below the gap center the pilot tries to hover
const AUTOPILOT_AIM_OFFSET: f32 = 20.0;

/// Built-in pilot for demo mode: start when idle, then flap whenever the
/// actor is falling below the aim point of the next gap.
fn autopilot_wants_flap(world: &World) -> bool {
    match world.phase {
        GamePhase::Idle => true,
        GamePhase::Running => {
            let actor = &world.actor;
            let aim = world
                .obstacles
                .iter()
                .find(|o| !o.has_cleared(actor.x))
                .map(|o| o.gap_center)
                .unwrap_or_else(|| world.tuning.spawn_y())
                + AUTOPILOT_AIM_OFFSET;
            actor.vy >= 0.0 && actor.center_y() > aim
        }
        _ => false,
    }
}
