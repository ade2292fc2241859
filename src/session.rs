//! Session state machine: Idle → Running ⇄ Paused, Running → GameOver.
//!
//! Like `tick`, every transition takes the current world and returns a new
//! one. A transition that isn't valid from the current state hands back an
//! unchanged copy, so calling `pause` twice or `resume` while running is
//! harmless.

use rand::Rng;

use crate::compute::scatter_stars;
use crate::entities::{GameStatus, World};

/// The zero-argument controls a host exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
}

/// Idle/GameOver → Running with everything reset. No-op otherwise.
pub fn start(world: &World, rng: &mut impl Rng) -> World {
    match world.status {
        GameStatus::Idle | GameStatus::GameOver => {}
        GameStatus::Running | GameStatus::Paused => return world.clone(),
    }
    let mut fresh = World::new(world.rules);
    fresh.stars = scatter_stars(&fresh, rng);
    fresh.status = GameStatus::Running;
    log::info!(
        "session started (previous: {:?}, score {})",
        world.status,
        world.score
    );
    fresh
}

/// Same as `start`.
pub fn restart(world: &World, rng: &mut impl Rng) -> World {
    start(world, rng)
}

/// Running → Paused. Entities keep their state; no time passes.
pub fn pause(world: &World) -> World {
    if world.status != GameStatus::Running {
        return world.clone();
    }
    log::info!("paused at frame {}", world.frame);
    World {
        status: GameStatus::Paused,
        ..world.clone()
    }
}

/// Paused → Running.
pub fn resume(world: &World) -> World {
    if world.status != GameStatus::Paused {
        return world.clone();
    }
    log::info!("resumed at frame {}", world.frame);
    World {
        status: GameStatus::Running,
        ..world.clone()
    }
}

pub fn apply(world: &World, command: Command, rng: &mut impl Rng) -> World {
    match command {
        Command::Start => start(world, rng),
        Command::Restart => restart(world, rng),
        Command::Pause => pause(world),
        Command::Resume => resume(world),
    }
}

