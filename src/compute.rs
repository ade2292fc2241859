//! The per-frame simulation step.
//!
//! `tick` takes an immutable reference to the current `World`, the elapsed
//! time, the frame's input and an RNG handle, and returns a brand-new `World`
//! plus the sound cues the frame produced. Side effects are limited to the
//! injected RNG.

use rand::Rng;

use crate::collision;
use crate::entities::{GameStatus, Player, Star, World};
use crate::events::SoundCue;
use crate::input::{InputSnapshot, TARGET_DEADZONE};
use crate::spawner;
use crate::weapon;

/// Velocities are quoted per frame at this rate.
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

const POWER_UP_PULSE_RATE: f32 = 0.005;
const PARTICLE_FADE_RATE: f32 = 0.002;

/// Result of one step.
#[derive(Clone, Debug)]
pub struct Frame {
    pub world: World,
    pub cues: Vec<SoundCue>,
}

/// Negative or non-finite deltas (clock glitches) count as no time at all.
pub fn sanitize_dt(dt_ms: f64) -> f32 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms as f32
    } else {
        0.0
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by `dt_ms` of wall-clock time. Anything but a
/// running world comes back unchanged.
pub fn tick(world: &World, dt_ms: f64, input: &InputSnapshot, rng: &mut impl Rng) -> Frame {
    let mut next = world.clone();
    let mut cues = Vec::new();
    if next.status != GameStatus::Running {
        return Frame { world: next, cues };
    }
    let dt = sanitize_dt(dt_ms);

    // ── 1. Timers ────────────────────────────────────────────────────────────
    advance_timers(&mut next.player, dt);

    // ── 2. Movement ──────────────────────────────────────────────────────────
    move_player(&mut next, input, dt);
    move_entities(&mut next, dt, rng);
    weapon::enemy_fire(&mut next, dt);

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    spawner::update(&mut next, dt, rng);

    // ── 4. Player weapon ─────────────────────────────────────────────────────
    weapon::player_fire(&mut next, dt, &mut cues);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    collision::resolve(&mut next, rng, &mut cues);

    // ── 6. Culling ───────────────────────────────────────────────────────────
    // Last, so shots, spawns and drops created this step are covered too.
    cull(&mut next);

    // ── 7. Progression ───────────────────────────────────────────────────────
    next.difficulty = spawner::difficulty_for(next.score);
    next.elapsed_ms += dt as f64;
    next.frame += 1;

    Frame { world: next, cues }
}

/// Count down every player timer by `dt`.
pub fn advance_timers(player: &mut Player, dt: f32) {
    weapon::decay(player, dt);

    if player.invulnerable {
        player.invulnerable_ms -= dt;
        if player.invulnerable_ms <= 0.0 {
            player.invulnerable = false;
            player.invulnerable_ms = 0.0;
        }
    }
    player.hit_flash_ms = (player.hit_flash_ms - dt).max(0.0);
    player.pickup_flash = player
        .pickup_flash
        .and_then(|(kind, ms)| (ms - dt > 0.0).then_some((kind, ms - dt)));
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Steer the player by the frame's intent and keep it fully on the field.
pub fn move_player(world: &mut World, input: &InputSnapshot, dt: f32) {
    let frames = dt / REFERENCE_FRAME_MS;
    let (width, height) = (world.width(), world.height());
    let player = &mut world.player;
    let step = player.speed * frames;

    match input.target {
        Some((tx, ty)) => {
            let (dx, dy) = (tx - player.x, ty - player.y);
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > TARGET_DEADZONE {
                // Don't overshoot the target on long frames.
                let travel = step.min(distance);
                player.x += dx / distance * travel;
                player.y += dy / distance * travel;
            }
        }
        None => {
            let (ix, iy) = input.direction;
            player.x += ix * step;
            player.y += iy * step;
        }
    }

    let (half_w, half_h) = (player.width / 2.0, player.height / 2.0);
    player.x = player.x.clamp(half_w, (width - half_w).max(half_w));
    player.y = player.y.clamp(half_h, (height - half_h).max(half_h));
}

/// Move every pool by one step's worth of velocity. Burnt-out particles go
/// here; everything else waits for `cull`.
pub fn move_entities(world: &mut World, dt: f32, rng: &mut impl Rng) {
    let frames = dt / REFERENCE_FRAME_MS;

    for bullet in world.bullets.iter_mut().chain(world.enemy_bullets.iter_mut()) {
        let (dx, dy) = bullet.velocity();
        bullet.x += dx * frames;
        bullet.y += dy * frames;
    }
    for enemy in world.enemies.iter_mut() {
        enemy.y += enemy.speed * frames;
    }
    for power_up in world.power_ups.iter_mut() {
        power_up.y += power_up.speed * frames;
        power_up.phase = (power_up.phase + dt * POWER_UP_PULSE_RATE) % std::f32::consts::TAU;
    }

    for particle in world.particles.iter_mut() {
        particle.x += particle.vx * frames;
        particle.y += particle.vy * frames;
        particle.life -= dt * PARTICLE_FADE_RATE;
    }
    world.particles.retain(|p| p.life > 0.0);

    let (width, height) = (world.width(), world.height());
    for star in world.stars.iter_mut() {
        star.y += star.speed * frames;
        if star.y > height {
            star.y = 0.0;
            star.x = rng.gen_range(0.0..width);
        }
    }
}

/// Drop every pooled entity lying wholly outside the playfield.
pub fn cull(world: &mut World) {
    let field = world.playfield();
    world.bullets.retain(|b| !field.is_outside(b));
    world.enemy_bullets.retain(|b| !field.is_outside(b));
    world.enemies.retain(|e| !field.is_outside(e));
    world.power_ups.retain(|p| !field.is_outside(p));
}

/// A fresh starfield covering the whole playfield.
pub fn scatter_stars(world: &World, rng: &mut impl Rng) -> Vec<Star> {
    (0..world.rules.star_count)
        .map(|_| Star {
            x: rng.gen_range(0.0..world.width()),
            y: rng.gen_range(0.0..world.height()),
            size: rng.gen_range(0.0..2.0),
            speed: rng.gen_range(0.5..1.5),
        })
        .collect()
}
