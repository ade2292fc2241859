//! Collision detection and resolution.
//!
//! Four passes run in a fixed order every step:
//!
//! 1. player bullets ↔ enemies
//! 2. enemy bullets ↔ player
//! 3. enemies ↔ player
//! 4. power-ups ↔ player
//!
//! Each pass marks what it consumes and compacts the pools afterwards, so
//! removal never shifts an entity out from under the loop visiting it.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::{
    Body, Enemy, EnemyKind, GameStatus, Particle, ParticleSource, Player, PowerUp, PowerUpKind,
    World, MAX_HEALTH,
};
use crate::events::SoundCue;
use crate::weapon;

pub const DROP_CHANCE: f64 = 0.3;
pub const ENEMY_BULLET_DAMAGE: u32 = 5;
pub const HEALTH_PICKUP: u32 = 25;

pub const HIT_FLASH_MS: f32 = 500.0;
pub const INVULNERABLE_MS: f32 = 1000.0;
pub const PICKUP_FLASH_MS: f32 = 500.0;

const EXPLOSION_PARTICLES: usize = 15;
const PICKUP_PARTICLES: usize = 10;
const PARTICLE_MAX_SPEED: f32 = 3.0;

/// Axis-aligned overlap of two center-anchored boxes. Touching edges don't
/// count.
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    let (ax, ay) = a.center();
    let (aw, ah) = a.size();
    let (bx, by) = b.center();
    let (bw, bh) = b.size();
    (ax - bx).abs() < (aw + bw) / 2.0 && (ay - by).abs() < (ah + bh) / 2.0
}

/// Run all four passes in order. Stops early once the player is dead so a
/// pickup later in the frame can't heal a finished run.
pub fn resolve(world: &mut World, rng: &mut impl Rng, cues: &mut Vec<SoundCue>) {
    bullets_vs_enemies(world, rng, cues);
    if world.status != GameStatus::Running {
        return;
    }
    enemy_bullets_vs_player(world, cues);
    if world.status != GameStatus::Running {
        return;
    }
    enemies_vs_player(world, rng, cues);
    if world.status != GameStatus::Running {
        return;
    }
    power_ups_vs_player(world, rng, cues);
}

// ── Pass 1: player bullets ↔ enemies ─────────────────────────────────────────

/// Each bullet hits at most the first live enemy it overlaps, in pool
/// order, and is consumed by that hit.
pub fn bullets_vs_enemies(world: &mut World, rng: &mut impl Rng, cues: &mut Vec<SoundCue>) {
    let mut spent = vec![false; world.bullets.len()];
    let mut destroyed = vec![false; world.enemies.len()];
    let mut drops = Vec::new();

    for (bi, bullet) in world.bullets.iter().enumerate() {
        let target = world
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !destroyed[*ei] && overlaps(bullet, *enemy))
            .map(|(ei, _)| ei);
        let Some(ei) = target else {
            continue;
        };

        spent[bi] = true;
        let enemy = &mut world.enemies[ei];
        enemy.health -= 1;
        if enemy.health > 0 {
            continue;
        }

        destroyed[ei] = true;
        let enemy = enemy.clone();
        world.score = world.score.saturating_add(enemy.kind.profile().score);
        world.kills += 1;
        cues.push(SoundCue::Explosion);
        burst(
            &mut world.particles,
            enemy.x,
            enemy.y,
            EXPLOSION_PARTICLES,
            ParticleSource::Explosion(enemy.kind),
            rng,
        );
        if let Some(drop) = roll_drop(&enemy, rng) {
            log::debug!("{:?} dropped {:?}", enemy.kind, drop.kind);
            drops.push(drop);
        }
    }

    compact(&mut world.bullets, &spent);
    compact(&mut world.enemies, &destroyed);
    world.power_ups.extend(drops);
}

/// 30% of kills leave a power-up; the kind leans on what was killed.
pub fn roll_drop(enemy: &Enemy, rng: &mut impl Rng) -> Option<PowerUp> {
    if !rng.gen_bool(DROP_CHANCE) {
        return None;
    }
    Some(PowerUp::new(drop_kind(enemy.kind, rng), enemy.x, enemy.y))
}

pub fn drop_kind(kind: EnemyKind, rng: &mut impl Rng) -> PowerUpKind {
    if rng.gen_bool(kind.profile().weapon_drop_bias) {
        PowerUpKind::Weapon
    } else {
        PowerUpKind::Health
    }
}

// ── Pass 2: enemy bullets ↔ player ───────────────────────────────────────────

pub fn enemy_bullets_vs_player(world: &mut World, cues: &mut Vec<SoundCue>) {
    let mut spent = vec![false; world.enemy_bullets.len()];
    for (i, bullet) in world.enemy_bullets.iter().enumerate() {
        if world.player.invulnerable {
            break;
        }
        if overlaps(bullet, &world.player) {
            spent[i] = true;
            apply_damage(&mut world.player, &mut world.status, ENEMY_BULLET_DAMAGE, cues);
        }
    }
    compact(&mut world.enemy_bullets, &spent);
}

// ── Pass 3: enemies ↔ player ─────────────────────────────────────────────────

pub fn enemies_vs_player(world: &mut World, rng: &mut impl Rng, cues: &mut Vec<SoundCue>) {
    let mut rammed = vec![false; world.enemies.len()];
    let mut wrecks = Vec::new();
    for (i, enemy) in world.enemies.iter().enumerate() {
        if world.player.invulnerable {
            break;
        }
        if overlaps(enemy, &world.player) {
            rammed[i] = true;
            let damage = enemy.kind.profile().contact_damage;
            apply_damage(&mut world.player, &mut world.status, damage, cues);
            cues.push(SoundCue::Explosion);
            wrecks.push((enemy.x, enemy.y, enemy.kind));
        }
    }
    compact(&mut world.enemies, &rammed);

    for (x, y, kind) in wrecks {
        burst(
            &mut world.particles,
            x,
            y,
            EXPLOSION_PARTICLES,
            ParticleSource::Explosion(kind),
            rng,
        );
    }
}

// ── Pass 4: power-ups ↔ player ───────────────────────────────────────────────

/// Pickups ignore invulnerability.
pub fn power_ups_vs_player(world: &mut World, rng: &mut impl Rng, cues: &mut Vec<SoundCue>) {
    if world.status == GameStatus::GameOver {
        return;
    }
    let mut taken = vec![false; world.power_ups.len()];
    let mut collected = Vec::new();
    for (i, power_up) in world.power_ups.iter().enumerate() {
        if overlaps(power_up, &world.player) {
            taken[i] = true;
            collected.push(power_up.clone());
        }
    }
    compact(&mut world.power_ups, &taken);

    for power_up in collected {
        collect(world, power_up.kind);
        cues.push(SoundCue::PowerUp);
        burst(
            &mut world.particles,
            power_up.x,
            power_up.y,
            PICKUP_PARTICLES,
            ParticleSource::Pickup(power_up.kind),
            rng,
        );
    }
}

/// Apply a pickup's effect to the player.
pub fn collect(world: &mut World, kind: PowerUpKind) {
    let player = &mut world.player;
    match kind {
        PowerUpKind::Health => {
            player.health = (player.health + HEALTH_PICKUP).min(MAX_HEALTH);
        }
        PowerUpKind::Weapon => weapon::level_up(player),
    }
    player.pickup_flash = Some((kind, PICKUP_FLASH_MS));
}

// ── Damage ───────────────────────────────────────────────────────────────────

/// Shared damage path: clamp at zero, start the flash and invulnerability
/// windows, and end the run the first time health reaches zero.
pub fn apply_damage(
    player: &mut Player,
    status: &mut GameStatus,
    amount: u32,
    cues: &mut Vec<SoundCue>,
) {
    player.health = player.health.saturating_sub(amount);
    player.hit_flash_ms = HIT_FLASH_MS;
    player.invulnerable = true;
    player.invulnerable_ms = INVULNERABLE_MS;
    cues.push(SoundCue::Hit);

    if player.health == 0 && *status == GameStatus::Running {
        *status = GameStatus::GameOver;
        log::info!("player destroyed, game over");
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn burst(
    particles: &mut Vec<Particle>,
    x: f32,
    y: f32,
    count: usize,
    source: ParticleSource,
    rng: &mut impl Rng,
) {
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        let reach = rng.gen::<f32>() * PARTICLE_MAX_SPEED;
        particles.push(Particle {
            x,
            y,
            vx: angle.cos() * reach,
            vy: angle.sin() * reach,
            size: rng.gen::<f32>() * 3.0 + 1.0,
            life: 1.0,
            source,
        });
    }
}

/// Drop every element whose flag is set, keeping the rest in order.
fn compact<T>(pool: &mut Vec<T>, remove: &[bool]) {
    let mut flags = remove.iter();
    pool.retain(|_| !flags.next().copied().unwrap_or(false));
}
