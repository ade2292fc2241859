//! Weapon levels, fire patterns and auto-fire cadence, for the player and
//! for enemies that shoot back.

use crate::entities::{
    Bullet, BulletOwner, Enemy, Player, World, MAX_WEAPON_LEVEL, MIN_WEAPON_LEVEL,
};
use crate::events::SoundCue;

pub const FIRE_INTERVAL_MS: f32 = 200.0;
pub const BULLET_SPEED: f32 = 8.0;
pub const LEVEL_DURATION_MS: f32 = 5000.0;

pub const ENEMY_BULLET_SPEED: f32 = 4.0;

// ── Fire-pattern table ───────────────────────────────────────────────────────

/// `(x offset, angle)` per bullet. Angles in radians, negative to the left.
const PATTERNS: [&[(f32, f32)]; 5] = [
    &[(0.0, 0.0)],
    &[(-10.0, 0.0), (10.0, 0.0)],
    &[(0.0, 0.0), (0.0, -0.2), (0.0, 0.2)],
    &[(-15.0, 0.0), (-5.0, 0.0), (5.0, 0.0), (15.0, 0.0)],
    &[(0.0, 0.0), (0.0, -0.15), (0.0, -0.3), (0.0, 0.15), (0.0, 0.3)],
];

/// Bullets fired per discharge at `level`. Out-of-range levels are clamped.
pub fn fire_pattern(level: u8) -> &'static [(f32, f32)] {
    let level = level.clamp(MIN_WEAPON_LEVEL, MAX_WEAPON_LEVEL);
    PATTERNS[(level - 1) as usize]
}

// ── Levelling ────────────────────────────────────────────────────────────────

/// Weapon pickup: one level up (capped) and a full timer either way.
pub fn level_up(player: &mut Player) {
    player.weapon_level = player
        .weapon_level
        .saturating_add(1)
        .clamp(MIN_WEAPON_LEVEL, MAX_WEAPON_LEVEL);
    player.weapon_level_expiry_ms = LEVEL_DURATION_MS;
}

/// Count the level timer down; at zero the weapon drops back to level 1.
pub fn decay(player: &mut Player, dt_ms: f32) {
    if player.weapon_level <= MIN_WEAPON_LEVEL {
        player.weapon_level = MIN_WEAPON_LEVEL;
        return;
    }
    player.weapon_level_expiry_ms -= dt_ms;
    if player.weapon_level_expiry_ms <= 0.0 {
        log::debug!("weapon level {} expired", player.weapon_level);
        player.weapon_level = MIN_WEAPON_LEVEL;
        player.weapon_level_expiry_ms = 0.0;
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Bullets for one discharge from the player's nose.
pub fn discharge(player: &Player) -> Vec<Bullet> {
    let nose_y = player.y - player.height / 2.0;
    fire_pattern(player.weapon_level)
        .iter()
        .map(|&(offset, angle)| {
            Bullet::new(player.x + offset, nose_y, BULLET_SPEED, angle, BulletOwner::Player)
        })
        .collect()
}

/// Advance the auto-fire accumulator; discharge at most once per step.
/// Returns whether a discharge happened.
pub fn player_fire(world: &mut World, dt_ms: f32, cues: &mut Vec<SoundCue>) -> bool {
    let player = &mut world.player;
    player.fire_timer_ms += dt_ms;
    if player.fire_timer_ms < FIRE_INTERVAL_MS {
        return false;
    }
    player.fire_timer_ms %= FIRE_INTERVAL_MS;

    let volley = discharge(&world.player);
    world.bullets.extend(volley);
    cues.push(SoundCue::Shoot);
    true
}

/// Let every shooting enemy advance its own timer and fire straight down.
pub fn enemy_fire(world: &mut World, dt_ms: f32) {
    let mut fired = Vec::new();
    for enemy in world.enemies.iter_mut() {
        if let Some(bullet) = enemy_shot(enemy, dt_ms) {
            fired.push(bullet);
        }
    }
    world.enemy_bullets.extend(fired);
}

fn enemy_shot(enemy: &mut Enemy, dt_ms: f32) -> Option<Bullet> {
    let interval = enemy.kind.profile().shoot_interval_ms?;
    enemy.shoot_timer_ms += dt_ms;
    if enemy.shoot_timer_ms < interval {
        return None;
    }
    enemy.shoot_timer_ms = 0.0;
    Some(Bullet::new(
        enemy.x,
        enemy.y + enemy.height / 2.0,
        ENEMY_BULLET_SPEED,
        0.0,
        BulletOwner::Enemy,
    ))
}
