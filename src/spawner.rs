//! Enemy spawning and the score-driven difficulty ramp.

use rand::Rng;

use crate::config::Rules;
use crate::entities::{Enemy, EnemyKind, World};

/// The spawn interval never drops below this, whatever the score.
pub const SPAWN_FLOOR_MS: f32 = 300.0;

const DIFFICULTY_STEP: f32 = 0.2;
const DIFFICULTY_SCORE_STEP: u32 = 100;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// `1.0` at the start, `+0.2` for every full hundred points.
pub fn difficulty_for(score: u32) -> f32 {
    1.0 + DIFFICULTY_STEP * (score / DIFFICULTY_SCORE_STEP) as f32
}

pub fn spawn_interval(rules: &Rules, score: u32) -> f32 {
    let floor = rules.spawn_min_interval_ms.max(SPAWN_FLOOR_MS);
    (rules.spawn_base_interval_ms - rules.spawn_score_factor * score as f32).max(floor)
}

// ── Spawning ─────────────────────────────────────────────────────────────────

pub fn roll_kind(rng: &mut impl Rng, plane_ratio: f64) -> EnemyKind {
    if rng.gen_bool(plane_ratio.clamp(0.0, 1.0)) {
        EnemyKind::Plane
    } else {
        EnemyKind::Asteroid
    }
}

/// A new enemy just above the top edge at a random column.
pub fn spawn_enemy(rules: &Rules, difficulty: f32, rng: &mut impl Rng) -> Enemy {
    let kind = roll_kind(rng, rules.plane_ratio);
    let profile = kind.profile();

    let half = profile.width / 2.0;
    let x = if rules.playfield_width > profile.width {
        rng.gen_range(half..rules.playfield_width - half)
    } else {
        rules.playfield_width / 2.0
    };
    let base = if rules.enemy_speed_min < rules.enemy_speed_max {
        rng.gen_range(rules.enemy_speed_min..rules.enemy_speed_max)
    } else {
        rules.enemy_speed_min
    };
    let speed = base + difficulty * rules.enemy_speed_difficulty_scale;

    Enemy::new(kind, x, -profile.height / 2.0, speed)
}

/// Advance the spawn clock; at most one enemy per step.
pub fn update(world: &mut World, dt_ms: f32, rng: &mut impl Rng) -> bool {
    world.spawn_timer_ms += dt_ms;
    let interval = spawn_interval(&world.rules, world.score);
    if world.spawn_timer_ms < interval {
        return false;
    }
    world.spawn_timer_ms = 0.0;

    let enemy = spawn_enemy(&world.rules, world.difficulty, rng);
    log::trace!("spawned {:?} at x={:.0} speed={:.2}", enemy.kind, enemy.x, enemy.speed);
    world.enemies.push(enemy);
    true
}
