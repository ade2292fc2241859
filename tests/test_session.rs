use plane_battle::config::Rules;
use plane_battle::entities::*;
use plane_battle::session::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle_world() -> World {
    World::new(Rules::default())
}

/// A run that has been going for a while, then ended.
fn finished_world() -> World {
    let mut w = idle_world();
    w.status = GameStatus::GameOver;
    w.score = 340;
    w.kills = 27;
    w.difficulty = 1.6;
    w.frame = 9000;
    w.player.health = 0;
    w.player.weapon_level = 4;
    w.enemies.push(Enemy::new(EnemyKind::Asteroid, 50.0, 50.0, 2.0));
    w.bullets.push(Bullet::new(10.0, 10.0, 8.0, 0.0, BulletOwner::Player));
    w
}

// ── Idle ──────────────────────────────────────────────────────────────────────

#[test]
fn new_world_is_idle_and_empty() {
    let w = idle_world();
    assert_eq!(w.status, GameStatus::Idle);
    assert!(w.enemies.is_empty() && w.bullets.is_empty() && w.stars.is_empty());
    assert_eq!((w.player.x, w.player.y), (400.0, 520.0));
}

#[test]
fn pause_and_resume_do_nothing_while_idle() {
    let w = idle_world();
    assert_eq!(pause(&w).status, GameStatus::Idle);
    assert_eq!(resume(&w).status, GameStatus::Idle);
}

#[test]
fn start_from_idle_runs_a_fresh_session() {
    let w = start(&idle_world(), &mut seeded_rng());
    assert_eq!(w.status, GameStatus::Running);
    assert_eq!(w.stars.len(), 100);
    assert_eq!(w.player.health, MAX_HEALTH);
    assert_eq!(w.player.weapon_level, MIN_WEAPON_LEVEL);
    assert_eq!(w.score, 0);
    assert_eq!(w.difficulty, 1.0);
    assert!(w
        .stars
        .iter()
        .all(|s| s.x >= 0.0 && s.x < 800.0 && s.y >= 0.0 && s.y < 600.0));
}

// ── Running ⇄ Paused ──────────────────────────────────────────────────────────

#[test]
fn pause_then_resume() {
    let running = start(&idle_world(), &mut seeded_rng());
    let paused = pause(&running);
    assert_eq!(paused.status, GameStatus::Paused);
    assert_eq!(paused.player, running.player);
    assert_eq!(resume(&paused).status, GameStatus::Running);
}

#[test]
fn pausing_twice_is_harmless() {
    let running = start(&idle_world(), &mut seeded_rng());
    let twice = pause(&pause(&running));
    assert_eq!(twice.status, GameStatus::Paused);
}

#[test]
fn resume_while_running_is_a_no_op() {
    let running = start(&idle_world(), &mut seeded_rng());
    assert_eq!(resume(&running).status, GameStatus::Running);
}

#[test]
fn start_while_running_keeps_the_session() {
    let mut running = start(&idle_world(), &mut seeded_rng());
    running.score = 120;
    let again = start(&running, &mut seeded_rng());
    assert_eq!(again.status, GameStatus::Running);
    assert_eq!(again.score, 120);

    let paused = pause(&running);
    assert_eq!(restart(&paused, &mut seeded_rng()).status, GameStatus::Paused);
}

// ── GameOver ──────────────────────────────────────────────────────────────────

#[test]
fn game_over_ignores_pause_and_resume() {
    let w = finished_world();
    assert_eq!(pause(&w).status, GameStatus::GameOver);
    assert_eq!(resume(&w).status, GameStatus::GameOver);
}

#[test]
fn restart_resets_everything() {
    let w = restart(&finished_world(), &mut seeded_rng());
    assert_eq!(w.status, GameStatus::Running);
    assert_eq!(w.score, 0);
    assert_eq!(w.kills, 0);
    assert_eq!(w.frame, 0);
    assert_eq!(w.difficulty, 1.0);
    assert_eq!(w.player.health, MAX_HEALTH);
    assert_eq!(w.player.weapon_level, 1);
    assert!(w.enemies.is_empty());
    assert!(w.bullets.is_empty());
}

#[test]
fn start_after_game_over_also_resets() {
    let w = start(&finished_world(), &mut seeded_rng());
    assert_eq!(w.status, GameStatus::Running);
    assert_eq!(w.score, 0);
}

#[test]
fn restart_keeps_the_rules() {
    let rules = Rules {
        playfield_width: 400.0,
        star_count: 10,
        ..Rules::default()
    };
    let mut w = World::new(rules);
    w.status = GameStatus::GameOver;
    let w = restart(&w, &mut seeded_rng());
    assert_eq!(w.rules, rules);
    assert_eq!(w.stars.len(), 10);
    assert_eq!(w.player.x, 200.0);
}

// ── apply ─────────────────────────────────────────────────────────────────────

#[test]
fn commands_dispatch_to_transitions() {
    let mut rng = seeded_rng();
    let w = apply(&idle_world(), Command::Start, &mut rng);
    assert_eq!(w.status, GameStatus::Running);
    let w = apply(&w, Command::Pause, &mut rng);
    assert_eq!(w.status, GameStatus::Paused);
    let w = apply(&w, Command::Resume, &mut rng);
    assert_eq!(w.status, GameStatus::Running);
    let w = apply(&finished_world(), Command::Restart, &mut rng);
    assert_eq!(w.status, GameStatus::Running);
}
