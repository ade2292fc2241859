use plane_battle::config::Rules;
use plane_battle::entities::*;
use plane_battle::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn running_world() -> World {
    let mut w = World::new(Rules::default());
    w.status = GameStatus::Running;
    w
}

// ── difficulty_for ────────────────────────────────────────────────────────────

#[test]
fn difficulty_steps_every_hundred_points() {
    assert_eq!(difficulty_for(0), 1.0);
    assert_eq!(difficulty_for(99), 1.0);
    assert!((difficulty_for(100) - 1.2).abs() < 1e-6);
    assert!((difficulty_for(250) - 1.4).abs() < 1e-6);
}

// ── spawn_interval ────────────────────────────────────────────────────────────

#[test]
fn interval_shrinks_with_score() {
    let rules = Rules::default();
    assert_eq!(spawn_interval(&rules, 0), 1000.0);
    assert_eq!(spawn_interval(&rules, 5000), 500.0);
}

#[test]
fn interval_bottoms_out_at_the_floor() {
    let rules = Rules::default();
    assert_eq!(spawn_interval(&rules, 7000), SPAWN_FLOOR_MS);
    assert_eq!(spawn_interval(&rules, 100_000), SPAWN_FLOOR_MS);
}

#[test]
fn interval_floor_ignores_lower_configured_minimum() {
    let rules = Rules {
        spawn_min_interval_ms: 50.0,
        ..Rules::default()
    };
    assert_eq!(spawn_interval(&rules, 100_000), SPAWN_FLOOR_MS);
}

// ── spawn_enemy ───────────────────────────────────────────────────────────────

#[test]
fn planes_spawn_above_the_field_fully_inside_horizontally() {
    let rules = Rules {
        plane_ratio: 1.0,
        ..Rules::default()
    };
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let e = spawn_enemy(&rules, 1.0, &mut rng);
        assert_eq!(e.kind, EnemyKind::Plane);
        assert_eq!(e.y, -20.0);
        assert!(e.x >= 20.0 && e.x <= 780.0, "x = {}", e.x);
        assert!(e.speed >= 1.5 && e.speed < 3.5, "speed = {}", e.speed);
        assert_eq!(e.health, 1);
    }
}

#[test]
fn asteroids_speed_up_with_difficulty() {
    let rules = Rules {
        plane_ratio: 0.0,
        ..Rules::default()
    };
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let e = spawn_enemy(&rules, 3.0, &mut rng);
        assert_eq!(e.kind, EnemyKind::Asteroid);
        assert_eq!(e.y, -25.0);
        assert!(e.x >= 25.0 && e.x <= 775.0);
        assert!(e.speed >= 2.5 && e.speed < 4.5, "speed = {}", e.speed);
        assert_eq!(e.health, 2);
    }
}

#[test]
fn kinds_split_evenly_by_default() {
    let mut rng = seeded_rng();
    let planes = (0..10_000)
        .filter(|_| roll_kind(&mut rng, 0.5) == EnemyKind::Plane)
        .count();
    assert!((4_500..5_500).contains(&planes), "planes = {planes}");
}

// ── update ────────────────────────────────────────────────────────────────────

#[test]
fn spawns_when_the_timer_reaches_the_interval() {
    let mut w = running_world();
    let mut rng = seeded_rng();

    assert!(!update(&mut w, 999.0, &mut rng));
    assert!(w.enemies.is_empty());

    assert!(update(&mut w, 1.0, &mut rng));
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.spawn_timer_ms, 0.0);
}

#[test]
fn one_spawn_per_step_even_on_long_frames() {
    let mut w = running_world();
    update(&mut w, 10_000.0, &mut seeded_rng());
    assert_eq!(w.enemies.len(), 1);
}

#[test]
fn higher_score_spawns_sooner() {
    let mut w = running_world();
    w.score = 5000;
    assert!(update(&mut w, 500.0, &mut seeded_rng()));
}
