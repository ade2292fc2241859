use plane_battle::collision::*;
use plane_battle::config::Rules;
use plane_battle::entities::*;
use plane_battle::events::SoundCue;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn running_world() -> World {
    let mut w = World::new(Rules::default());
    w.status = GameStatus::Running;
    w
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn player_bullet(x: f32, y: f32) -> Bullet {
    Bullet::new(x, y, 8.0, 0.0, BulletOwner::Player)
}

fn enemy_bullet(x: f32, y: f32) -> Bullet {
    Bullet::new(x, y, 4.0, 0.0, BulletOwner::Enemy)
}

fn count(cues: &[SoundCue], cue: SoundCue) -> usize {
    cues.iter().filter(|&&c| c == cue).count()
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn overlap_requires_interpenetration() {
    let a = Enemy::new(EnemyKind::Asteroid, 100.0, 100.0, 0.0); // 50x50
    let touching = Enemy::new(EnemyKind::Asteroid, 150.0, 100.0, 0.0);
    let inside = Enemy::new(EnemyKind::Asteroid, 149.0, 100.0, 0.0);
    assert!(!overlaps(&a, &touching));
    assert!(overlaps(&a, &inside));
}

// ── Pass 1: player bullets ↔ enemies ──────────────────────────────────────────

#[test]
fn asteroid_survives_first_hit() {
    let mut w = running_world();
    w.enemies.push(Enemy::new(EnemyKind::Asteroid, 100.0, 100.0, 2.0));
    w.bullets.push(player_bullet(100.0, 100.0));
    let mut cues = Vec::new();

    bullets_vs_enemies(&mut w, &mut seeded_rng(), &mut cues);

    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.enemies[0].health, 1);
    assert!(w.bullets.is_empty());
    assert_eq!(w.score, 0);
    assert!(cues.is_empty());
}

#[test]
fn second_hit_destroys_asteroid() {
    let mut w = running_world();
    let mut rng = seeded_rng();
    w.enemies.push(Enemy::new(EnemyKind::Asteroid, 100.0, 100.0, 2.0));

    w.bullets.push(player_bullet(100.0, 100.0));
    bullets_vs_enemies(&mut w, &mut rng, &mut Vec::new());

    let mut cues = Vec::new();
    w.bullets.push(player_bullet(100.0, 100.0));
    bullets_vs_enemies(&mut w, &mut rng, &mut cues);

    assert!(w.enemies.is_empty());
    assert!(w.bullets.is_empty());
    assert_eq!(w.score, 15);
    assert_eq!(w.kills, 1);
    assert_eq!(count(&cues, SoundCue::Explosion), 1);
    assert!(!w.particles.is_empty());
}

#[test]
fn plane_dies_to_one_bullet_for_ten_points() {
    let mut w = running_world();
    w.enemies.push(Enemy::new(EnemyKind::Plane, 100.0, 100.0, 2.0));
    w.bullets.push(player_bullet(110.0, 115.0));
    bullets_vs_enemies(&mut w, &mut seeded_rng(), &mut Vec::new());
    assert!(w.enemies.is_empty());
    assert_eq!(w.score, 10);
}

#[test]
fn bullet_over_two_enemies_hits_only_the_first() {
    let mut w = running_world();
    w.enemies.push(Enemy::new(EnemyKind::Plane, 100.0, 100.0, 2.0));
    w.enemies.push(Enemy::new(EnemyKind::Plane, 110.0, 100.0, 2.0));
    w.bullets.push(player_bullet(105.0, 100.0));
    let mut cues = Vec::new();

    bullets_vs_enemies(&mut w, &mut seeded_rng(), &mut cues);

    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.enemies[0].x, 110.0);
    assert_eq!(w.score, 10);
    assert_eq!(count(&cues, SoundCue::Explosion), 1);
}

#[test]
fn second_bullet_skips_enemy_destroyed_this_pass() {
    let mut w = running_world();
    w.enemies.push(Enemy::new(EnemyKind::Plane, 100.0, 100.0, 2.0));
    w.enemies.push(Enemy::new(EnemyKind::Plane, 110.0, 100.0, 2.0));
    w.bullets.push(player_bullet(105.0, 100.0));
    w.bullets.push(player_bullet(105.0, 100.0));

    bullets_vs_enemies(&mut w, &mut seeded_rng(), &mut Vec::new());

    assert!(w.enemies.is_empty());
    assert!(w.bullets.is_empty());
    assert_eq!(w.score, 20);
}

#[test]
fn missing_bullet_is_untouched() {
    let mut w = running_world();
    w.enemies.push(Enemy::new(EnemyKind::Plane, 100.0, 100.0, 2.0));
    w.bullets.push(player_bullet(300.0, 100.0));
    bullets_vs_enemies(&mut w, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.bullets.len(), 1);
}

// ── Drops ─────────────────────────────────────────────────────────────────────

#[test]
fn roughly_thirty_percent_of_kills_drop() {
    let mut rng = seeded_rng();
    let plane = Enemy::new(EnemyKind::Plane, 100.0, 100.0, 2.0);
    let drops = (0..10_000)
        .filter(|_| roll_drop(&plane, &mut rng).is_some())
        .count();
    assert!((2_700..3_300).contains(&drops), "drops = {drops}");
}

#[test]
fn drop_lands_where_the_enemy_died() {
    let mut rng = seeded_rng();
    let asteroid = Enemy::new(EnemyKind::Asteroid, 123.0, 45.0, 2.0);
    let drop = (0..100)
        .find_map(|_| roll_drop(&asteroid, &mut rng))
        .expect("a drop within 100 rolls");
    assert_eq!((drop.x, drop.y), (123.0, 45.0));
}

#[test]
fn planes_favour_weapons_asteroids_favour_health() {
    let mut rng = seeded_rng();
    let weapons = |kind: EnemyKind, rng: &mut StdRng| {
        (0..10_000)
            .filter(|_| drop_kind(kind, rng) == PowerUpKind::Weapon)
            .count()
    };
    let plane = weapons(EnemyKind::Plane, &mut rng);
    let asteroid = weapons(EnemyKind::Asteroid, &mut rng);
    assert!((7_500..8_500).contains(&plane), "plane weapons = {plane}");
    assert!((2_500..3_500).contains(&asteroid), "asteroid weapons = {asteroid}");
}

// ── Pass 2: enemy bullets ↔ player ────────────────────────────────────────────

#[test]
fn enemy_bullet_deals_five_and_grants_invulnerability() {
    let mut w = running_world();
    let (px, py) = (w.player.x, w.player.y);
    w.enemy_bullets.push(enemy_bullet(px, py));
    let mut cues = Vec::new();

    enemy_bullets_vs_player(&mut w, &mut cues);

    assert_eq!(w.player.health, 95);
    assert!(w.player.invulnerable);
    assert_eq!(w.player.invulnerable_ms, INVULNERABLE_MS);
    assert_eq!(w.player.hit_flash_ms, HIT_FLASH_MS);
    assert!(w.enemy_bullets.is_empty());
    assert_eq!(cues, vec![SoundCue::Hit]);
}

#[test]
fn invulnerable_player_ignores_enemy_bullets() {
    let mut w = running_world();
    w.player.invulnerable = true;
    w.player.invulnerable_ms = 300.0;
    let (px, py) = (w.player.x, w.player.y);
    w.enemy_bullets.push(enemy_bullet(px, py));

    enemy_bullets_vs_player(&mut w, &mut Vec::new());

    assert_eq!(w.player.health, MAX_HEALTH);
    assert_eq!(w.enemy_bullets.len(), 1);
}

#[test]
fn only_one_enemy_bullet_lands_per_window() {
    let mut w = running_world();
    let (px, py) = (w.player.x, w.player.y);
    w.enemy_bullets.push(enemy_bullet(px - 5.0, py));
    w.enemy_bullets.push(enemy_bullet(px + 5.0, py));

    enemy_bullets_vs_player(&mut w, &mut Vec::new());

    assert_eq!(w.player.health, 95);
    assert_eq!(w.enemy_bullets.len(), 1);
    assert_eq!(w.enemy_bullets[0].x, px + 5.0);
}

// ── Pass 3: enemies ↔ player ──────────────────────────────────────────────────

#[test]
fn ramming_plane_deals_fifteen_and_explodes() {
    let mut w = running_world();
    let (px, py) = (w.player.x, w.player.y);
    w.enemies.push(Enemy::new(EnemyKind::Plane, px, py - 30.0, 3.0));
    let mut cues = Vec::new();

    enemies_vs_player(&mut w, &mut seeded_rng(), &mut cues);

    assert_eq!(w.player.health, 85);
    assert!(w.enemies.is_empty());
    assert_eq!(count(&cues, SoundCue::Hit), 1);
    assert_eq!(count(&cues, SoundCue::Explosion), 1);
    assert_eq!(w.score, 0); // ramming earns nothing
}

#[test]
fn ramming_asteroid_deals_ten() {
    let mut w = running_world();
    let (px, py) = (w.player.x, w.player.y);
    w.enemies.push(Enemy::new(EnemyKind::Asteroid, px, py, 2.0));
    enemies_vs_player(&mut w, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(w.player.health, 90);
}

#[test]
fn invulnerable_player_passes_through_enemies() {
    let mut w = running_world();
    w.player.invulnerable = true;
    let (px, py) = (w.player.x, w.player.y);
    w.enemies.push(Enemy::new(EnemyKind::Plane, px, py, 3.0));
    enemies_vs_player(&mut w, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(w.player.health, MAX_HEALTH);
    assert_eq!(w.enemies.len(), 1);
}

#[test]
fn fatal_ram_clamps_health_and_ends_the_run() {
    let mut w = running_world();
    w.player.health = 10;
    let (px, py) = (w.player.x, w.player.y);
    w.enemies.push(Enemy::new(EnemyKind::Plane, px, py, 3.0));

    enemies_vs_player(&mut w, &mut seeded_rng(), &mut Vec::new());

    assert_eq!(w.player.health, 0);
    assert_eq!(w.status, GameStatus::GameOver);
}

#[test]
fn damage_after_game_over_stays_at_zero() {
    let mut w = running_world();
    w.player.health = 3;
    let mut cues = Vec::new();
    apply_damage(&mut w.player, &mut w.status, 5, &mut cues);
    assert_eq!(w.status, GameStatus::GameOver);

    apply_damage(&mut w.player, &mut w.status, 15, &mut cues);
    assert_eq!(w.player.health, 0);
    assert_eq!(w.status, GameStatus::GameOver);
}

// ── Pass 4: power-ups ↔ player ────────────────────────────────────────────────

#[test]
fn health_pickup_caps_at_one_hundred() {
    let mut w = running_world();
    w.player.health = 90;
    let (px, py) = (w.player.x, w.player.y);
    w.power_ups.push(PowerUp::new(PowerUpKind::Health, px, py));
    let mut cues = Vec::new();

    power_ups_vs_player(&mut w, &mut seeded_rng(), &mut cues);

    assert_eq!(w.player.health, 100);
    assert!(w.power_ups.is_empty());
    assert_eq!(cues, vec![SoundCue::PowerUp]);
    assert_eq!(w.player.pickup_flash, Some((PowerUpKind::Health, PICKUP_FLASH_MS)));
}

#[test]
fn health_pickup_restores_twenty_five() {
    let mut w = running_world();
    w.player.health = 40;
    collect(&mut w, PowerUpKind::Health);
    assert_eq!(w.player.health, 65);
}

#[test]
fn weapon_pickup_at_level_four_reaches_five() {
    let mut w = running_world();
    w.player.weapon_level = 4;
    w.player.weapon_level_expiry_ms = 120.0;
    collect(&mut w, PowerUpKind::Weapon);
    assert_eq!(w.player.weapon_level, 5);
    assert_eq!(w.player.weapon_level_expiry_ms, 5000.0);
}

#[test]
fn weapon_pickup_at_max_level_only_refreshes_timer() {
    let mut w = running_world();
    w.player.weapon_level = 5;
    w.player.weapon_level_expiry_ms = 1234.0;
    collect(&mut w, PowerUpKind::Weapon);
    assert_eq!(w.player.weapon_level, 5);
    assert_eq!(w.player.weapon_level_expiry_ms, 5000.0);
}

#[test]
fn pickups_ignore_invulnerability() {
    let mut w = running_world();
    w.player.invulnerable = true;
    let (px, py) = (w.player.x, w.player.y);
    w.power_ups.push(PowerUp::new(PowerUpKind::Weapon, px + 20.0, py));
    power_ups_vs_player(&mut w, &mut seeded_rng(), &mut Vec::new());
    assert_eq!(w.player.weapon_level, 2);
    assert!(w.power_ups.is_empty());
}

// ── Pass ordering ─────────────────────────────────────────────────────────────

#[test]
fn no_healing_after_death_in_the_same_frame() {
    let mut w = running_world();
    w.player.health = 5;
    let (px, py) = (w.player.x, w.player.y);
    w.enemy_bullets.push(enemy_bullet(px, py));
    w.power_ups.push(PowerUp::new(PowerUpKind::Health, px, py));

    resolve(&mut w, &mut seeded_rng(), &mut Vec::new());

    assert_eq!(w.player.health, 0);
    assert_eq!(w.status, GameStatus::GameOver);
    assert_eq!(w.power_ups.len(), 1);
}

#[test]
fn bullet_damage_then_ram_is_blocked_by_invulnerability() {
    let mut w = running_world();
    let (px, py) = (w.player.x, w.player.y);
    w.enemy_bullets.push(enemy_bullet(px, py));
    w.enemies.push(Enemy::new(EnemyKind::Plane, px, py, 3.0));

    resolve(&mut w, &mut seeded_rng(), &mut Vec::new());

    assert_eq!(w.player.health, 95);
    assert_eq!(w.enemies.len(), 1);
}
