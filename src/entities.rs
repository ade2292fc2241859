//! Game entity types. Pure data, no logic beyond per-kind lookups.
//!
//! Every entity is anchored at its center: `(x, y)` is the middle of a
//! `width` × `height` box. Speeds are in playfield units per 60 Hz
//! reference frame; timers are in milliseconds.

use crate::config::Rules;

pub const MAX_HEALTH: u32 = 100;
pub const MIN_WEAPON_LEVEL: u8 = 1;
pub const MAX_WEAPON_LEVEL: u8 = 5;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
/// Distance of the player's spawn point above the bottom edge.
pub const PLAYER_BOTTOM_MARGIN: f32 = 80.0;

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 10.0;

pub const POWER_UP_SIZE: f32 = 30.0;
pub const POWER_UP_SPEED: f32 = 2.0;

// ── Enums ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Plane,
    Asteroid,
}

/// Per-kind parameters, looked up instead of branching on the kind
/// throughout the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    /// Points awarded when the enemy is destroyed by the player.
    pub score: u32,
    /// Damage dealt when the enemy rams the player.
    pub contact_damage: u32,
    /// `Some(ms)` for enemies that return fire.
    pub shoot_interval_ms: Option<f32>,
    /// Chance that a dropped power-up is a weapon upgrade (else health).
    pub weapon_drop_bias: f64,
}

const PLANE: EnemyProfile = EnemyProfile {
    width: 40.0,
    height: 40.0,
    health: 1,
    score: 10,
    contact_damage: 15,
    shoot_interval_ms: Some(2000.0),
    weapon_drop_bias: 0.8,
};

const ASTEROID: EnemyProfile = EnemyProfile {
    width: 50.0,
    height: 50.0,
    health: 2,
    score: 15,
    contact_damage: 10,
    shoot_interval_ms: None,
    weapon_drop_bias: 0.3,
};

impl EnemyKind {
    pub fn profile(self) -> &'static EnemyProfile {
        match self {
            EnemyKind::Plane => &PLANE,
            EnemyKind::Asteroid => &ASTEROID,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores 25 health, capped at `MAX_HEALTH`.
    Health,
    /// Raises the weapon level by one and refreshes its timer.
    Weapon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    GameOver,
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Anything with a center-anchored box that can collide or leave the field.
pub trait Body {
    fn center(&self) -> (f32, f32);
    fn size(&self) -> (f32, f32);

    /// `(left, top, right, bottom)`
    fn extents(&self) -> (f32, f32, f32, f32) {
        let (x, y) = self.center();
        let (w, h) = self.size();
        (x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0)
    }
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(impl Body for $ty {
            fn center(&self) -> (f32, f32) {
                (self.x, self.y)
            }
            fn size(&self) -> (f32, f32) {
                (self.width, self.height)
            }
        })*
    };
}

impl_body!(Player, Bullet, Enemy, PowerUp);

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
    pub weapon_level: u8,
    /// Time left before the weapon falls back to level 1. Only counts down
    /// while `weapon_level > 1`.
    pub weapon_level_expiry_ms: f32,
    /// Time accumulated towards the next auto-fire discharge.
    pub fire_timer_ms: f32,
    pub invulnerable: bool,
    pub invulnerable_ms: f32,
    /// Cosmetic red flash after taking damage.
    pub hit_flash_ms: f32,
    /// Cosmetic tint after a pickup, with the kind that was collected.
    pub pickup_flash: Option<(PowerUpKind, f32)>,
}

impl Player {
    /// A fresh player at the bottom-center of the playfield.
    pub fn spawn(rules: &Rules) -> Self {
        Player {
            x: rules.playfield_width / 2.0,
            y: rules.playfield_height - PLAYER_BOTTOM_MARGIN,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: rules.player_speed,
            health: MAX_HEALTH,
            weapon_level: MIN_WEAPON_LEVEL,
            weapon_level_expiry_ms: 0.0,
            fire_timer_ms: 0.0,
            invulnerable: false,
            invulnerable_ms: 0.0,
            hit_flash_ms: 0.0,
            pickup_flash: None,
        }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// A bullet travels along `angle` (radians from vertical, positive to the
/// right). Player bullets head up the screen, enemy bullets head down.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub angle: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(x: f32, y: f32, speed: f32, angle: f32, owner: BulletOwner) -> Self {
        Bullet {
            x,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed,
            angle,
            owner,
        }
    }

    /// Per-frame displacement `(dx, dy)`.
    pub fn velocity(&self) -> (f32, f32) {
        let dx = self.speed * self.angle.sin();
        let dy = self.speed * self.angle.cos();
        match self.owner {
            BulletOwner::Player => (dx, -dy),
            BulletOwner::Enemy => (dx, dy),
        }
    }
}

// ── Enemies & pickups ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: EnemyKind,
    pub health: i32,
    /// Only meaningful for kinds with a shoot interval.
    pub shoot_timer_ms: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, speed: f32) -> Self {
        let profile = kind.profile();
        Enemy {
            x,
            y,
            width: profile.width,
            height: profile.height,
            speed,
            kind,
            health: profile.health,
            shoot_timer_ms: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
    /// Pulse animation phase, cosmetic.
    pub phase: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        PowerUp {
            x,
            y,
            width: POWER_UP_SIZE,
            height: POWER_UP_SIZE,
            speed: POWER_UP_SPEED,
            kind,
            phase: 0.0,
        }
    }
}

// ── Cosmetics ────────────────────────────────────────────────────────────────

/// Explosion / pickup debris. Never collides.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Fades from 1.0 to 0.0.
    pub life: f32,
    pub source: ParticleSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleSource {
    Explosion(EnemyKind),
    Pickup(PowerUpKind),
}

/// Background star; wraps vertically.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The whole simulation. Cloneable so the per-frame step can hand back a
/// new world without touching the one it was given.
#[derive(Clone, Debug)]
pub struct World {
    pub rules: Rules,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub score: u32,
    /// Derived from score; see `spawner::difficulty_for`.
    pub difficulty: f32,
    pub status: GameStatus,
    pub spawn_timer_ms: f32,
    pub kills: u32,
    /// Running time only; paused time is never counted.
    pub elapsed_ms: f64,
    pub frame: u64,
}

impl World {
    /// An idle world: player in place, every pool empty.
    pub fn new(rules: Rules) -> Self {
        World {
            player: Player::spawn(&rules),
            rules,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            score: 0,
            difficulty: 1.0,
            status: GameStatus::Idle,
            spawn_timer_ms: 0.0,
            kills: 0,
            elapsed_ms: 0.0,
            frame: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.rules.playfield_width
    }

    pub fn height(&self) -> f32 {
        self.rules.playfield_height
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn is_outside(&self, body: &impl Body) -> bool {
        self.playfield().is_outside(body)
    }
}

/// The visible rectangle, `(0, 0)` at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// True once `body` lies wholly outside the rectangle.
    pub fn is_outside(&self, body: &impl Body) -> bool {
        let (left, top, right, bottom) = body.extents();
        right < 0.0 || bottom < 0.0 || left > self.width || top > self.height
    }
}
