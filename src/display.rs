//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world.  No game logic is performed; this module only translates world
//! coordinates into terminal cells and terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use plane_battle::entities::{
    Bullet, BulletOwner, Enemy, EnemyKind, GameStatus, Particle, ParticleSource, PowerUp,
    PowerUpKind, World, MAX_HEALTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_WEAPON: Color = Color::Cyan;
const C_PLAYER: Color = Color::Cyan;
const C_PLAYER_HIT: Color = Color::Red;
const C_PLAYER_HEAL: Color = Color::Green;
const C_PLAYER_ARMED: Color = Color::DarkYellow;
const C_ENEMY_PLANE: Color = Color::Red;
const C_ENEMY_ASTEROID: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_POWERUP_HEALTH: Color = Color::Green;
const C_POWERUP_WEAPON: Color = Color::DarkYellow;
const C_STAR: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps playfield coordinates onto the cells inside the border
/// (columns `1..cols-1`, rows `2..rows-2`).
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn new(world: &World, cols: u16, rows: u16) -> Self {
        Viewport {
            cols,
            rows,
            world_w: world.width(),
            world_h: world.height(),
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// `None` when the point falls outside the drawable area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let cx = (x / self.world_w * self.inner_cols()).floor();
        let cy = (y / self.world_h * self.inner_rows()).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.inner_cols() || cy >= self.inner_rows() {
            return None;
        }
        Some((cx as u16 + 1, cy as u16 + 2))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(world, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cols, rows)?;
    draw_hud(out, world, cols)?;

    for star in &world.stars {
        put(out, &view, star.x, star.y, if star.size > 1.0 { "·" } else { "." }, C_STAR)?;
    }
    for particle in &world.particles {
        draw_particle(out, &view, particle)?;
    }
    for power_up in &world.power_ups {
        draw_power_up(out, &view, power_up)?;
    }
    for enemy in &world.enemies {
        draw_enemy(out, &view, enemy)?;
    }
    for bullet in world.bullets.iter().chain(world.enemy_bullets.iter()) {
        draw_bullet(out, &view, bullet)?;
    }

    if world.status != GameStatus::Idle {
        draw_player(out, &view, world)?;
    }
    draw_controls_hint(out, world, rows)?;

    match world.status {
        GameStatus::Idle => draw_banner(
            out,
            cols,
            rows,
            &[("SPACE  PLANE  BATTLE", Color::Cyan)],
            "ENTER - Start  Q - Quit",
        )?,
        GameStatus::Paused => draw_banner(
            out,
            cols,
            rows,
            &[("PAUSED", Color::Yellow)],
            "P - Resume  Q - Quit",
        )?,
        GameStatus::GameOver => draw_game_over(out, world, cols, rows)?,
        GameStatus::Running => {}
    }

    // cursor out of the way, then flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f32,
    y: f32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // top bar on row 1, bottom bar two rows from the end
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, cols: u16) -> std::io::Result<()> {
    // left: score, difficulty
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Lv x{:.1}",
        world.score, world.difficulty
    )))?;

    // centre: weapon
    let player = &world.player;
    let weapon = if player.weapon_level > 1 {
        format!(
            "[ WEAPON {} · {}s ]",
            player.weapon_level,
            (player.weapon_level_expiry_ms / 1000.0).ceil() as u32
        )
    } else {
        "[ WEAPON 1 ]".to_string()
    };
    let wx = (cols / 2).saturating_sub(weapon.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WEAPON))?;
    out.queue(Print(&weapon))?;

    // right: health bar
    const BAR: u32 = 10;
    let filled = (player.health * BAR).div_ceil(MAX_HEALTH);
    let health = format!(
        "HP {:>3} {}{}",
        player.health,
        "█".repeat(filled as usize),
        "░".repeat((BAR - filled) as usize)
    );
    let hx = cols.saturating_sub(health.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(hx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, world: &World) -> std::io::Result<()> {
    let p = &world.player;
    // Pickup tint wins over the hit flash; the flash blinks every 100 ms.
    let color = match p.pickup_flash {
        Some((PowerUpKind::Health, _)) => C_PLAYER_HEAL,
        Some((PowerUpKind::Weapon, _)) => C_PLAYER_ARMED,
        None if p.hit_flash_ms > 0.0 && (p.hit_flash_ms / 100.0) as u32 % 2 == 0 => C_PLAYER_HIT,
        None => C_PLAYER,
    };

    //   ▲       ← nose
    //  /█\      ← fuselage + wings
    put(out, view, p.x, p.y - p.height / 4.0, "▲", color)?;
    if let Some((col, row)) = view.cell(p.x, p.y + p.height / 4.0) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(enemy.x, enemy.y) else {
        return Ok(());
    };
    let (sprite, color) = match enemy.kind {
        EnemyKind::Plane => ("«▼»", C_ENEMY_PLANE),
        // A cracked asteroid has taken one hit already.
        EnemyKind::Asteroid if enemy.health < enemy.kind.profile().health => {
            ("(%)", C_ENEMY_ASTEROID)
        }
        EnemyKind::Asteroid => ("(@)", C_ENEMY_ASTEROID),
    };
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, view: &Viewport, bullet: &Bullet) -> std::io::Result<()> {
    match bullet.owner {
        BulletOwner::Player => {
            let glyph = if bullet.angle < -0.05 {
                "\\"
            } else if bullet.angle > 0.05 {
                "/"
            } else {
                "║"
            };
            put(out, view, bullet.x, bullet.y, glyph, C_BULLET_PLAYER)
        }
        BulletOwner::Enemy => put(out, view, bullet.x, bullet.y, "↓", C_BULLET_ENEMY),
    }
}

/// Draw a falling power-up, pulsing between two glyphs.
///
///   ✚ / +  (green)   health
///   ★ / ☆  (orange)  weapon upgrade
fn draw_power_up<W: Write>(out: &mut W, view: &Viewport, power_up: &PowerUp) -> std::io::Result<()> {
    let bright = power_up.phase.sin() >= 0.0;
    let (glyph, color) = match (power_up.kind, bright) {
        (PowerUpKind::Health, true) => ("✚", C_POWERUP_HEALTH),
        (PowerUpKind::Health, false) => ("+", C_POWERUP_HEALTH),
        (PowerUpKind::Weapon, true) => ("★", C_POWERUP_WEAPON),
        (PowerUpKind::Weapon, false) => ("☆", C_POWERUP_WEAPON),
    };
    put(out, view, power_up.x, power_up.y, glyph, color)
}

fn draw_particle<W: Write>(out: &mut W, view: &Viewport, particle: &Particle) -> std::io::Result<()> {
    let color = match particle.source {
        ParticleSource::Explosion(EnemyKind::Plane) => Color::DarkYellow,
        ParticleSource::Explosion(EnemyKind::Asteroid) => Color::Grey,
        ParticleSource::Pickup(PowerUpKind::Health) => Color::Green,
        ParticleSource::Pickup(PowerUpKind::Weapon) => Color::Yellow,
    };
    let glyph = if particle.life > 0.5 { "*" } else { "·" };
    put(out, view, particle.x, particle.y, glyph, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, world: &World, rows: u16) -> std::io::Result<()> {
    let hint = match world.status {
        GameStatus::Running => "W A S D / ←↑↓→ : Move   P : Pause   Q : Quit",
        GameStatus::Paused => "P : Resume   Q : Quit",
        GameStatus::Idle | GameStatus::GameOver => "ENTER : Start   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    lines: &[(&str, Color)],
    hint: &str,
) -> std::io::Result<()> {
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub((lines.len() as u16 + 1) / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16 + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    world: &World,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", world.score);
    let kills_line = format!("Enemies Down: {:>5}", world.kills);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (kills_line.as_str(), Color::DarkGrey),
    ];
    draw_banner(out, cols, rows, lines, "ENTER - Play Again  Q - Quit")
}
