mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use plane_battle::compute::tick;
use plane_battle::config::GameConfig;
use plane_battle::entities::{GameStatus, World};
use plane_battle::events::SoundCue;
use plane_battle::input::InputSnapshot;
use plane_battle::session::{self, Command};

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a movement key stays live after its last press or repeat. Most
/// terminals never report releases, and 8 frames (~130 ms) bridges the gap
/// between OS auto-repeat events.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Fold the live movement keys into this frame's input snapshot.
fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputSnapshot {
    let up = any_held(
        key_frame,
        &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        frame,
    );
    let down = any_held(
        key_frame,
        &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        frame,
    );
    let left = any_held(
        key_frame,
        &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        frame,
    );
    let right = any_held(
        key_frame,
        &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        frame,
    );
    InputSnapshot::from_keys(up, down, left, right)
}

// ── Session controls ──────────────────────────────────────────────────────────

enum Action {
    Quit,
    Session(Command),
}

/// One-shot keys. Movement keys are handled through `key_frame` instead.
fn action_for(code: &KeyCode, modifiers: KeyModifiers, status: GameStatus) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Session(match status {
            GameStatus::GameOver => Command::Restart,
            _ => Command::Start,
        })),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Session(match status {
            GameStatus::Paused => Command::Resume,
            _ => Command::Pause,
        })),
        _ => None,
    }
}

// ── Audio collaborator ────────────────────────────────────────────────────────

fn play_cues<W: Write>(out: &mut W, cues: &[SoundCue], bell: bool) -> std::io::Result<()> {
    for cue in cues {
        log::trace!("cue: {}", cue.tag());
    }
    let loud = cues
        .iter()
        .any(|cue| matches!(cue, SoundCue::Hit | SoundCue::Explosion));
    if bell && loud {
        out.queue(Print("\x07"))?;
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Movement keys are not acted on per event. `key_frame` remembers the frame
/// each key was last reported, and every frame the keys still inside
/// `HOLD_WINDOW` are folded into a single `InputSnapshot`, so diagonals
/// combine cleanly. Terminals with keyboard enhancement also send releases,
/// which drop the key at once; elsewhere keys simply age out.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_budget = Duration::from_millis(config.frame_ms.max(1));

    // key → frame of its latest press/repeat
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        let mut commands = Vec::new();
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    let action = action_for(&code, modifiers, world.status);
                    key_frame.insert(code, frame);
                    match action {
                        Some(Action::Quit) => return Ok(()),
                        Some(Action::Session(command)) => commands.push(command),
                        None => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Session transitions ───────────────────────────────────────────────
        for command in commands {
            let before = world.status;
            *world = session::apply(world, command, &mut rng);
            if before != GameStatus::Running && world.status == GameStatus::Running {
                // Time spent outside Running never reaches the simulation.
                last_tick = Instant::now();
            }
        }

        // ── Simulation step ───────────────────────────────────────────────────
        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;

        let input = held_input(&key_frame, frame);
        let step = tick(world, dt_ms, &input, &mut rng);
        if step.world.status == GameStatus::GameOver && world.status == GameStatus::Running {
            log::info!(
                "final score {} after {:.1}s, {} kills",
                step.world.score,
                step.world.elapsed_ms / 1000.0,
                step.world.kills
            );
        }
        *world = step.world;

        play_cues(out, &step.cues, config.bell)?;
        display::render(out, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {:?}", config.log_file))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match GameConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (GameConfig::default(), Some(e)),
    };
    init_logging(&config)?;
    if let Some(e) = config_error {
        log::warn!("Invalid config.ron: {}, using defaults", e);
    }
    log::info!("Starting plane battle with {:?}", config.rules);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat reporting; unsupported terminals just refuse.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread; the loop only polls rx.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    let mut world = World::new(config.rules);
    let result = game_loop(&mut out, &mut world, &rx, &config);

    // Restore the terminal whatever the loop returned.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Exiting");
    result.context("game loop failed")
}
