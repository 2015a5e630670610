mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use side_scroller::compute::{new_session, update};
use side_scroller::config::GameConfig;
use side_scroller::effects::update_effects;
use side_scroller::enemies::update_enemies;
use side_scroller::entities::{FrameEvent, GameContext, Player};
use side_scroller::input::{InputBuffer, Key};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Environment variable naming an optional TOML config file.
const CONFIG_ENV: &str = "SIDE_SCROLLER_CONFIG";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: the terminal belongs to the renderer.
fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = std::env::temp_dir().join("side_scroller");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "game.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/game.log", log_dir.display());
    Ok(guard)
}

fn load_config() -> Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(GameConfig::load(PathBuf::from(path))?),
        None => Ok(GameConfig::default()),
    }
}

// ── Key mapping ───────────────────────────────────────────────────────────────

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(&str, Color)] = &[
        ("»  SIDE  SCROLLER  «", Color::Cyan),
        ("", Color::White),
        ("Roll or dive into enemies to destroy them.", Color::White),
        ("Touching them any other way costs a life.", Color::White),
        ("", Color::White),
        ("← →  Move      ↑  Jump      ↓  Roll / Dive", Color::DarkGrey),
        ("R  Shoot       Enter  End roll      D  Debug", Color::DarkGrey),
        ("", Color::White),
        ("[Enter] Start     [Q] Quit", Color::Yellow),
    ];
    let top = cy.saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            top + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Key presses and releases are applied to the `InputBuffer` between ticks;
/// each tick sees one snapshot of it.  On terminals that only send `Press`
/// events (OS key-repeat shows as repeated `Press`), a key is released once
/// it has been silent for `HOLD_WINDOW` frames.
fn game_loop<W: Write>(
    out: &mut W,
    player: &mut Player,
    ctx: &mut GameContext,
    rx: &mpsc::Receiver<Event>,
    releases_reported: bool,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let mut input = InputBuffer::new();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let (code, kind, modifiers) = match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => (code, kind, modifiers),
                Event::FocusLost => {
                    input.clear();
                    key_frame.clear();
                    continue;
                }
                _ => continue,
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Enter if ctx.game_over => return Ok(false),
                        _ => {}
                    }
                    if let Some(key) = to_key(code) {
                        if !key_frame.contains_key(&key) {
                            input.key_down(key, ctx);
                        }
                        key_frame.insert(key, frame);
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    if let Some(key) = to_key(code) {
                        key_frame.insert(key, frame);
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    if let Some(key) = to_key(code) {
                        key_frame.remove(&key);
                        input.key_up(key);
                    }
                }
            }
        }

        if !releases_reported {
            let stale: Vec<Key> = key_frame
                .iter()
                .filter(|(_, &seen)| frame.saturating_sub(seen) > HOLD_WINDOW)
                .map(|(&key, _)| key)
                .collect();
            for key in stale {
                key_frame.remove(&key);
                input.key_up(key);
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let now = Instant::now();
        let delta_ms = now.duration_since(last).as_secs_f64() * 1000.0;
        last = now;

        if !ctx.game_over {
            let snapshot = input.snapshot();
            update_enemies(ctx, delta_ms, &mut rng);
            update(player, ctx, &snapshot, delta_ms);
            update_effects(ctx, delta_ms);
        }

        let mut bell = false;
        for event in ctx.events.drain(..) {
            match event {
                FrameEvent::AttackSound => bell = true,
                other => tracing::debug!(?other, "frame event"),
            }
        }

        let (width, height) = terminal::size()?;
        display::render(out, player, ctx, width, height)?;
        if bell {
            out.queue(Print("\x07"))?;
            out.flush()?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _guard = setup_logging()?;
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, "terminal initialised");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    keyboard_enhanced: bool,
) -> Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let (mut player, mut ctx) = new_session(config.clone());
                tracing::info!(lives = ctx.lives, "session started");
                let quit = game_loop(out, &mut player, &mut ctx, rx, keyboard_enhanced)?;
                tracing::info!(score = ctx.score, game_over = ctx.game_over, "session ended");

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
