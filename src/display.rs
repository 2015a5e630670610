/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; world coordinates are scaled
/// onto the terminal grid and translated into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use side_scroller::entities::{EnemyKind, GameContext, Player, Rect};
use side_scroller::state::PlayerState;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_ATTACK: Color = Color::Cyan;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY_FLYING: Color = Color::Green;
const C_ENEMY_GROUND: Color = Color::Magenta;
const C_BULLET: Color = Color::Cyan;
const C_BURST: Color = Color::Yellow;
const C_MESSAGE: Color = Color::Yellow;
const C_DEBUG: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world coordinates onto the play area inside the border
/// (columns 1..width-1, rows 2..height-2).
struct Viewport {
    width: u16,
    height: u16,
    world_w: f64,
    world_h: f64,
}

impl Viewport {
    fn new(width: u16, height: u16, ctx: &GameContext) -> Self {
        Self {
            width,
            height,
            world_w: ctx.width,
            world_h: ctx.height,
        }
    }

    fn inner_cols(&self) -> f64 {
        self.width.saturating_sub(2).max(1) as f64
    }

    fn inner_rows(&self) -> f64 {
        self.height.saturating_sub(4).max(1) as f64
    }

    fn col(&self, x: f64) -> u16 {
        let c = (x / self.world_w * self.inner_cols()).floor();
        1 + c.clamp(0.0, self.inner_cols() - 1.0) as u16
    }

    fn row(&self, y: f64) -> u16 {
        let r = (y / self.world_h * self.inner_rows()).floor();
        2 + r.clamp(0.0, self.inner_rows() - 1.0) as u16
    }

    /// Whether any part of `rect` is inside the world horizontally.
    fn visible(&self, rect: &Rect) -> bool {
        rect.x + rect.width > 0.0 && rect.x < self.world_w
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    player: &Player,
    ctx: &GameContext,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let view = Viewport::new(width, height, ctx);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_ground(out, &view, ctx)?;
    draw_hud(out, &view, player, ctx)?;

    for enemy in &ctx.enemies {
        let color = match enemy.kind {
            EnemyKind::Flying => C_ENEMY_FLYING,
            EnemyKind::Ground => C_ENEMY_GROUND,
        };
        fill_rect(out, &view, &enemy.rect(), "▒", color)?;
    }
    for bullet in &ctx.bullets {
        fill_rect(out, &view, &bullet.rect(), "─", C_BULLET)?;
    }

    draw_player(out, &view, player)?;

    for burst in &ctx.collisions {
        if burst.x >= 0.0 && burst.x < ctx.width {
            out.queue(cursor::MoveTo(view.col(burst.x), view.row(burst.y)))?;
            out.queue(style::SetForegroundColor(C_BURST))?;
            out.queue(Print(if burst.frame_x % 2 == 0 { "✶" } else { "✷" }))?;
        }
    }
    for msg in &ctx.floating_messages {
        out.queue(cursor::MoveTo(view.col(msg.x), view.row(msg.y)))?;
        out.queue(style::SetForegroundColor(C_MESSAGE))?;
        out.queue(Print(&msg.text))?;
    }

    if ctx.debug {
        draw_debug(out, &view, player, ctx)?;
    }
    draw_controls_hint(out, &view)?;

    if ctx.game_over {
        draw_game_over(out, &view, ctx)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & ground ───────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_ground<W: Write>(out: &mut W, view: &Viewport, ctx: &GameContext) -> std::io::Result<()> {
    let row = view.row(ctx.height - ctx.ground_margin);
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print("▔".repeat(view.inner_cols() as usize)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: &Viewport,
    player: &Player,
    ctx: &GameContext,
) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", ctx.score)))?;

    // Player state — centre
    let state_str = format!("[ {} ]", player.state);
    let sx = (view.width / 2).saturating_sub(state_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(player_color(player.state)))?;
    out.queue(Print(&state_str))?;

    // Lives — right
    let hearts: String = "♥".repeat(ctx.lives.max(0) as usize);
    let lives_str = format!("Lives:{}", hearts);
    let rx = view
        .width
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn player_color(state: PlayerState) -> Color {
    if state == PlayerState::Hit {
        C_PLAYER_HIT
    } else if state.is_attack() {
        C_PLAYER_ATTACK
    } else {
        C_PLAYER
    }
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, player: &Player) -> std::io::Result<()> {
    // Alternate between two glyphs with the sprite frame so the body
    // visibly animates.
    let glyph = match (player.state, player.frame_x % 2) {
        (PlayerState::Rolling | PlayerState::Diving, 0) => "◐",
        (PlayerState::Rolling | PlayerState::Diving, _) => "◑",
        (_, 0) => "█",
        (_, _) => "▓",
    };
    fill_rect(out, view, &player.rect(), glyph, player_color(player.state))
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if !view.visible(rect) {
        return Ok(());
    }
    let (c0, r0) = (view.col(rect.x), view.row(rect.y));
    let c1 = view.col(rect.x + rect.width - 1.0).max(c0);
    let r1 = view.row(rect.y + rect.height - 1.0).max(r0);
    let line = glyph.repeat((c1 - c0 + 1) as usize);

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Debug overlay (row 1, over the top bar) ───────────────────────────────────

fn draw_debug<W: Write>(
    out: &mut W,
    view: &Viewport,
    player: &Player,
    ctx: &GameContext,
) -> std::io::Result<()> {
    let info = format!(
        " x:{:.0} y:{:.0} vy:{:.0} frame:{}/{} enemies:{} bullets:{} cooldown:{} ",
        player.x,
        player.y,
        player.vy,
        player.frame_x,
        player.max_frame,
        ctx.enemies.len(),
        ctx.bullets.len(),
        player.cooldown,
    );
    out.queue(cursor::MoveTo(2, 1))?;
    out.queue(style::SetForegroundColor(C_DEBUG))?;
    out.queue(Print(info))?;

    // Hitbox corners
    for rect in std::iter::once(player.rect()).chain(ctx.enemies.iter().map(|e| e.rect())) {
        if !view.visible(&rect) {
            continue;
        }
        out.queue(cursor::MoveTo(view.col(rect.x), view.row(rect.y)))?;
        out.queue(Print("┌"))?;
        out.queue(cursor::MoveTo(
            view.col(rect.x + rect.width - 1.0),
            view.row(rect.y + rect.height - 1.0),
        ))?;
        out.queue(Print("┘"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → : Move   ↑ : Jump   ↓ : Roll/Dive   R : Shoot   D : Debug   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, ctx: &GameContext) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", ctx.score);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = view.width / 2;
    let total_rows = lines.len() + 2; // 3 box lines + score + hint
    let start_row = (view.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "Enter - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
