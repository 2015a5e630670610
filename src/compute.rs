/// Session construction and the per-frame update.
///
/// `update` is the only entry point the game loop needs: it takes the held
/// tokens for the frame and the real time elapsed since the previous frame,
/// and runs every stage of the simulation in a fixed order against the
/// explicitly passed player and context.

use crate::collision::resolve_player_collisions;
use crate::config::GameConfig;
use crate::entities::{GameContext, Player};
use crate::input::InputSnapshot;
use crate::physics::{advance_animation, integrate};
use crate::projectiles::{try_fire, update_projectiles};
use crate::state::{handle_input, set_state, PlayerState};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build an empty session context from a configuration.
pub fn init_game(config: GameConfig) -> GameContext {
    GameContext {
        width: config.world.width,
        height: config.world.height,
        ground_margin: config.world.ground_margin,
        speed: 0.0,
        max_speed: config.world.max_speed,
        score: 0,
        lives: config.player.starting_lives,
        game_over: false,
        debug: false,
        enemies: Vec::new(),
        bullets: Vec::new(),
        collisions: Vec::new(),
        floating_messages: Vec::new(),
        events: Vec::new(),
        clock_ms: 0.0,
        enemy_timer_ms: 0.0,
        config,
    }
}

/// A player standing on the ground at the left edge, not yet in any state.
/// Use `spawn_player` to also enter the initial state.
pub fn new_player(ctx: &GameContext) -> Player {
    let cfg = &ctx.config.player;
    Player {
        x: 0.0,
        y: ctx.height - cfg.height - ctx.ground_margin,
        width: cfg.width,
        height: cfg.height,
        vy: 0.0,
        weight: cfg.weight,
        speed: 0.0,
        max_speed: cfg.max_speed,
        jump_impulse: cfg.jump_impulse,
        dive_impulse: cfg.dive_impulse,
        state: PlayerState::Sitting,
        state_timer_ms: 0.0,
        frame_x: 0,
        frame_y: PlayerState::Sitting.frame_row(),
        max_frame: PlayerState::Sitting.max_frame(),
        frame_timer: 0.0,
        frame_interval: 1000.0 / cfg.fps,
        cooldown: false,
        cooldown_until_ms: 0.0,
    }
}

/// Create the player and enter Sitting.
pub fn spawn_player(ctx: &mut GameContext) -> Player {
    let mut player = new_player(ctx);
    set_state(&mut player, ctx, PlayerState::Sitting);
    player
}

/// A fresh context and player for a new session.
pub fn new_session(config: GameConfig) -> (Player, GameContext) {
    let mut ctx = init_game(config);
    let player = spawn_player(&mut ctx);
    (player, ctx)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: clock, player ↔ enemy collisions, state transitions, body
/// integration, animation, projectiles, fire. A hit taken in the collision
/// stage therefore wins over anything the held keys would have done.
pub fn update(
    player: &mut Player,
    ctx: &mut GameContext,
    input: &InputSnapshot,
    delta_ms: f64,
) {
    ctx.clock_ms += delta_ms;
    player.state_timer_ms += delta_ms;

    resolve_player_collisions(player, ctx);
    handle_input(player, ctx, input);
    integrate(player, ctx, input);
    advance_animation(player, delta_ms);
    update_projectiles(ctx);
    try_fire(player, ctx, input);
}
