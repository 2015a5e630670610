/// Player body integration: horizontal movement, gravity, ground clamp and
/// the sprite animation timer.

use crate::entities::{GameContext, Player};
use crate::input::{InputSnapshot, Token};
use crate::state::PlayerState;

/// Highest `y` the player may reach; the player stands on the ground here.
pub fn ground_level(player: &Player, ctx: &GameContext) -> f64 {
    ctx.height - player.height - ctx.ground_margin
}

pub fn on_ground(player: &Player, ctx: &GameContext) -> bool {
    player.y >= ground_level(player, ctx)
}

/// Advance the body by one tick.
///
/// The horizontal speed applied this tick is the one chosen on the previous
/// tick; the held keys pick the speed for the next one. Movement is locked
/// while the player is in the Hit state.
pub fn integrate(player: &mut Player, ctx: &GameContext, input: &InputSnapshot) {
    // ── Horizontal ──
    player.x += player.speed;
    player.speed = if player.state == PlayerState::Hit {
        0.0
    } else if input.held(Token::Right) {
        player.max_speed
    } else if input.held(Token::Left) {
        -player.max_speed
    } else {
        0.0
    };
    let max_x = (ctx.width - player.width).max(0.0);
    player.x = player.x.clamp(0.0, max_x);

    // ── Vertical ──
    player.y += player.vy;
    if on_ground(player, ctx) {
        player.vy = 0.0;
    } else {
        player.vy += player.weight;
    }
    let ground = ground_level(player, ctx);
    if player.y > ground {
        player.y = ground;
    }
}

/// Step the sprite frame once the frame interval has been exceeded.
pub fn advance_animation(player: &mut Player, delta_ms: f64) {
    if player.frame_timer > player.frame_interval {
        player.frame_timer = 0.0;
        if player.frame_x < player.max_frame {
            player.frame_x += 1;
        } else {
            player.frame_x = 0;
        }
    } else {
        player.frame_timer += delta_ms;
    }
}
