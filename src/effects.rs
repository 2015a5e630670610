/// Lifecycle of the visual effects the simulation leaves behind: collision
/// bursts play through their frames once, floating messages ease toward
/// their target and fade out after a fixed number of ticks.

use crate::entities::GameContext;

/// Ticks a floating message stays alive.
pub const MESSAGE_LIFETIME: u32 = 100;
/// Fraction of the remaining distance a message covers each tick.
const MESSAGE_EASING: f64 = 0.03;

pub fn update_effects(ctx: &mut GameContext, delta_ms: f64) {
    let scroll = ctx.speed;

    for anim in ctx.collisions.iter_mut() {
        anim.x -= scroll;
        if anim.frame_timer > anim.frame_interval {
            anim.frame_timer = 0.0;
            anim.frame_x += 1;
            if anim.frame_x > anim.max_frame {
                anim.marked_for_deletion = true;
            }
        } else {
            anim.frame_timer += delta_ms;
        }
    }

    for msg in ctx.floating_messages.iter_mut() {
        msg.x += (msg.target_x - msg.x) * MESSAGE_EASING;
        msg.y += (msg.target_y - msg.y) * MESSAGE_EASING;
        msg.timer += 1;
        if msg.timer > MESSAGE_LIFETIME {
            msg.marked_for_deletion = true;
        }
    }

    ctx.collisions.retain(|a| !a.marked_for_deletion);
    ctx.floating_messages.retain(|m| !m.marked_for_deletion);
}
