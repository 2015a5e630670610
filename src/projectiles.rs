/// Projectile spawning, movement and bullet ↔ enemy resolution.
///
/// Fire is gated by a deadline on the context clock rather than a timer
/// callback: once `clock_ms` reaches `cooldown_until_ms` the next Fire goes
/// through.

use crate::collision::{compact_enemies, KILL_SCORE};
use crate::entities::{
    Bullet, CollisionAnimation, FloatingMessage, FrameEvent, GameContext, KillSource, Player,
};
use crate::input::{InputSnapshot, Token};

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Lift the cooldown if its deadline has passed.
pub fn refresh_cooldown(player: &mut Player, clock_ms: f64) {
    if player.cooldown && clock_ms >= player.cooldown_until_ms {
        player.cooldown = false;
    }
}

/// Spawn one bullet at the player's position if Fire is held and the
/// cooldown is clear. Returns whether a bullet was spawned.
pub fn try_fire(player: &mut Player, ctx: &mut GameContext, input: &InputSnapshot) -> bool {
    refresh_cooldown(player, ctx.clock_ms);
    if !input.held(Token::Fire) || player.cooldown {
        return false;
    }

    let cfg = &ctx.config.bullet;
    ctx.bullets.push(Bullet {
        x: player.x,
        y: player.y,
        width: cfg.width,
        height: cfg.height,
        speed: cfg.speed,
        marked_for_deletion: false,
    });
    player.cooldown = true;
    player.cooldown_until_ms = ctx.clock_ms + ctx.config.timing.fire_cooldown_ms;
    tracing::trace!(x = player.x, y = player.y, "bullet spawned");
    true
}

// ── Per-tick update ───────────────────────────────────────────────────────────

/// Move every bullet and mark the ones that left the world.
pub fn advance_bullets(ctx: &mut GameContext) {
    let width = ctx.width;
    for bullet in ctx.bullets.iter_mut() {
        bullet.x += bullet.speed;
        if bullet.x > width || bullet.x + bullet.width < 0.0 {
            bullet.marked_for_deletion = true;
        }
    }
}

/// Resolve bullet hits in list order. A bullet destroys the first live enemy
/// it overlaps and is spent; an enemy already destroyed this tick cannot be
/// credited again.
pub fn resolve_bullet_hits(ctx: &mut GameContext) {
    for bi in 0..ctx.bullets.len() {
        if ctx.bullets[bi].marked_for_deletion {
            continue;
        }
        let bullet_box = ctx.bullets[bi].rect();

        let target = ctx
            .enemies
            .iter()
            .position(|e| !e.marked_for_deletion && e.rect().overlaps(&bullet_box));
        let Some(ei) = target else {
            continue;
        };

        let enemy = &mut ctx.enemies[ei];
        enemy.marked_for_deletion = true;
        let (ex, ey) = (enemy.x, enemy.y);
        let (cx, cy) = enemy.rect().center();
        ctx.bullets[bi].marked_for_deletion = true;

        ctx.collisions.push(CollisionAnimation::new(cx, cy));
        ctx.floating_messages
            .push(FloatingMessage::new("+1", ex, ey, 0.0, 0.0));
        ctx.score += KILL_SCORE;
        ctx.events.push(FrameEvent::EnemyKilled {
            x: cx,
            y: cy,
            by: KillSource::Bullet,
        });
        tracing::info!(score = ctx.score, "enemy destroyed by bullet");
    }
}

pub fn compact_bullets(ctx: &mut GameContext) {
    ctx.bullets.retain(|b| !b.marked_for_deletion);
}

/// Advance, resolve and compact in one pass.
pub fn update_projectiles(ctx: &mut GameContext) {
    advance_bullets(ctx);
    resolve_bullet_hits(ctx);
    compact_bullets(ctx);
    compact_enemies(ctx);
}
