/// Enemy spawning and movement.
///
/// Randomness comes through the injected `rng` so callers control
/// determinism (tests pass a seeded RNG).

use rand::Rng;

use crate::entities::{Enemy, EnemyKind, GameContext};

/// Spawn on the spawn interval, move every enemy, and drop the ones that
/// scrolled off the left edge or were marked elsewhere.
pub fn update_enemies(ctx: &mut GameContext, delta_ms: f64, rng: &mut impl Rng) {
    if ctx.enemy_timer_ms > ctx.config.enemy.spawn_interval_ms {
        ctx.enemy_timer_ms = 0.0;
        spawn_enemies(ctx, rng);
    } else {
        ctx.enemy_timer_ms += delta_ms;
    }

    let scroll = ctx.speed;
    for enemy in ctx.enemies.iter_mut() {
        enemy.x -= enemy.speed_x + scroll;
        if enemy.kind == EnemyKind::Flying {
            enemy.angle += enemy.va;
            enemy.y += enemy.angle.sin();
        }
        if enemy.x + enemy.width < 0.0 {
            enemy.marked_for_deletion = true;
        }
    }
    ctx.enemies.retain(|e| !e.marked_for_deletion);
}

/// One flying enemy every spawn, plus a ground enemy half the time while
/// the world is scrolling.
pub fn spawn_enemies(ctx: &mut GameContext, rng: &mut impl Rng) {
    let cfg = &ctx.config.enemy;
    let (width, height) = (cfg.width, cfg.height);

    if ctx.speed > 0.0 && rng.gen_bool(0.5) {
        ctx.enemies.push(Enemy {
            x: ctx.width,
            y: ctx.height - height - ctx.ground_margin,
            width,
            height,
            kind: EnemyKind::Ground,
            speed_x: 0.0,
            angle: 0.0,
            va: 0.0,
            marked_for_deletion: false,
        });
    }

    let top = (ctx.height * 0.5 - height).max(0.0);
    ctx.enemies.push(Enemy {
        x: ctx.width + rng.gen_range(0.0..ctx.width * 0.5),
        y: rng.gen_range(0.0..=top),
        width,
        height,
        kind: EnemyKind::Flying,
        speed_x: rng.gen_range(1.0..2.0),
        angle: 0.0,
        va: rng.gen_range(0.1..0.2),
        marked_for_deletion: false,
    });
    tracing::trace!(count = ctx.enemies.len(), "enemies spawned");
}
