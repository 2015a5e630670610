/// Player ↔ enemy collision resolution.
///
/// Enemies are marked during the scan and the list is compacted once the
/// scan is over, so an enemy is resolved at most once per tick no matter how
/// many times it would otherwise be visited.

use crate::entities::{
    CollisionAnimation, FloatingMessage, FrameEvent, GameContext, KillSource, Player,
};
use crate::state::{self, PlayerState};

/// Score awarded for an attack kill.
pub const KILL_SCORE: i64 = 1;
/// Score lost when the player takes a hit.
pub const HIT_PENALTY: i64 = 5;

/// Resolve every enemy overlapping the player, then drop resolved enemies.
pub fn resolve_player_collisions(player: &mut Player, ctx: &mut GameContext) {
    let player_box = player.rect();

    for i in 0..ctx.enemies.len() {
        let enemy = &mut ctx.enemies[i];
        if enemy.marked_for_deletion || !enemy.rect().overlaps(&player_box) {
            continue;
        }
        enemy.marked_for_deletion = true;
        let (ex, ey) = (enemy.x, enemy.y);
        let (cx, cy) = enemy.rect().center();
        ctx.collisions.push(CollisionAnimation::new(cx, cy));

        if player.state.is_attack() {
            ctx.score += KILL_SCORE;
            ctx.floating_messages
                .push(FloatingMessage::new("+1", ex, ey, 0.0, 0.0));
            ctx.events.push(FrameEvent::AttackSound);
            ctx.events.push(FrameEvent::EnemyKilled {
                x: cx,
                y: cy,
                by: KillSource::Attack,
            });
            tracing::info!(state = %player.state, score = ctx.score, "enemy destroyed by attack");
        } else {
            take_hit(player, ctx);
        }
    }

    compact_enemies(ctx);
}

/// Force the player into Hit and charge the penalty. Lives never go below
/// zero; reaching zero raises the game-over flag.
fn take_hit(player: &mut Player, ctx: &mut GameContext) {
    state::set_state(player, ctx, PlayerState::Hit);
    ctx.score -= HIT_PENALTY;
    ctx.lives = (ctx.lives - 1).max(0);
    ctx.events.push(FrameEvent::PlayerHit {
        lives_left: ctx.lives,
    });
    tracing::info!(lives = ctx.lives, score = ctx.score, "player hit");

    if ctx.lives <= 0 && !ctx.game_over {
        ctx.game_over = true;
        ctx.events.push(FrameEvent::GameOver { score: ctx.score });
        tracing::warn!(score = ctx.score, "game over");
    }
}

/// Remove every enemy marked for deletion.
pub fn compact_enemies(ctx: &mut GameContext) {
    ctx.enemies.retain(|e| !e.marked_for_deletion);
}
