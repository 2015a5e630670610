use side_scroller::compute::*;
use side_scroller::config::GameConfig;
use side_scroller::entities::*;
use side_scroller::input::{InputSnapshot, Token};
use side_scroller::state::PlayerState;

fn make_game() -> (Player, GameContext) {
    new_session(GameConfig::default())
}

fn keys(tokens: &[Token]) -> InputSnapshot {
    InputSnapshot::new(tokens.iter().copied())
}

const DT: f64 = 16.0;

// ── Session setup ─────────────────────────────────────────────────────────────

#[test]
fn new_session_player_on_ground_sitting() {
    let (player, _) = make_game();
    assert_eq!(player.x, 0.0);
    assert_eq!(player.y, 340.0);
    assert_eq!(player.state, PlayerState::Sitting);
    assert_eq!(player.frame_y, 5);
    assert!(!player.cooldown);
}

#[test]
fn new_session_context_defaults() {
    let (_, ctx) = make_game();
    assert_eq!(ctx.score, 0);
    assert_eq!(ctx.lives, 5);
    assert_eq!(ctx.speed, 0.0);
    assert_eq!(ctx.max_speed, 3.0);
    assert!(!ctx.game_over);
    assert!(!ctx.debug);
    assert!(ctx.enemies.is_empty());
    assert!(ctx.bullets.is_empty());
    assert_eq!(ctx.clock_ms, 0.0);
}

#[test]
fn init_game_honours_config() {
    let mut config = GameConfig::default();
    config.world.width = 640.0;
    config.player.starting_lives = 2;
    let ctx = init_game(config);
    assert_eq!(ctx.width, 640.0);
    assert_eq!(ctx.lives, 2);
}

// ── Update pipeline ───────────────────────────────────────────────────────────

#[test]
fn update_advances_clock_and_state_timer() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &InputSnapshot::empty(), DT);
    update(&mut player, &mut ctx, &InputSnapshot::empty(), DT);
    assert_eq!(ctx.clock_ms, 32.0);
    assert_eq!(player.state_timer_ms, 32.0);
}

#[test]
fn running_scrolls_the_world() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Right]), DT);
    assert_eq!(player.state, PlayerState::Running);
    assert_eq!(ctx.speed, 3.0);

    update(&mut player, &mut ctx, &keys(&[Token::Right]), DT);
    assert_eq!(player.x, 10.0);

    update(&mut player, &mut ctx, &InputSnapshot::empty(), DT);
    assert_eq!(player.state, PlayerState::Sitting);
    assert_eq!(ctx.speed, 0.0);
}

#[test]
fn full_jump_arc_returns_to_ground() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Up]), DT);
    assert_eq!(player.state, PlayerState::Jumping);
    assert_eq!(player.y, 313.0);
    assert_eq!(player.vy, -26.0);

    let mut saw_falling = false;
    let mut min_y = player.y;
    for _ in 0..200 {
        update(&mut player, &mut ctx, &InputSnapshot::empty(), DT);
        saw_falling |= player.state == PlayerState::Falling;
        min_y = min_y.min(player.y);
        if player.state == PlayerState::Sitting {
            break;
        }
    }

    assert!(saw_falling);
    assert!(min_y < 40.0);
    assert_eq!(player.state, PlayerState::Sitting);
    assert_eq!(player.y, 340.0);
    assert_eq!(player.vy, 0.0);
}

#[test]
fn landing_while_running_keeps_running() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Up, Token::Right]), DT);
    for _ in 0..200 {
        update(&mut player, &mut ctx, &keys(&[Token::Right]), DT);
        if player.state == PlayerState::Running {
            break;
        }
    }
    assert_eq!(player.state, PlayerState::Running);
    assert_eq!(player.y, 340.0);
}

#[test]
fn dive_then_roll_on_landing() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Up]), DT);
    update(&mut player, &mut ctx, &keys(&[Token::Down]), DT);
    assert_eq!(player.state, PlayerState::Diving);
    assert_eq!(ctx.speed, 0.0);

    for _ in 0..100 {
        update(&mut player, &mut ctx, &keys(&[Token::Down]), DT);
        if player.state != PlayerState::Diving {
            break;
        }
    }
    assert_eq!(player.state, PlayerState::Rolling);
    assert_eq!(player.y, 340.0);
}

#[test]
fn roll_ends_after_duration() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Down]), DT);
    assert_eq!(player.state, PlayerState::Rolling);

    // 37 × 16 = 592 ms, still rolling
    for _ in 0..37 {
        update(&mut player, &mut ctx, &InputSnapshot::empty(), DT);
    }
    assert_eq!(player.state, PlayerState::Rolling);

    update(&mut player, &mut ctx, &InputSnapshot::empty(), DT);
    assert_eq!(player.state, PlayerState::Sitting);
}

#[test]
fn confirm_ends_roll_early() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Down]), DT);
    update(&mut player, &mut ctx, &keys(&[Token::Confirm, Token::Right]), DT);
    assert_eq!(player.state, PlayerState::Running);
}

#[test]
fn hit_recovers_to_sitting() {
    let (mut player, mut ctx) = make_game();
    ctx.enemies.push(Enemy::new(10.0, 350.0, 40.0, 40.0));
    update(&mut player, &mut ctx, &keys(&[Token::Right]), DT);
    assert_eq!(player.state, PlayerState::Hit);

    for _ in 0..40 {
        update(&mut player, &mut ctx, &keys(&[Token::Right]), DT);
        if player.state != PlayerState::Hit {
            break;
        }
    }
    assert_eq!(player.state, PlayerState::Sitting);
    assert_eq!(player.x, 0.0);
}

#[test]
fn rolling_through_enemy_scores() {
    let (mut player, mut ctx) = make_game();
    update(&mut player, &mut ctx, &keys(&[Token::Down]), DT);
    ctx.enemies.push(Enemy::new(30.0, 360.0, 40.0, 40.0));
    update(&mut player, &mut ctx, &keys(&[Token::Down]), DT);
    assert_eq!(ctx.score, 1);
    assert_eq!(ctx.lives, 5);
    assert!(ctx.enemies.is_empty());
    assert_eq!(player.state, PlayerState::Rolling);
}
