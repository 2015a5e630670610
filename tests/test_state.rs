use side_scroller::compute::new_session;
use side_scroller::config::{GameConfig, TimingConfig};
use side_scroller::input::{InputSnapshot, Token};
use side_scroller::state::*;

use side_scroller::state::PlayerState::*;

const GROUNDED: Physics = Physics {
    on_ground: true,
    vy: 0.0,
    elapsed_ms: 0.0,
};
const RISING: Physics = Physics {
    on_ground: false,
    vy: -10.0,
    elapsed_ms: 0.0,
};
const DESCENDING: Physics = Physics {
    on_ground: false,
    vy: 4.0,
    elapsed_ms: 0.0,
};

fn timing() -> TimingConfig {
    TimingConfig::default()
}

fn after(physics: Physics, elapsed_ms: f64) -> Physics {
    Physics {
        elapsed_ms,
        ..physics
    }
}

fn keys(tokens: &[Token]) -> InputSnapshot {
    InputSnapshot::new(tokens.iter().copied())
}

// ── Transition table ──────────────────────────────────────────────────────────

#[test]
fn transition_table() {
    let roll = timing().roll_duration_ms;
    let hit = timing().hit_duration_ms;
    let u = Token::Up;
    let d = Token::Down;
    let l = Token::Left;
    let r = Token::Right;
    let enter = Token::Confirm;
    let fire = Token::Fire;

    #[rustfmt::skip]
    let table: Vec<(PlayerState, Vec<Token>, Physics, Option<PlayerState>)> = vec![
        // Sitting
        (Sitting, vec![],           GROUNDED, None),
        (Sitting, vec![fire],       GROUNDED, None),
        (Sitting, vec![enter],      GROUNDED, None),
        (Sitting, vec![u],          GROUNDED, Some(Jumping)),
        (Sitting, vec![d],          GROUNDED, Some(Rolling)),
        (Sitting, vec![l],          GROUNDED, Some(Running)),
        (Sitting, vec![r],          GROUNDED, Some(Running)),
        (Sitting, vec![r, u],       GROUNDED, Some(Jumping)),
        (Sitting, vec![u, d],       GROUNDED, Some(Jumping)),
        (Sitting, vec![l, d],       GROUNDED, Some(Rolling)),
        // Running
        (Running, vec![r],          GROUNDED, None),
        (Running, vec![l, fire],    GROUNDED, None),
        (Running, vec![],           GROUNDED, Some(Sitting)),
        (Running, vec![fire],       GROUNDED, Some(Sitting)),
        (Running, vec![enter],      GROUNDED, Some(Sitting)),
        (Running, vec![u],          GROUNDED, Some(Jumping)),
        (Running, vec![r, u],       GROUNDED, Some(Jumping)),
        (Running, vec![d],          GROUNDED, Some(Rolling)),
        (Running, vec![l, d],       GROUNDED, Some(Rolling)),
        // Jumping
        (Jumping, vec![],           RISING,     None),
        (Jumping, vec![u, r],       RISING,     None),
        (Jumping, vec![],           DESCENDING, Some(Falling)),
        (Jumping, vec![], Physics { vy: 0.0, ..RISING }, Some(Falling)),
        (Jumping, vec![d],          RISING,     Some(Diving)),
        (Jumping, vec![d],          DESCENDING, Some(Diving)),
        // Falling
        (Falling, vec![],           DESCENDING, None),
        (Falling, vec![r],          DESCENDING, None),
        (Falling, vec![d],          DESCENDING, Some(Diving)),
        (Falling, vec![],           GROUNDED,   Some(Sitting)),
        (Falling, vec![u],          GROUNDED,   Some(Sitting)),
        (Falling, vec![l],          GROUNDED,   Some(Running)),
        (Falling, vec![r],          GROUNDED,   Some(Running)),
        (Falling, vec![d],          GROUNDED,   Some(Sitting)),
        // Rolling
        (Rolling, vec![],           GROUNDED,                None),
        (Rolling, vec![d],          GROUNDED,                None),
        (Rolling, vec![r],          after(GROUNDED, roll - 1.0), None),
        (Rolling, vec![],           after(GROUNDED, roll),   Some(Sitting)),
        (Rolling, vec![r],          after(GROUNDED, roll),   Some(Running)),
        (Rolling, vec![enter],      GROUNDED,                Some(Sitting)),
        (Rolling, vec![enter, l],   GROUNDED,                Some(Running)),
        // Diving
        (Diving, vec![],            DESCENDING, None),
        (Diving, vec![d],           DESCENDING, None),
        (Diving, vec![],            GROUNDED,   Some(Sitting)),
        (Diving, vec![r],           GROUNDED,   Some(Sitting)),
        (Diving, vec![d],           GROUNDED,   Some(Rolling)),
        // Hit
        (Hit, vec![],               GROUNDED,               None),
        (Hit, vec![u, d, r, enter], GROUNDED,               None),
        (Hit, vec![],               after(GROUNDED, hit - 1.0), None),
        (Hit, vec![],               after(GROUNDED, hit),   Some(Sitting)),
        (Hit, vec![r, u],           after(GROUNDED, hit),   Some(Sitting)),
    ];

    for (state, tokens, physics, expected) in table {
        let got = next_state(state, &keys(&tokens), &physics, &timing());
        assert_eq!(
            got, expected,
            "from {state} with {tokens:?} and {physics:?}"
        );
    }
}

/// Every state, every token combination, every physics scenario: the
/// transition function never produces Hit and never names the current
/// state.
#[test]
fn transition_exhaustive_invariants() {
    let scenarios = [
        GROUNDED,
        RISING,
        DESCENDING,
        after(GROUNDED, 10_000.0),
        after(DESCENDING, 10_000.0),
    ];

    for state in PlayerState::ALL {
        for mask in 0u32..(1 << Token::ALL.len()) {
            let held: Vec<Token> = Token::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, t)| *t)
                .collect();
            for physics in &scenarios {
                let got = next_state(state, &keys(&held), physics, &timing());
                assert_ne!(got, Some(Hit), "from {state} with {held:?}");
                assert_ne!(got, Some(state), "self loop from {state} with {held:?}");
            }
        }
    }
}

#[test]
fn fire_never_drives_a_transition() {
    for state in PlayerState::ALL {
        for physics in [GROUNDED, RISING, DESCENDING] {
            let without = next_state(state, &keys(&[]), &physics, &timing());
            let with = next_state(state, &keys(&[Token::Fire]), &physics, &timing());
            assert_eq!(without, with, "from {state}");
        }
    }
}

// ── State properties ──────────────────────────────────────────────────────────

#[test]
fn only_rolling_and_diving_attack() {
    let attacking: Vec<_> = PlayerState::ALL.into_iter().filter(|s| s.is_attack()).collect();
    assert_eq!(attacking, vec![Rolling, Diving]);
}

#[test]
fn speed_multipliers() {
    assert_eq!(Sitting.speed_multiplier(), 0.0);
    assert_eq!(Running.speed_multiplier(), 1.0);
    assert_eq!(Falling.speed_multiplier(), 1.0);
    assert_eq!(Rolling.speed_multiplier(), 1.0);
    assert_eq!(Hit.speed_multiplier(), 0.0);
}

// ── Entry effects ─────────────────────────────────────────────────────────────

#[test]
fn enter_sets_world_speed_and_sprite_row() {
    let (mut player, mut ctx) = new_session(GameConfig::default());
    player.frame_x = 3;
    set_state(&mut player, &mut ctx, Running);
    assert_eq!(player.state, Running);
    assert_eq!(ctx.speed, ctx.max_speed);
    assert_eq!(player.frame_x, 0);
    assert_eq!(player.frame_y, Running.frame_row());
    assert_eq!(player.max_frame, 8);

    set_state(&mut player, &mut ctx, Hit);
    assert_eq!(ctx.speed, 0.0);
    assert_eq!(player.max_frame, 10);
}

#[test]
fn enter_jumping_sets_upward_impulse() {
    let (mut player, mut ctx) = new_session(GameConfig::default());
    set_state(&mut player, &mut ctx, Jumping);
    assert_eq!(player.vy, -27.0);
}

#[test]
fn enter_diving_sets_downward_impulse() {
    let (mut player, mut ctx) = new_session(GameConfig::default());
    player.vy = -5.0;
    set_state(&mut player, &mut ctx, Diving);
    assert_eq!(player.vy, 15.0);
}

#[test]
fn enter_resets_state_timer() {
    let (mut player, mut ctx) = new_session(GameConfig::default());
    player.state_timer_ms = 250.0;
    set_state(&mut player, &mut ctx, Hit);
    assert_eq!(player.state_timer_ms, 0.0);
}

#[test]
fn handle_input_uses_player_physics() {
    let (mut player, mut ctx) = new_session(GameConfig::default());
    handle_input(&mut player, &mut ctx, &keys(&[Token::Down]));
    assert_eq!(player.state, Rolling);

    // Lift the player: a Falling player in the air stays put
    set_state(&mut player, &mut ctx, Falling);
    player.y -= 100.0;
    handle_input(&mut player, &mut ctx, &keys(&[]));
    assert_eq!(player.state, Falling);
}
