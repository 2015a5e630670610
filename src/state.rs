/// Player movement/attack state machine.
///
/// The transition function `next_state` is pure: it looks at the current
/// state, the held tokens and a few physics facts and names the state to
/// move to, if any. `set_state` applies a transition and runs the entry
/// effects of the new state.

use std::fmt;

use crate::config::TimingConfig;
use crate::entities::{GameContext, Player};
use crate::input::{InputSnapshot, Token};
use crate::physics;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Sitting,
    Running,
    Jumping,
    Falling,
    Rolling,
    Diving,
    Hit,
}

impl PlayerState {
    pub const ALL: [PlayerState; 7] = [
        PlayerState::Sitting,
        PlayerState::Running,
        PlayerState::Jumping,
        PlayerState::Falling,
        PlayerState::Rolling,
        PlayerState::Diving,
        PlayerState::Hit,
    ];

    /// Enemy contact in an attack state kills the enemy instead of hurting
    /// the player.
    pub fn is_attack(self) -> bool {
        matches!(self, PlayerState::Rolling | PlayerState::Diving)
    }

    /// Fraction of the world's max scroll speed while in this state.
    pub fn speed_multiplier(self) -> f64 {
        match self {
            PlayerState::Sitting => 0.0,
            PlayerState::Running => 1.0,
            PlayerState::Jumping => 1.0,
            PlayerState::Falling => 1.0,
            PlayerState::Rolling => 1.0,
            PlayerState::Diving => 0.0,
            PlayerState::Hit => 0.0,
        }
    }

    /// Sprite sheet row.
    pub fn frame_row(self) -> u32 {
        match self {
            PlayerState::Sitting => 5,
            PlayerState::Running => 3,
            PlayerState::Jumping => 1,
            PlayerState::Falling => 2,
            PlayerState::Rolling => 6,
            PlayerState::Diving => 6,
            PlayerState::Hit => 4,
        }
    }

    /// Last frame index of the row; frames run `0..=max_frame`.
    pub fn max_frame(self) -> u32 {
        match self {
            PlayerState::Sitting => 4,
            PlayerState::Running => 8,
            PlayerState::Jumping => 6,
            PlayerState::Falling => 6,
            PlayerState::Rolling => 6,
            PlayerState::Diving => 6,
            PlayerState::Hit => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerState::Sitting => "SITTING",
            PlayerState::Running => "RUNNING",
            PlayerState::Jumping => "JUMPING",
            PlayerState::Falling => "FALLING",
            PlayerState::Rolling => "ROLLING",
            PlayerState::Diving => "DIVING",
            PlayerState::Hit => "HIT",
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physics facts a transition may depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub on_ground: bool,
    pub vy: f64,
    /// Time spent in the current state.
    pub elapsed_ms: f64,
}

impl Physics {
    pub fn of(player: &Player, ctx: &GameContext) -> Self {
        Self {
            on_ground: physics::on_ground(player, ctx),
            vy: player.vy,
            elapsed_ms: player.state_timer_ms,
        }
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// The state to move to from `state`, or `None` to stay.
///
/// Hit is never returned from here; it is forced by the collision resolver.
pub fn next_state(
    state: PlayerState,
    input: &InputSnapshot,
    physics: &Physics,
    timing: &TimingConfig,
) -> Option<PlayerState> {
    let up = input.held(Token::Up);
    let down = input.held(Token::Down);
    let horizontal = input.horizontal();
    let grounded_exit = if horizontal {
        PlayerState::Running
    } else {
        PlayerState::Sitting
    };

    match state {
        PlayerState::Sitting => {
            if up {
                Some(PlayerState::Jumping)
            } else if down {
                Some(PlayerState::Rolling)
            } else if horizontal {
                Some(PlayerState::Running)
            } else {
                None
            }
        }
        PlayerState::Running => {
            if up {
                Some(PlayerState::Jumping)
            } else if down {
                Some(PlayerState::Rolling)
            } else if !horizontal {
                Some(PlayerState::Sitting)
            } else {
                None
            }
        }
        PlayerState::Jumping => {
            if down && !physics.on_ground {
                Some(PlayerState::Diving)
            } else if physics.vy >= 0.0 {
                Some(PlayerState::Falling)
            } else {
                None
            }
        }
        PlayerState::Falling => {
            if physics.on_ground {
                Some(grounded_exit)
            } else if down {
                Some(PlayerState::Diving)
            } else {
                None
            }
        }
        PlayerState::Rolling => {
            if physics.elapsed_ms >= timing.roll_duration_ms || input.held(Token::Confirm) {
                Some(grounded_exit)
            } else {
                None
            }
        }
        PlayerState::Diving => {
            if !physics.on_ground {
                None
            } else if down {
                Some(PlayerState::Rolling)
            } else {
                Some(PlayerState::Sitting)
            }
        }
        PlayerState::Hit => {
            if physics.elapsed_ms >= timing.hit_duration_ms {
                Some(PlayerState::Sitting)
            } else {
                None
            }
        }
    }
}

/// Switch to `next` and run its entry effects. Re-entering the current
/// state restarts it.
pub fn set_state(player: &mut Player, ctx: &mut GameContext, next: PlayerState) {
    let previous = player.state;
    player.state = next;
    player.state_timer_ms = 0.0;
    ctx.speed = ctx.max_speed * next.speed_multiplier();

    player.frame_x = 0;
    player.frame_y = next.frame_row();
    player.max_frame = next.max_frame();
    match next {
        PlayerState::Jumping => player.vy = -player.jump_impulse,
        PlayerState::Diving => player.vy = player.dive_impulse,
        _ => {}
    }

    tracing::debug!(from = %previous, to = %next, "player state transition");
}

/// Apply at most one input/physics driven transition.
pub fn handle_input(player: &mut Player, ctx: &mut GameContext, input: &InputSnapshot) {
    let physics = Physics::of(player, ctx);
    if let Some(next) = next_state(player.state, input, &physics, &ctx.config.timing) {
        set_state(player, ctx, next);
    }
}
