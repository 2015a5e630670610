/// All game entity types — pure data, no logic.

use crate::config::GameConfig;
use crate::state::PlayerState;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in world coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open overlap test: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity, negative = upward.
    pub vy: f64,
    /// Gravity added to `vy` each airborne tick.
    pub weight: f64,
    /// Signed horizontal speed applied to `x` each tick.
    pub speed: f64,
    pub max_speed: f64,
    pub jump_impulse: f64,
    pub dive_impulse: f64,
    pub state: PlayerState,
    /// Time spent in `state`, reset on every transition.
    pub state_timer_ms: f64,
    // Sprite sheet cursor. Presentation only.
    pub frame_x: u32,
    pub frame_y: u32,
    pub max_frame: u32,
    pub frame_timer: f64,
    pub frame_interval: f64,
    /// True while a projectile spawn is gated.
    pub cooldown: bool,
    /// Context clock value at which `cooldown` lifts.
    pub cooldown_until_ms: f64,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Drifts left while bobbing on a sine wave.
    Flying,
    /// Sits on the ground line and scrolls with the world.
    Ground,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: EnemyKind,
    /// Own leftward speed on top of the world scroll.
    pub speed_x: f64,
    /// Sine phase and its per-tick step, used by flying enemies.
    pub angle: f64,
    pub va: f64,
    pub marked_for_deletion: bool,
}

impl Enemy {
    /// A stationary enemy, mostly useful for placing targets directly.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind: EnemyKind::Ground,
            speed_x: 0.0,
            angle: 0.0,
            va: 0.0,
            marked_for_deletion: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Distance moved along x per tick.
    pub speed: f64,
    pub marked_for_deletion: bool,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Visual effects ────────────────────────────────────────────────────────────

/// Short burst drawn where an enemy was destroyed.
#[derive(Clone, Debug)]
pub struct CollisionAnimation {
    /// Centre of the destroyed enemy.
    pub x: f64,
    pub y: f64,
    pub frame_x: u32,
    pub max_frame: u32,
    pub frame_timer: f64,
    pub frame_interval: f64,
    pub marked_for_deletion: bool,
}

impl CollisionAnimation {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            frame_x: 0,
            max_frame: 4,
            frame_timer: 0.0,
            frame_interval: 1000.0 / 15.0,
            marked_for_deletion: false,
        }
    }
}

/// Text that floats from where it spawned toward a target point.
#[derive(Clone, Debug)]
pub struct FloatingMessage {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// Ticks lived so far.
    pub timer: u32,
    pub marked_for_deletion: bool,
}

impl FloatingMessage {
    pub fn new(text: impl Into<String>, x: f64, y: f64, target_x: f64, target_y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            target_x,
            target_y,
            timer: 0,
            marked_for_deletion: false,
        }
    }
}

// ── Frame events ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillSource {
    /// Contact while rolling or diving.
    Attack,
    Bullet,
}

/// Something that happened during a tick, drained by the host every frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// Cue for the audio collaborator.
    AttackSound,
    EnemyKilled { x: f64, y: f64, by: KillSource },
    PlayerHit { lives_left: i32 },
    GameOver { score: i64 },
}

// ── Shared session context ────────────────────────────────────────────────────

/// Everything a tick reads or writes apart from the player itself.
#[derive(Clone, Debug)]
pub struct GameContext {
    pub config: GameConfig,
    pub width: f64,
    pub height: f64,
    pub ground_margin: f64,
    /// World scroll speed, `max_speed * multiplier` of the player's state.
    pub speed: f64,
    pub max_speed: f64,
    pub score: i64,
    pub lives: i32,
    pub game_over: bool,
    pub debug: bool,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub collisions: Vec<CollisionAnimation>,
    pub floating_messages: Vec<FloatingMessage>,
    pub events: Vec<FrameEvent>,
    /// Simulation clock, the sum of every `delta_ms` passed to `update`.
    pub clock_ms: f64,
    /// Time since the last enemy spawn.
    pub enemy_timer_ms: f64,
}
