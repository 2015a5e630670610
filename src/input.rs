/// Held-key tracking.
///
/// Device events arrive whenever they like; the game loop applies them to an
/// `InputBuffer` between ticks and hands each tick an immutable
/// `InputSnapshot`, so a tick never sees the set change under it.

use crate::entities::GameContext;

/// Key that fires a projectile.
pub const FIRE_KEY: char = 'r';
/// Key that flips `GameContext::debug`.
pub const DEBUG_KEY: char = 'd';

/// A physical key as reported by the device layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Char(char),
}

/// A gameplay command the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Confirm,
}

impl Token {
    pub const ALL: [Token; 6] = [
        Token::Up,
        Token::Down,
        Token::Left,
        Token::Right,
        Token::Fire,
        Token::Confirm,
    ];

    /// Map a key to its token; `None` for keys with no gameplay meaning.
    pub fn from_key(key: Key) -> Option<Token> {
        match key {
            Key::ArrowUp => Some(Token::Up),
            Key::ArrowDown => Some(Token::Down),
            Key::ArrowLeft => Some(Token::Left),
            Key::ArrowRight => Some(Token::Right),
            Key::Enter => Some(Token::Confirm),
            Key::Char(FIRE_KEY) => Some(Token::Fire),
            Key::Char(_) => None,
        }
    }
}

// ── Buffer ────────────────────────────────────────────────────────────────────

/// Currently held tokens in the order they were pressed.
#[derive(Clone, Debug, Default)]
pub struct InputBuffer {
    keys: Vec<Token>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Repeated presses of a held key are ignored; the
    /// debug key toggles `ctx.debug` instead of being recorded.
    pub fn key_down(&mut self, key: Key, ctx: &mut GameContext) {
        if let Some(token) = Token::from_key(key) {
            if !self.keys.contains(&token) {
                self.keys.push(token);
            }
        } else if key == Key::Char(DEBUG_KEY) {
            ctx.debug = !ctx.debug;
            tracing::debug!(debug = ctx.debug, "toggled debug overlay");
        }
    }

    /// Record a key release. Releasing a key that is not held is a no-op.
    pub fn key_up(&mut self, key: Key) {
        if let Some(token) = Token::from_key(key) {
            self.keys.retain(|held| *held != token);
        }
    }

    pub fn active_tokens(&self) -> &[Token] {
        &self.keys
    }

    pub fn is_held(&self, token: Token) -> bool {
        self.keys.contains(&token)
    }

    /// Forget every held key, e.g. after the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            tokens: self.keys.clone(),
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// The tokens held for the duration of one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    tokens: Vec<Token>,
}

impl InputSnapshot {
    /// Build a snapshot directly, dropping duplicate tokens.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut unique = Vec::new();
        for token in tokens {
            if !unique.contains(&token) {
                unique.push(token);
            }
        }
        Self { tokens: unique }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn held(&self, token: Token) -> bool {
        self.tokens.contains(&token)
    }

    /// Left or Right is held.
    pub fn horizontal(&self) -> bool {
        self.held(Token::Left) || self.held(Token::Right)
    }
}
