/// Tunable game constants.
///
/// Every section has a `Default` matching the stock game, so a TOML file
/// only needs to name the values it overrides:
///
/// ```toml
/// [player]
/// jump_impulse = 30.0
///
/// [timing]
/// fire_cooldown_ms = 250.0
/// ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// Distance between the bottom of the world and the ground line.
    pub ground_margin: f64,
    /// World scroll speed at a state multiplier of 1.
    pub max_speed: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            ground_margin: 80.0,
            max_speed: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    /// Gravity added to `vy` every airborne tick.
    pub weight: f64,
    /// Horizontal speed while Left/Right is held.
    pub max_speed: f64,
    pub jump_impulse: f64,
    pub dive_impulse: f64,
    /// Sprite animation rate.
    pub fps: f64,
    pub starting_lives: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 70.0,
            height: 80.0,
            weight: 1.0,
            max_speed: 10.0,
            jump_impulse: 27.0,
            dive_impulse: 15.0,
            fps: 20.0,
            starting_lives: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub fire_cooldown_ms: f64,
    pub roll_duration_ms: f64,
    pub hit_duration_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fire_cooldown_ms: 500.0,
            roll_duration_ms: 600.0,
            hit_duration_ms: 500.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulletConfig {
    pub width: f64,
    pub height: f64,
    /// Distance travelled per tick, positive = forward (+x).
    pub speed: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 10.0,
            speed: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    pub spawn_interval_ms: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1000.0,
            width: 60.0,
            height: 44.0,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub timing: TimingConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.as_ref().display(), "loaded game config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        non_negative("world.ground_margin", self.world.ground_margin)?;
        non_negative("world.max_speed", self.world.max_speed)?;

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        non_negative("player.weight", self.player.weight)?;
        non_negative("player.max_speed", self.player.max_speed)?;
        non_negative("player.jump_impulse", self.player.jump_impulse)?;
        non_negative("player.dive_impulse", self.player.dive_impulse)?;
        positive("player.fps", self.player.fps)?;
        if self.player.starting_lives <= 0 {
            return Err(invalid("player.starting_lives", "must be at least 1"));
        }

        non_negative("timing.fire_cooldown_ms", self.timing.fire_cooldown_ms)?;
        positive("timing.roll_duration_ms", self.timing.roll_duration_ms)?;
        positive("timing.hit_duration_ms", self.timing.hit_duration_ms)?;

        positive("bullet.width", self.bullet.width)?;
        positive("bullet.height", self.bullet.height)?;

        positive("enemy.spawn_interval_ms", self.enemy.spawn_interval_ms)?;
        positive("enemy.width", self.enemy.width)?;
        positive("enemy.height", self.enemy.height)?;

        if self.player.width > self.world.width {
            return Err(invalid("player.width", "wider than the world"));
        }
        if self.player.height + self.world.ground_margin > self.world.height {
            return Err(invalid(
                "player.height",
                "player does not fit between the ground line and the top of the world",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a non-negative number, got {value}")))
    }
}
