//! Runtime core of a 2D side-scrolling action game: player state machine,
//! body physics, projectiles and AABB collision resolution against enemies.
//!
//! A host owns a `Player` and a `GameContext`, feeds key presses into an
//! `InputBuffer`, and once per frame calls `compute::update` with a snapshot
//! of the held tokens and the elapsed time.

pub mod collision;
pub mod compute;
pub mod config;
pub mod effects;
pub mod enemies;
pub mod entities;
pub mod error;
pub mod input;
pub mod physics;
pub mod projectiles;
pub mod state;
