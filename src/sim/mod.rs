//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable row-major brick iteration
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Probe, detect_face, within_reveal};
pub use level::{BrickKind, DUNGEON, Level, LevelError};
pub use state::{
    Ball, Brick, BrickGrid, ClearRule, Face, GameEvent, GamePhase, GameState, Outcome, Paddle,
    Rules,
};
pub use tick::{TickInput, tick};
