//! RogueOut - a fog-of-war dungeon Breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, brick grid, game phase)
//! - `renderer`: Frame snapshots, presentation side table, headless renderer
//! - `input`: Per-frame input sampling (scripted and autopilot sources)
//! - `audio`: Sound effect mapping and the audio sink seam
//! - `settings`: JSON-backed configuration
//! - `app`: The frame loop tying collaborators together

pub mod app;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Brick grid dimensions
    pub const BRICK_ROWS: usize = 18;
    pub const BRICK_COLS: usize = 32;
    /// Vertical offset of the first brick row
    pub const BRICK_TOP_OFFSET: f32 = 50.0;

    /// Paddle defaults
    pub const PLAYER_MAX_LIVES: u8 = 5;
    pub const PADDLE_SPEED: f32 = 5.0; // pixels per frame
    pub const PADDLE_WIDTH: f32 = SCREEN_WIDTH / 10.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_Y: f32 = SCREEN_HEIGHT * 17.0 / 18.0;
    /// Horizontal deflection at the paddle edge
    pub const PADDLE_DEFLECTION: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    /// Reveal radius = ball radius * this
    pub const REVEAL_MULTIPLIER: f32 = 12.0;
    /// Distance between paddle center and a resting ball's center
    pub const BALL_REST_HEIGHT: f32 = 38.0;
    pub const LAUNCH_SPEED_Y: f32 = -5.0;
    /// Inclusive bound of the random horizontal launch speed
    pub const LAUNCH_SPREAD: i32 = 2;

    /// Size of one grid cell
    pub const CELL_SIZE: Vec2 = Vec2::new(
        SCREEN_WIDTH / BRICK_COLS as f32,
        SCREEN_HEIGHT / BRICK_ROWS as f32,
    );
}
