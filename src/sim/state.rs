//! Game state and core simulation types
//!
//! Everything one session owns lives in [`GameState`]. Presentation data
//! (textures, tints) is kept out of here; see `renderer::Palette`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{BrickKind, Level};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (ball may still be resting on the paddle)
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; waiting for restart
    GameOver,
}

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Lives ran out
    Defeat,
    /// The clear rule was satisfied
    Cleared,
}

/// When the brick grid counts as cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClearRule {
    /// No brick remains active (terrain included)
    #[default]
    NoActiveBricks,
    /// No brick remains both active and collidable
    NoStandingBricks,
}

/// Brick face struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Below,
    Above,
    Left,
    Right,
}

/// Things that happened during a tick, for presentation and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    WallBounce,
    PaddleBounce,
    /// A brick absorbed a hit and still stands
    BrickHit { index: usize, face: Face, hp: u8 },
    /// A brick's hit points ran out; it stays behind as rubble
    BrickCrumbled { index: usize, face: Face },
    /// A brick struck on its right face was knocked out of the grid
    BrickShattered { index: usize },
    LifeLost { lives: u8 },
    Paused,
    Resumed,
    GameOver(Outcome),
    Restarted,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame
    pub speed: f32,
    pub lives: u8,
}

impl Paddle {
    pub fn new(rules: &Rules) -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, PADDLE_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed: rules.paddle_speed,
            lives: rules.max_lives,
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Keep the paddle fully on screen
    pub fn clamp_to_screen(&mut self) {
        let half_w = self.size.x / 2.0;
        if self.pos.x - half_w <= 0.0 {
            self.pos.x = half_w;
        }
        if self.pos.x + half_w >= SCREEN_WIDTH {
            self.pos.x = SCREEN_WIDTH - half_w;
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Bricks within this per-axis distance get revealed
    pub reveal_radius: f32,
    /// False while resting on the paddle
    pub active: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, PADDLE_Y - BALL_REST_HEIGHT),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            reveal_radius: BALL_RADIUS * REVEAL_MULTIPLIER,
            active: false,
        }
    }
}

impl Ball {
    /// Follow the paddle while resting
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.pos.x, paddle.pos.y - BALL_REST_HEIGHT);
    }

    /// Launch with a mostly vertical velocity and a small random bias
    pub fn launch(&mut self, rng: &mut Pcg32) {
        let bias = rng.random_range(-LAUNCH_SPREAD..=LAUNCH_SPREAD);
        self.vel = Vec2::new(bias as f32, LAUNCH_SPEED_Y);
        self.active = true;
    }

    /// Drop back onto the paddle after leaving the screen
    pub fn reset(&mut self) {
        self.vel = Vec2::ZERO;
        self.active = false;
    }
}

/// A brick cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Column center x; row y = row * cell height + top offset
    pub pos: Vec2,
    pub kind: BrickKind,
    pub hp: u8,
    /// False once knocked out of the grid
    pub active: bool,
    /// Whether it can absorb a hit
    pub collidable: bool,
    pub visible: bool,
}

impl Brick {
    pub fn new(kind: BrickKind, pos: Vec2) -> Self {
        let terrain = kind.is_terrain();
        Self {
            pos,
            kind,
            hp: kind.hit_points(),
            active: true,
            collidable: !terrain,
            visible: terrain,
        }
    }

    /// Whether the ball can currently hit this brick
    pub fn is_standing(&self) -> bool {
        self.active && self.collidable
    }

    /// Destroyed structure left in place
    pub fn is_rubble(&self) -> bool {
        !self.kind.is_terrain() && !self.collidable
    }
}

/// Fixed brick grid, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    pub bricks: Vec<Brick>,
    /// Size of one cell
    pub cell: Vec2,
}

impl BrickGrid {
    pub fn from_level(level: &Level) -> Self {
        let cell = CELL_SIZE;
        let bricks = level
            .cells()
            .map(|(row, col, kind)| {
                let pos = Vec2::new(
                    col as f32 * cell.x + cell.x / 2.0,
                    row as f32 * cell.y + BRICK_TOP_OFFSET,
                );
                Brick::new(kind, pos)
            })
            .collect();
        Self { bricks, cell }
    }

    pub fn index(row: usize, col: usize) -> usize {
        row * BRICK_COLS + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= BRICK_ROWS || col >= BRICK_COLS {
            return None;
        }
        self.bricks.get(Self::index(row, col))
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    pub fn standing_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_standing()).count()
    }

    /// Whether the grid satisfies the clear rule
    pub fn is_cleared(&self, rule: ClearRule) -> bool {
        match rule {
            ClearRule::NoActiveBricks => self.active_count() == 0,
            ClearRule::NoStandingBricks => self.standing_count() == 0,
        }
    }
}

/// Session rules that survive a restart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub max_lives: u8,
    pub paddle_speed: f32,
    pub clear_rule: ClearRule,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_lives: PLAYER_MAX_LIVES,
            paddle_speed: PADDLE_SPEED,
            clear_rule: ClearRule::NoActiveBricks,
        }
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub rules: Rules,
    /// Layout rebuilt on restart
    pub level: Level,
    /// Simulation frame counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub grid: BrickGrid,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, default rules and the dungeon map
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, Rules::default(), Level::dungeon())
    }

    pub fn with_level(seed: u64, rules: Rules, level: Level) -> Self {
        let paddle = Paddle::new(&rules);
        let mut ball = Ball::default();
        ball.rest_on(&paddle);
        let grid = BrickGrid::from_level(&level);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            level,
            time_ticks: 0,
            phase: GamePhase::Playing,
            paddle,
            ball,
            grid,
            events: Vec::new(),
        }
    }

    /// Rebuild paddle, ball and grid to session-start values
    pub fn restart(&mut self) {
        self.paddle = Paddle::new(&self.rules);
        self.ball = Ball::default();
        self.ball.rest_on(&self.paddle);
        self.grid = BrickGrid::from_level(&self.level);
        self.phase = GamePhase::Playing;
        log::info!("Session restarted (seed {})", self.seed);
    }

    /// How the run ended, if it has
    pub fn outcome(&self) -> Option<Outcome> {
        if self.phase != GamePhase::GameOver {
            return None;
        }
        if self.paddle.lives == 0 {
            Some(Outcome::Defeat)
        } else {
            Some(Outcome::Cleared)
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Serialize for debugging dumps
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.paddle.lives, PLAYER_MAX_LIVES);
        assert_eq!(state.paddle.pos, Vec2::new(960.0, 1020.0));
        assert_eq!(state.paddle.size, Vec2::new(192.0, 20.0));
        assert!(!state.ball.active);
        assert_eq!(state.ball.reveal_radius, 192.0);
        assert_eq!(state.ball.pos, Vec2::new(960.0, 982.0));
        assert_eq!(state.grid.bricks.len(), BRICK_ROWS * BRICK_COLS);
        assert_eq!(state.grid.cell, Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_brick_positions_follow_cell_grid() {
        let state = GameState::new(7);
        let first = state.grid.get(0, 0).unwrap();
        assert_eq!(first.pos, Vec2::new(30.0, 50.0));
        let b = state.grid.get(17, 31).unwrap();
        assert_eq!(b.pos, Vec2::new(31.0 * 60.0 + 30.0, 17.0 * 60.0 + 50.0));
        assert!(state.grid.get(17, 32).is_none());
    }

    #[test]
    fn test_brick_flags_by_kind() {
        let ground = Brick::new(BrickKind::Ground, Vec2::ZERO);
        assert!(ground.active && !ground.collidable && ground.visible);
        assert_eq!(ground.hp, 0);

        let wall = Brick::new(BrickKind::Wall, Vec2::ZERO);
        assert!(wall.active && wall.collidable && !wall.visible);
        assert_eq!(wall.hp, 3);
        assert!(wall.is_standing());
        assert!(!wall.is_rubble());
    }

    #[test]
    fn test_clear_rules() {
        let level = Level::filled(BrickKind::Wall);
        let mut grid = BrickGrid::from_level(&level);
        assert!(!grid.is_cleared(ClearRule::NoActiveBricks));
        assert!(!grid.is_cleared(ClearRule::NoStandingBricks));

        for brick in &mut grid.bricks {
            brick.collidable = false;
        }
        assert!(!grid.is_cleared(ClearRule::NoActiveBricks));
        assert!(grid.is_cleared(ClearRule::NoStandingBricks));

        for brick in &mut grid.bricks {
            brick.active = false;
        }
        assert!(grid.is_cleared(ClearRule::NoActiveBricks));
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::new(&Rules::default());
        paddle.pos.x = -50.0;
        paddle.clamp_to_screen();
        assert_eq!(paddle.pos.x, 96.0);
        paddle.pos.x = 5000.0;
        paddle.clamp_to_screen();
        assert_eq!(paddle.pos.x, SCREEN_WIDTH - 96.0);
    }

    #[test]
    fn test_outcome() {
        let mut state = GameState::new(1);
        assert_eq!(state.outcome(), None);
        state.phase = GamePhase::GameOver;
        assert_eq!(state.outcome(), Some(Outcome::Cleared));
        state.paddle.lives = 0;
        assert_eq!(state.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(3);
        let json = state.to_json().unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 3);
        assert_eq!(back.grid.bricks.len(), state.grid.bricks.len());
    }

    #[test]
    fn test_truncated_state_is_safe() {
        let mut state = GameState::new(3);
        state.grid.bricks.truncate(10);
        let json = state.to_json().unwrap();

        // A short grid loads but lookups past it come back empty
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert!(back.grid.get(0, 9).is_some());
        assert!(back.grid.get(0, 10).is_none());

        // A short level is rejected
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["level"]["kinds"] = serde_json::json!(["Wall"]);
        assert!(serde_json::from_value::<GameState>(value).is_err());
    }
}
