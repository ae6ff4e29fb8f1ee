//! Input sampling
//!
//! The frame loop asks an [`InputSource`] for one [`TickInput`] per frame.
//! Device backends implement [`ActionQuery`] and get wrapped in
//! [`PolledInput`]; the crate also ships a scripted source for tests and an
//! autopilot for the headless demo.

use std::collections::VecDeque;

use crate::sim::{GamePhase, GameState, TickInput};

/// Logical actions a device maps keys onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Launch,
    Pause,
    Restart,
    Quit,
}

impl Action {
    /// Default key binding, for help text
    pub fn key_name(&self) -> &'static str {
        match self {
            Action::MoveLeft => "LEFT",
            Action::MoveRight => "RIGHT",
            Action::Launch => "SPACE",
            Action::Pause => "P",
            Action::Restart => "ENTER",
            Action::Quit => "ESC",
        }
    }
}

/// Device state queries, polled once per frame
pub trait ActionQuery {
    /// Held this frame
    fn is_down(&self, action: Action) -> bool;
    /// Went down this frame
    fn is_pressed(&self, action: Action) -> bool;
}

/// Produces the input for the next frame
pub trait InputSource {
    fn sample(&mut self, state: &GameState) -> TickInput;
}

/// Adapts an [`ActionQuery`] device into an [`InputSource`]
pub struct PolledInput<Q> {
    pub device: Q,
}

impl<Q: ActionQuery> PolledInput<Q> {
    pub fn new(device: Q) -> Self {
        Self { device }
    }
}

impl<Q: ActionQuery> InputSource for PolledInput<Q> {
    fn sample(&mut self, _state: &GameState) -> TickInput {
        let d = &self.device;
        TickInput {
            move_left: d.is_down(Action::MoveLeft),
            move_right: d.is_down(Action::MoveRight),
            launch: d.is_pressed(Action::Launch),
            pause: d.is_pressed(Action::Pause),
            restart: d.is_pressed(Action::Restart),
            quit: d.is_down(Action::Quit),
        }
    }
}

/// Replays a fixed list of inputs, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, _state: &GameState) -> TickInput {
        self.frames.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}

/// Plays the game by chasing the ball with the paddle
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frames to play before quitting
    pub frame_budget: u64,
    /// Restarts left after game over
    pub restarts_left: u32,
    frames: u64,
}

/// Frames of ball travel the autopilot looks ahead
const MAX_LEAD_FRAMES: f32 = 60.0;

impl Autopilot {
    pub fn new(frame_budget: u64, restarts: u32) -> Self {
        Self {
            frame_budget,
            restarts_left: restarts,
            frames: 0,
        }
    }

    /// Where the paddle center should be
    fn target_x(state: &GameState) -> f32 {
        let ball = &state.ball;
        let paddle = &state.paddle;

        // Predict where the ball will cross the paddle line
        let lead = if ball.vel.y > 0.0 {
            ((paddle.pos.y - ball.pos.y) / ball.vel.y).clamp(0.0, MAX_LEAD_FRAMES)
        } else {
            0.0
        };

        // Oscillating offset so the rebound angle varies
        let t = state.time_ticks as f32 * 0.01;
        let offset = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * paddle.size.x / 2.0;

        ball.pos.x + ball.vel.x * lead + offset
    }
}

impl InputSource for Autopilot {
    fn sample(&mut self, state: &GameState) -> TickInput {
        self.frames += 1;
        let mut input = TickInput::default();

        if self.frames > self.frame_budget {
            input.quit = true;
            return input;
        }

        match state.phase {
            GamePhase::GameOver => {
                if self.restarts_left > 0 {
                    self.restarts_left -= 1;
                    input.restart = true;
                } else {
                    input.quit = true;
                }
            }
            GamePhase::Paused => input.pause = true,
            GamePhase::Playing => {
                if !state.ball.active {
                    input.launch = true;
                }
                let dx = Self::target_x(state) - state.paddle.pos.x;
                input.move_left = dx < -state.paddle.speed;
                input.move_right = dx > state.paddle.speed;
            }
        }

        input
    }
}
