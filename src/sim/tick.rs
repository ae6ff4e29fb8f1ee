//! Per-frame simulation tick
//!
//! One call advances the session by exactly one frame: paddle, launch, ball
//! motion, collision resolution, reveal, then phase bookkeeping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    Probe, ball_edge_contact, circle_rect_overlap, detect_face, paddle_deflection, within_reveal,
};
use super::state::{Brick, Face, GameEvent, GamePhase, GameState, Outcome};
use crate::consts::PADDLE_DEFLECTION;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move left held
    pub move_left: bool,
    /// Move right held
    pub move_right: bool,
    /// Launch pressed this frame
    pub launch: bool,
    /// Pause toggle pressed this frame
    pub pause: bool,
    /// Restart pressed this frame (only honoured after game over)
    pub restart: bool,
    /// Quit requested; read by the frame loop, ignored by the simulation
    pub quit: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
            state.events.push(GameEvent::Restarted);
        }
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    move_paddle(state, input);
    move_ball(state, input);

    resolve_edges(state);
    resolve_paddle(state);
    resolve_bricks(state);
    reveal_bricks(state);

    update_phase(state);
}

fn move_paddle(state: &mut GameState, input: &TickInput) {
    let paddle = &mut state.paddle;
    if input.move_left {
        paddle.pos.x -= paddle.speed;
    }
    paddle.clamp_to_screen();
    if input.move_right {
        paddle.pos.x += paddle.speed;
    }
    paddle.clamp_to_screen();
}

fn move_ball(state: &mut GameState, input: &TickInput) {
    let ball = &mut state.ball;

    if !ball.active && input.launch {
        ball.launch(&mut state.rng);
        log::debug!("Ball launched with velocity {:?}", ball.vel);
        state.events.push(GameEvent::Launched);
    }

    if ball.active {
        ball.pos += ball.vel;
    } else {
        ball.rest_on(&state.paddle);
    }
}

/// Reflect off the side and top edges; lose a life at the bottom
fn resolve_edges(state: &mut GameState) {
    let ball = &mut state.ball;
    let contact = ball_edge_contact(ball.pos, ball.radius);

    if contact.side {
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }
    if contact.top {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }
    if contact.bottom {
        ball.reset();
        state.paddle.lives = state.paddle.lives.saturating_sub(1);
        log::info!("Ball lost, {} lives left", state.paddle.lives);
        state.events.push(GameEvent::LifeLost {
            lives: state.paddle.lives,
        });
    }
}

fn resolve_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    let paddle = &state.paddle;

    if circle_rect_overlap(ball.pos, ball.radius, paddle.pos, paddle.half_size())
        && ball.vel.y > 0.0
    {
        ball.vel.y = -ball.vel.y;
        ball.vel.x = paddle_deflection(ball.pos.x, paddle.pos.x, paddle.size.x, PADDLE_DEFLECTION);
        state.events.push(GameEvent::PaddleBounce);
    }
}

fn resolve_bricks(state: &mut GameState) {
    let cell = state.grid.cell;

    for (index, brick) in state.grid.bricks.iter_mut().enumerate() {
        if !brick.is_standing() {
            continue;
        }

        let probe = Probe::new(&state.ball, brick, cell);
        if let Some(face) = detect_face(&probe) {
            let event = damage_brick(brick, index, face);
            state.ball.vel = reflect(state.ball.vel, face);
            state.events.push(event);
        }
    }
}

/// Apply one hit to a brick
///
/// A right-face hit knocks the brick out of the grid whatever its hit points;
/// the other faces leave spent bricks in place as rubble.
fn damage_brick(brick: &mut Brick, index: usize, face: Face) -> GameEvent {
    brick.hp = brick.hp.saturating_sub(1);

    if face == Face::Right {
        brick.collidable = false;
        brick.active = false;
        return GameEvent::BrickShattered { index };
    }

    if brick.hp == 0 {
        brick.collidable = false;
        GameEvent::BrickCrumbled { index, face }
    } else {
        GameEvent::BrickHit {
            index,
            face,
            hp: brick.hp,
        }
    }
}

/// Flip the velocity axis perpendicular to the struck face
fn reflect(vel: Vec2, face: Face) -> Vec2 {
    match face {
        Face::Below | Face::Above => Vec2::new(vel.x, -vel.y),
        Face::Left | Face::Right => Vec2::new(-vel.x, vel.y),
    }
}

/// Reveal active bricks near the ball. Visibility never resets.
fn reveal_bricks(state: &mut GameState) {
    let cell = state.grid.cell;
    let ball = &state.ball;

    for brick in state.grid.bricks.iter_mut().filter(|b| b.active && !b.visible) {
        if within_reveal(ball.pos, ball.reveal_radius, brick.pos, cell) {
            brick.visible = true;
        }
    }
}

fn update_phase(state: &mut GameState) {
    let outcome = if state.paddle.lives == 0 {
        Outcome::Defeat
    } else if state.grid.is_cleared(state.rules.clear_rule) {
        Outcome::Cleared
    } else {
        return;
    };

    state.phase = GamePhase::GameOver;
    log::info!("Game over: {:?} after {} ticks", outcome, state.time_ticks);
    state.events.push(GameEvent::GameOver(outcome));
}
