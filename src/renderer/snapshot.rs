//! Immutable per-frame view handed to renderers

use glam::Vec2;
use serde::Serialize;

use super::palette::{Color, Palette, TextureId, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, GameState};

pub const TITLE: &str = "RogueOut!";
pub const INSTRUCTIONS: &str = "ARROW KEYS left/right to move, SPACE to launch spell ball!";
pub const PAUSED: &str = "GAME PAUSED";
pub const PLAY_AGAIN: &str = "PRESS [ENTER] TO PLAY AGAIN";

/// A textured quad, drawn from its top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub origin: Vec2,
    pub texture: TextureId,
    pub color: Color,
}

/// A line of HUD text, centered horizontally on `center_x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudLine {
    pub text: &'static str,
    pub center_x: f32,
    pub y: f32,
    pub font_size: u16,
    pub color: Color,
}

/// Lives indicator bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeBar {
    pub origin: Vec2,
    pub size: Vec2,
    pub color: Color,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub paused: bool,
    pub lives: u8,
    /// Visible bricks, row-major
    pub bricks: Vec<Sprite>,
    pub ball: Sprite,
    pub ball_radius: f32,
    pub paddle: Sprite,
    pub paddle_size: Vec2,
    pub life_bars: Vec<LifeBar>,
    pub hud: Vec<HudLine>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, palette: &Palette) -> Self {
        let cell = state.grid.cell;
        let bricks = state
            .grid
            .bricks
            .iter()
            .enumerate()
            .filter(|(_, brick)| brick.visible)
            .filter_map(|(index, brick)| {
                let look = palette.brick(index)?;
                Some(Sprite {
                    origin: Vec2::new(brick.pos.x - cell.x / 2.0, brick.pos.y - cell.y * 7.0 / 8.0),
                    texture: look.texture,
                    color: look.color,
                })
            })
            .collect();

        let ball = &state.ball;
        let paddle = &state.paddle;

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            paused: state.is_paused(),
            lives: paddle.lives,
            bricks,
            ball: Sprite {
                origin: ball.pos - Vec2::splat(ball.radius / 2.0),
                texture: TextureId::Ball,
                color: colors::WHITE,
            },
            ball_radius: ball.radius,
            paddle: Sprite {
                origin: paddle.pos - paddle.half_size(),
                texture: TextureId::Player,
                color: colors::WHITE,
            },
            paddle_size: paddle.size,
            life_bars: life_bars(paddle.lives),
            hud: hud_lines(state),
        }
    }
}

fn life_bars(lives: u8) -> Vec<LifeBar> {
    (0..lives)
        .map(|i| LifeBar {
            origin: Vec2::new(20.0 + 40.0 * i as f32, SCREEN_HEIGHT - 30.0),
            size: Vec2::new(35.0, 10.0),
            color: colors::LIGHT_GRAY,
        })
        .collect()
}

fn hud_lines(state: &GameState) -> Vec<HudLine> {
    let center_x = SCREEN_WIDTH / 2.0;
    let line = |text, y, font_size, color| HudLine {
        text,
        center_x,
        y,
        font_size,
        color,
    };

    if state.phase == GamePhase::GameOver {
        return vec![line(PLAY_AGAIN, SCREEN_HEIGHT / 2.0 - 50.0, 20, colors::GRAY)];
    }

    let mut lines = Vec::new();
    if !state.ball.active {
        let title_y = SCREEN_HEIGHT * 3.0 / 16.0 - 50.0;
        let help_y = SCREEN_HEIGHT * 5.0 / 16.0 - 50.0;
        let shadow = SCREEN_HEIGHT * 0.05 / 16.0;
        lines.push(line(TITLE, title_y + shadow, 50, colors::BLACK));
        lines.push(line(INSTRUCTIONS, help_y + shadow, 50, colors::BLACK));
        lines.push(line(TITLE, title_y, 50, colors::WHITE));
        lines.push(line(INSTRUCTIONS, help_y, 50, colors::GREEN));
    }
    if state.is_paused() {
        lines.push(line(PAUSED, SCREEN_HEIGHT / 2.0 - 40.0, 40, colors::GRAY));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, TickInput, tick};

    fn texts(frame: &FrameSnapshot) -> Vec<&'static str> {
        frame.hud.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_fresh_session_shows_terrain_and_title() {
        let state = GameState::new(1);
        let palette = Palette::new(&state.grid);
        let frame = FrameSnapshot::capture(&state, &palette);

        let terrain = state.grid.bricks.iter().filter(|b| b.kind.is_terrain()).count();
        assert_eq!(frame.bricks.len(), terrain);
        assert_eq!(frame.lives, 5);
        assert_eq!(frame.life_bars.len(), 5);
        assert_eq!(texts(&frame), vec![TITLE, INSTRUCTIONS, TITLE, INSTRUCTIONS]);
        assert_eq!(frame.paddle.origin, Vec2::new(864.0, 1010.0));
        // Top-left brick drawn from its cell corner
        assert_eq!(frame.bricks[0].origin, Vec2::new(0.0, -2.5));
    }

    #[test]
    fn test_hud_tracks_phase() {
        let mut state = GameState::new(1);
        let mut palette = Palette::new(&state.grid);

        tick(
            &mut state,
            &TickInput {
                launch: true,
                ..Default::default()
            },
        );
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        palette.apply(&state.events, &state.grid);
        let frame = FrameSnapshot::capture(&state, &palette);
        assert!(frame.paused);
        assert_eq!(texts(&frame), vec![PAUSED]);

        state.phase = GamePhase::GameOver;
        let frame = FrameSnapshot::capture(&state, &palette);
        assert_eq!(texts(&frame), vec![PLAY_AGAIN]);
    }

    #[test]
    fn test_rubble_drawn_dimmed() {
        let mut state = GameState::new(1);
        let mut palette = Palette::new(&state.grid);
        let index = 20;
        state.grid.bricks[index].visible = true;
        state.grid.bricks[index].collidable = false;
        palette.apply(&[GameEvent::BrickShattered { index }], &state.grid);

        let frame = FrameSnapshot::capture(&state, &palette);
        let sprite = frame
            .bricks
            .iter()
            .find(|s| s.texture == TextureId::Wall)
            .unwrap();
        assert_eq!(sprite.color, colors::DIMMED);
    }
}
