//! Rendering seam
//!
//! The game hands a [`FrameSnapshot`] to a [`Renderer`] once per frame. A real
//! backend draws textures and text; [`LogRenderer`] is the headless one.

pub mod palette;
pub mod snapshot;

pub use palette::{BrickLook, Color, Palette, TextureId, colors};
pub use snapshot::{FrameSnapshot, HudLine, Sprite};

use crate::sim::GamePhase;

/// Draws one frame. Nothing flows back to the simulation.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Headless renderer that logs frames instead of drawing them
#[derive(Debug, Clone)]
pub struct LogRenderer {
    /// Log a summary every this many frames (0 = never)
    pub summary_every: u64,
    frames: u64,
    last_phase: Option<GamePhase>,
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(120)
    }
}

impl LogRenderer {
    pub fn new(summary_every: u64) -> Self {
        Self {
            summary_every,
            frames: 0,
            last_phase: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;

        if self.last_phase != Some(frame.phase) {
            log::info!("Phase: {:?} (tick {})", frame.phase, frame.tick);
            self.last_phase = Some(frame.phase);
        }

        if self.summary_every > 0 && self.frames % self.summary_every == 0 {
            log::debug!(
                "frame {}: lives={} bricks_visible={} ball=({:.0}, {:.0}) paddle_x={:.0}",
                self.frames,
                frame.lives,
                frame.bricks.len(),
                frame.ball.origin.x,
                frame.ball.origin.y,
                frame.paddle.origin.x,
            );
        }
        for line in &frame.hud {
            log::trace!("hud: {}", line.text);
        }
    }
}
