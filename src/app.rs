//! Frame loop
//!
//! One iteration: stream audio, sample input, tick the simulation, fan the
//! tick's events out to the palette and audio, then render a snapshot.
//! The loop ends when the input source asks to quit.

use crate::audio::{AudioSink, SoundEffect};
use crate::input::InputSource;
use crate::renderer::{FrameSnapshot, Palette, Renderer};
use crate::sim::{GameEvent, GameState, Outcome, TickInput, tick};

/// Simulation state plus its presentation side table
pub struct Session {
    pub state: GameState,
    pub palette: Palette,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        let palette = Palette::new(&state.grid);
        Self { state, palette }
    }

    /// Advance one frame and update presentation state
    pub fn step(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input);
        self.palette.apply(&self.state.events, &self.state.grid);
        &self.state.events
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, &self.palette)
    }
}

/// What happened over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub restarts: u32,
    pub lives_lost: u32,
    /// Every game that ended, in order
    pub outcomes: Vec<Outcome>,
}

/// Run one frame. Returns false when the input source asked to quit.
pub fn run_frame(
    session: &mut Session,
    input: &mut dyn InputSource,
    renderer: &mut dyn Renderer,
    audio: &mut dyn AudioSink,
    summary: &mut RunSummary,
) -> bool {
    audio.update_stream();

    let input = input.sample(&session.state);
    if input.quit {
        return false;
    }

    for event in session.step(&input) {
        if let Some(effect) = SoundEffect::for_event(event) {
            audio.play(effect);
        }
        match event {
            GameEvent::Paused => audio.set_music_paused(true),
            GameEvent::Resumed => audio.set_music_paused(false),
            GameEvent::Restarted => summary.restarts += 1,
            GameEvent::LifeLost { .. } => summary.lives_lost += 1,
            GameEvent::GameOver(outcome) => summary.outcomes.push(*outcome),
            _ => {}
        }
    }

    renderer.draw(&session.snapshot());
    summary.frames += 1;
    true
}

/// Run until the input source asks to quit
pub fn run(
    session: &mut Session,
    input: &mut dyn InputSource,
    renderer: &mut dyn Renderer,
    audio: &mut dyn AudioSink,
) -> RunSummary {
    let mut summary = RunSummary::default();
    log::info!("Running session with seed {}", session.state.seed);

    while run_frame(session, input, renderer, audio, &mut summary) {}

    log::info!(
        "Quit after {} frames ({} restarts, {} lives lost)",
        summary.frames,
        summary.restarts,
        summary.lives_lost
    );
    summary
}
