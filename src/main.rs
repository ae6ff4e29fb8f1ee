//! RogueOut entry point
//!
//! Runs the headless demo: the autopilot plays the dungeon while the log
//! renderer reports frames. Pass a settings JSON path as the first argument.

use std::path::PathBuf;

use rogue_out::Settings;
use rogue_out::app::{Session, run};
use rogue_out::audio::SilentAudio;
use rogue_out::input::Autopilot;
use rogue_out::renderer::LogRenderer;
use rogue_out::sim::{GameState, Level};

fn main() {
    env_logger::init();
    log::info!("RogueOut (headless) starting...");

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings::default(),
    };

    let seed = settings.resolve_seed();
    log::info!("Game initialized with seed: {}", seed);

    let state = GameState::with_level(seed, settings.rules, Level::dungeon());
    let mut session = Session::new(state);
    let mut input = Autopilot::new(settings.demo_frames, settings.autopilot_restarts);
    let mut renderer = LogRenderer::new(settings.summary_every);
    let mut audio = SilentAudio::new(settings.mixer());

    let summary = run(&mut session, &mut input, &mut renderer, &mut audio);

    // Release audio before the renderer
    drop(audio);
    drop(renderer);

    println!(
        "{} frames, {} lives lost, {} restarts, outcomes: {:?}",
        summary.frames, summary.lives_lost, summary.restarts, summary.outcomes
    );
}
