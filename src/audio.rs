//! Audio seam
//!
//! Background music is streamed by the backend and advanced once per frame;
//! sound effects are picked from game events. No backend ships with the
//! crate, so [`SilentAudio`] stands in.

use std::collections::VecDeque;

use crate::sim::{GameEvent, Outcome};

/// Background music track
pub const MUSIC_TRACK: &str = "keepitsimple.mp3";

/// How many recent effects [`SilentAudio`] remembers
pub const RECENT_EFFECTS: usize = 32;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball launched from the paddle
    Launch,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a screen edge
    WallHit,
    /// Brick absorbs a hit
    BrickHit,
    /// Brick reduced to rubble
    BrickCrumble,
    /// Brick knocked out from the side
    BrickShatter,
    /// Ball fell off the bottom
    LifeLost,
    /// Dungeon cleared
    Victory,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// Effect for a game event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Launched => Some(SoundEffect::Launch),
            GameEvent::WallBounce => Some(SoundEffect::WallHit),
            GameEvent::PaddleBounce => Some(SoundEffect::PaddleHit),
            GameEvent::BrickHit { .. } => Some(SoundEffect::BrickHit),
            GameEvent::BrickCrumbled { .. } => Some(SoundEffect::BrickCrumble),
            GameEvent::BrickShattered { .. } => Some(SoundEffect::BrickShatter),
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::GameOver(Outcome::Cleared) => Some(SoundEffect::Victory),
            GameEvent::GameOver(Outcome::Defeat) => Some(SoundEffect::GameOver),
            GameEvent::Paused | GameEvent::Resumed | GameEvent::Restarted => None,
        }
    }
}

/// Audio backend
pub trait AudioSink {
    /// Feed the music stream; called once per frame
    fn update_stream(&mut self);
    /// Fire a sound effect
    fn play(&mut self, effect: SoundEffect);
    /// Music stops while paused
    fn set_music_paused(&mut self, paused: bool);
}

/// Volume settings shared by audio backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Mixer {
    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effects_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

/// Audio sink that only logs
#[derive(Debug, Default)]
pub struct SilentAudio {
    pub mixer: Mixer,
    frames_streamed: u64,
    music_paused: bool,
    effects_played: u64,
    recent: VecDeque<SoundEffect>,
}

impl SilentAudio {
    pub fn new(mixer: Mixer) -> Self {
        log::info!("Audio disabled; music track {} not streamed", MUSIC_TRACK);
        Self {
            mixer,
            frames_streamed: 0,
            music_paused: false,
            effects_played: 0,
            recent: VecDeque::with_capacity(RECENT_EFFECTS),
        }
    }

    pub fn frames_streamed(&self) -> u64 {
        self.frames_streamed
    }

    pub fn effects_played(&self) -> u64 {
        self.effects_played
    }

    /// The last few effects, oldest first
    pub fn recent(&self) -> Vec<SoundEffect> {
        self.recent.iter().copied().collect()
    }
}

impl AudioSink for SilentAudio {
    fn update_stream(&mut self) {
        if !self.music_paused {
            self.frames_streamed += 1;
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        if self.mixer.effects_volume() <= 0.0 {
            return;
        }
        log::trace!("sfx: {:?}", effect);
        self.effects_played += 1;
        if self.recent.len() == RECENT_EFFECTS {
            self.recent.pop_front();
        }
        self.recent.push_back(effect);
    }

    fn set_music_paused(&mut self, paused: bool) {
        self.music_paused = paused;
    }
}

impl Drop for SilentAudio {
    fn drop(&mut self) {
        log::debug!(
            "Audio closed after {} streamed frames, {} effects",
            self.frames_streamed,
            self.effects_played
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Face;

    #[test]
    fn test_effects_for_events() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Launched),
            Some(SoundEffect::Launch)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BrickCrumbled {
                index: 0,
                face: Face::Below
            }),
            Some(SoundEffect::BrickCrumble)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver(Outcome::Defeat)),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Paused), None);
    }

    #[test]
    fn test_mixer_volumes() {
        let mut mixer = Mixer::default();
        mixer.set_master_volume(2.0);
        mixer.set_sfx_volume(0.5);
        assert_eq!(mixer.effects_volume(), 0.5);
        mixer.set_music_volume(-1.0);
        assert_eq!(mixer.music_volume(), 0.0);
        mixer.set_muted(true);
        assert_eq!(mixer.effects_volume(), 0.0);
    }

    #[test]
    fn test_silent_audio_respects_mute_and_pause() {
        let mut audio = SilentAudio::default();
        audio.play(SoundEffect::WallHit);
        audio.mixer.set_muted(true);
        audio.play(SoundEffect::WallHit);
        assert_eq!(audio.recent(), vec![SoundEffect::WallHit]);

        audio.update_stream();
        audio.set_music_paused(true);
        audio.update_stream();
        assert_eq!(audio.frames_streamed(), 1);
    }

    #[test]
    fn test_recent_effects_are_capped() {
        let mut audio = SilentAudio::default();
        audio.play(SoundEffect::Launch);
        for _ in 0..RECENT_EFFECTS {
            audio.play(SoundEffect::BrickHit);
        }

        assert_eq!(audio.effects_played(), RECENT_EFFECTS as u64 + 1);
        let recent = audio.recent();
        assert_eq!(recent.len(), RECENT_EFFECTS);
        assert!(recent.iter().all(|&effect| effect == SoundEffect::BrickHit));
    }
}
