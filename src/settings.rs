//! Game settings
//!
//! Read from an optional JSON file. Missing or malformed files fall back to
//! defaults with a warning; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::Mixer;
use crate::sim::Rules;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,
    /// Lives, paddle speed, clear rule
    pub rules: Rules,

    // === Frame loop ===
    /// Frames the headless demo runs before quitting
    pub demo_frames: u64,
    /// How many times the autopilot restarts after game over
    pub autopilot_restarts: u32,
    /// Log a frame summary every this many frames (0 = never)
    pub summary_every: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            rules: Rules::default(),

            demo_frames: 120 * 60,
            autopilot_restarts: 1,
            summary_every: 120,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Volume settings for the audio sink
    pub fn mixer(&self) -> Mixer {
        let mut mixer = Mixer::default();
        mixer.set_master_volume(self.master_volume);
        mixer.set_sfx_volume(self.sfx_volume);
        mixer.set_music_volume(self.music_volume);
        mixer.set_muted(self.muted);
        mixer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ClearRule;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "seed": 42, "rules": { "max_lives": 3, "clear_rule": "NoStandingBricks" } }"#,
        )
        .unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.rules.max_lives, 3);
        assert_eq!(settings.rules.paddle_speed, 5.0);
        assert_eq!(settings.rules.clear_rule, ClearRule::NoStandingBricks);
        assert_eq!(settings.demo_frames, 7200);
        assert_eq!(settings.resolve_seed(), 42);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let settings = Settings::from_json(r#"{ "target_fps": 60, "summary_every": 0 }"#).unwrap();
        assert_eq!(settings.summary_every, 0);
        assert_eq!(serde_json::to_value(&settings).unwrap().get("target_fps"), None);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/rogue-out.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_mixer_from_settings() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.mixer().effects_volume(), 0.0);
        assert_eq!(Settings::default().mixer(), Mixer::default());
    }
}
