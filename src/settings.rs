//! Host settings with persistence
//!
//! Settings live in `~/.config/stride/settings.toml` unless a path is given on
//! the command line. Every section falls back to defaults when missing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stride_audio::AudioConfig;
use stride_core::{AudioClip, TimeConfig};
use stride_game::LocomotionConfig;
use tracing::{info, warn};

/// All host settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub locomotion: LocomotionConfig,
    pub time: TimeConfig,
    pub audio: AudioConfig,
    pub feedback: FeedbackSettings,
    pub scenario: ScenarioSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride"))
    }

    /// Default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::default_path() else {
                    warn!("Could not determine config directory, using default settings");
                    return Self::default();
                };
                path
            }
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Write settings to the default location
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = dir.join("settings.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}

/// Clips and volume for footstep/landing feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    /// Footstep clips; one is picked at random per step
    pub footstep_clips: Vec<PathBuf>,
    /// Landing clip
    pub landing_clip: Option<PathBuf>,
    /// Volume for footstep and landing clips (0.0 to 1.0)
    pub volume: f32,
    /// Play the landing clip on ground contact instead of waiting for the animator
    pub landing_cue_on_contact: bool,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            footstep_clips: (1..=4)
                .map(|i| PathBuf::from(format!("assets/audio/footstep_{i:02}.wav")))
                .collect(),
            landing_clip: Some(PathBuf::from("assets/audio/land.wav")),
            volume: 0.5,
            landing_cue_on_contact: false,
        }
    }
}

impl FeedbackSettings {
    pub fn footsteps(&self) -> Vec<AudioClip> {
        self.footstep_clips.iter().map(AudioClip::from_path).collect()
    }

    pub fn landing(&self) -> Option<AudioClip> {
        self.landing_clip.as_ref().map(AudioClip::from_path)
    }
}

/// Scripted headless run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Spawn height above the ground plane
    pub spawn_height: f32,
    /// Height of the ledge the player spawns over and walks off; 0 disables it
    pub ledge_height: f32,
    /// Half the ledge's side length
    pub ledge_half_width: f32,
    /// Total simulated seconds
    pub duration_secs: f32,
    /// Seconds after which the death key is pressed
    pub kill_at_secs: Option<f32>,
    /// Seconds between footstep animation events while walking
    pub footstep_interval: f32,
    /// Seed for footstep clip selection
    pub seed: u64,
    /// Try to open an audio device
    pub enable_audio: bool,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            spawn_height: 2.0,
            ledge_height: 0.5,
            ledge_half_width: 2.0,
            duration_secs: 8.0,
            kill_at_secs: Some(6.5),
            footstep_interval: 0.35,
            seed: 7,
            enable_audio: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_roundtrip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.locomotion, settings.locomotion);
        assert_eq!(parsed.feedback.footstep_clips.len(), 4);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Settings = toml::from_str(
            "[locomotion]\njump_timeout = 0.25\n\n[scenario]\nenable_audio = false\n",
        )
        .unwrap();
        assert_eq!(parsed.locomotion.jump_timeout, 0.25);
        assert_eq!(parsed.locomotion.gravity, -9.81);
        assert!(!parsed.scenario.enable_audio);
        assert_eq!(parsed.scenario.kill_at_secs, Some(6.5));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/stride/settings.toml")));
        assert_eq!(settings.locomotion, LocomotionConfig::default());
    }
}
