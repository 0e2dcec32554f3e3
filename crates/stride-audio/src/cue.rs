//! Positional one-shot cues

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kira::manager::backend::DefaultBackend;
use kira::manager::AudioManager;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::sound::PlaybackState;

use crate::error::AudioError;
use crate::spatial::SpatialParams;

/// Decoded clip data keyed by path, plus handles of cues still sounding
#[derive(Default)]
pub struct CuePlayer {
    decoded: HashMap<PathBuf, StaticSoundData>,
    sounding: Vec<StaticSoundHandle>,
}

impl CuePlayer {
    /// Start a cue. `gain` already folds in config, caller and distance volume.
    pub fn play(
        &mut self,
        manager: &mut AudioManager<DefaultBackend>,
        path: &Path,
        gain: f64,
        spatial: SpatialParams,
    ) -> Result<(), AudioError> {
        let data = self.decoded(path)?;
        let settings = StaticSoundSettings::new()
            .volume(gain)
            .panning(spatial.panning);
        let handle = manager
            .play(data.with_settings(settings))
            .map_err(|e| AudioError::Playback {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        self.sounding.push(handle);
        Ok(())
    }

    /// Drop handles of finished cues
    pub fn reap(&mut self) {
        self.sounding
            .retain(|h| h.state() != PlaybackState::Stopped);
    }

    fn decoded(&mut self, path: &Path) -> Result<StaticSoundData, AudioError> {
        if let Some(data) = self.decoded.get(path) {
            return Ok(data.clone());
        }
        let data = StaticSoundData::from_file(path).map_err(|e| AudioError::ClipLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.decoded.insert(path.to_path_buf(), data.clone());
        Ok(data)
    }
}
