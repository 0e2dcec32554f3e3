use std::path::Path;

use glam::Vec3;
use kira::manager::backend::DefaultBackend;
use kira::manager::{AudioManager, AudioManagerSettings};
use tracing::{info, trace};

use crate::config::AudioConfig;
use crate::cue::CuePlayer;
use crate::error::AudioError;
use crate::spatial::{self, Listener};

/// Owns the kira output and plays locomotion cues relative to one listener
pub struct AudioEngine {
    manager: AudioManager<DefaultBackend>,
    cues: CuePlayer,
    config: AudioConfig,
    listener: Listener,
}

impl AudioEngine {
    /// Open the default output device
    pub fn new(config: AudioConfig) -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Backend(e.to_string()))?;

        info!(master = config.master_volume, cues = config.cue_volume, "Audio engine initialized");

        Ok(Self {
            manager,
            cues: CuePlayer::default(),
            listener: Listener::default(),
            config,
        })
    }

    /// Play a clip once at a world position with a volume in 0.0–1.0
    pub fn play_clip_at(
        &mut self,
        path: &Path,
        position: Vec3,
        volume: f32,
    ) -> Result<(), AudioError> {
        let spatial = spatial::compute_spatial(&self.listener, position, &self.config);
        let gain = self.config.cue_gain(volume, spatial.volume);
        trace!(?path, gain, pan = spatial.panning, "Cue");
        self.cues.play(&mut self.manager, path, gain, spatial)
    }

    pub fn set_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        self.listener = Listener {
            position,
            forward,
            up,
        };
    }

    /// Call once per frame
    pub fn update(&mut self) {
        self.cues.reap();
    }
}
