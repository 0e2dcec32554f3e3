use serde::{Deserialize, Serialize};

/// Mix levels and distance rolloff for locomotion cues
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume multiplier (0.0–1.0)
    pub master_volume: f64,
    /// Multiplier applied to every footstep and landing cue (0.0–1.0)
    pub cue_volume: f64,
    /// Cues closer than this play unattenuated
    pub min_distance: f32,
    /// Cues further than this get no quieter
    pub max_distance: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            cue_volume: 1.0,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }
}

impl AudioConfig {
    /// Final gain for a cue requested at `volume` and attenuated by `rolloff`
    pub fn cue_gain(&self, volume: f32, rolloff: f64) -> f64 {
        (self.master_volume * self.cue_volume * volume as f64 * rolloff).clamp(0.0, 1.0)
    }
}
