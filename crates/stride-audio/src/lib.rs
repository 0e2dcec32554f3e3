//! Stride Audio - Positional footstep and landing cues using kira
//!
//! Cues are fire-and-forget. Gain is attenuated by distance to a single
//! listener and panned by its right vector.

mod config;
mod cue;
mod engine;
mod error;
mod spatial;

pub use config::AudioConfig;
pub use engine::AudioEngine;
pub use error::AudioError;
pub use spatial::{compute_spatial, Listener, SpatialParams};
