use std::path::PathBuf;

/// Audio failures. None of these are fatal to the simulation.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output available: {0}")]
    Backend(String),

    #[error("could not decode clip {path:?}: {reason}")]
    ClipLoad { path: PathBuf, reason: String },

    #[error("could not start clip {path:?}: {reason}")]
    Playback { path: PathBuf, reason: String },
}

impl AudioError {
    /// Clip the error refers to, if any
    pub fn clip_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Backend(_) => None,
            Self::ClipLoad { path, .. } | Self::Playback { path, .. } => Some(path),
        }
    }
}
