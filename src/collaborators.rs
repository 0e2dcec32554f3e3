//! Host-side implementations of the feedback collaborators

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec3;
use stride_audio::{AudioEngine, AudioError};
use stride_core::AudioClip;
use stride_game::{AnimationFlag, AnimationSink, AudioSink, GameOverSink};
use tracing::{debug, info, warn};

/// Stands in for an animator by logging flag changes
#[derive(Debug, Default)]
pub struct TracingAnimator;

impl AnimationSink for TracingAnimator {
    fn set_flag(&mut self, flag: AnimationFlag, value: bool) {
        debug!(flag = flag.name(), value, "Animator flag");
    }
}

/// Anything that can start a positional cue
pub trait CueOutput {
    fn play_clip_at(
        &mut self,
        path: &Path,
        position: Vec3,
        volume: f32,
    ) -> Result<(), AudioError>;
}

impl CueOutput for AudioEngine {
    fn play_clip_at(
        &mut self,
        path: &Path,
        position: Vec3,
        volume: f32,
    ) -> Result<(), AudioError> {
        AudioEngine::play_clip_at(self, path, position, volume)
    }
}

/// Routes clip requests to the kira engine shared with the host loop
pub struct KiraAudio<O: CueOutput = AudioEngine> {
    output: Rc<RefCell<O>>,
    failed: HashSet<PathBuf>,
}

impl<O: CueOutput> KiraAudio<O> {
    pub fn new(output: Rc<RefCell<O>>) -> Self {
        Self {
            output,
            failed: HashSet::new(),
        }
    }
}

impl<O: CueOutput> AudioSink for KiraAudio<O> {
    fn play_clip_at(&mut self, clip: &AudioClip, position: Vec3, volume: f32) {
        if self.failed.contains(&clip.path) {
            return;
        }
        let result = self
            .output
            .borrow_mut()
            .play_clip_at(&clip.path, position, volume);
        if let Err(e) = result {
            // Report each broken clip once, then skip it
            warn!(clip = %clip.name, "{}", e);
            if let Some(path) = e.clip_path() {
                self.failed.insert(path.clone());
            }
        }
    }
}

/// Records that the game is over; the host loop polls it
#[derive(Debug, Clone, Default)]
pub struct DeathScreen {
    shown: Rc<Cell<bool>>,
}

impl DeathScreen {
    pub fn is_shown(&self) -> bool {
        self.shown.get()
    }
}

impl GameOverSink for DeathScreen {
    fn game_over(&mut self) {
        if !self.shown.replace(true) {
            info!("GAME OVER");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails every clip whose name contains "broken"
    #[derive(Default)]
    struct FakeOutput {
        attempts: Vec<PathBuf>,
    }

    impl CueOutput for FakeOutput {
        fn play_clip_at(
            &mut self,
            path: &Path,
            _position: Vec3,
            _volume: f32,
        ) -> Result<(), AudioError> {
            self.attempts.push(path.to_path_buf());
            if path.to_string_lossy().contains("broken") {
                return Err(AudioError::ClipLoad {
                    path: path.to_path_buf(),
                    reason: "unsupported format".into(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_broken_clip_is_tried_once() {
        let output = Rc::new(RefCell::new(FakeOutput::default()));
        let mut audio = KiraAudio::new(Rc::clone(&output));
        let broken = AudioClip::from_path("assets/audio/broken_step.wav");
        let good = AudioClip::from_path("assets/audio/step.wav");

        for _ in 0..3 {
            audio.play_clip_at(&broken, Vec3::ZERO, 0.5);
            audio.play_clip_at(&good, Vec3::ZERO, 0.5);
        }

        let output = output.borrow();
        let attempts = &output.attempts;
        assert_eq!(attempts.iter().filter(|p| **p == broken.path).count(), 1);
        assert_eq!(attempts.iter().filter(|p| **p == good.path).count(), 3);
    }

    #[test]
    fn test_backend_error_does_not_blacklist_clip() {
        struct NoDevice(u32);
        impl CueOutput for NoDevice {
            fn play_clip_at(
                &mut self,
                _path: &Path,
                _position: Vec3,
                _volume: f32,
            ) -> Result<(), AudioError> {
                self.0 += 1;
                Err(AudioError::Backend("device lost".into()))
            }
        }

        let output = Rc::new(RefCell::new(NoDevice(0)));
        let mut audio = KiraAudio::new(Rc::clone(&output));
        let clip = AudioClip::from_path("assets/audio/land.wav");
        audio.play_clip_at(&clip, Vec3::ZERO, 1.0);
        audio.play_clip_at(&clip, Vec3::ZERO, 1.0);
        assert_eq!(output.borrow().0, 2);
    }

    #[test]
    fn test_game_over_is_shown_once() {
        let screen = DeathScreen::default();
        let mut sink = screen.clone();
        assert!(!screen.is_shown());

        sink.game_over();
        sink.game_over();

        assert!(screen.is_shown());
        assert!(sink.is_shown());
    }
}
