//! Animation, audio and game-over requests derived from locomotion transitions
//!
//! The emitter owns no state beyond its collaborators. Every call is a
//! fire-and-forget request; nothing is read back.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use stride_core::AudioClip;
use tracing::{debug, info, warn};

use crate::locomotion::TransitionEvent;

/// Animation samples at or below this weight are considered blended out
pub const CLIP_WEIGHT_THRESHOLD: f32 = 0.5;

/// Boolean animator parameters driven by locomotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationFlag {
    Jump,
    FreeFall,
    Death,
}

impl AnimationFlag {
    /// Parameter name as authored in the animator
    pub fn name(self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::FreeFall => "FreeFall",
            Self::Death => "Death",
        }
    }
}

/// Receives animator flag updates
pub trait AnimationSink {
    fn set_flag(&mut self, flag: AnimationFlag, value: bool);
}

/// Plays one-shot clips in the world
pub trait AudioSink {
    fn play_clip_at(&mut self, clip: &AudioClip, position: Vec3, volume: f32);
}

/// Notified once when the character dies
pub trait GameOverSink {
    fn game_over(&mut self);
}

/// Stand-in for a collaborator the host did not wire up
struct NoopSink;

impl AnimationSink for NoopSink {
    fn set_flag(&mut self, _flag: AnimationFlag, _value: bool) {}
}

impl AudioSink for NoopSink {
    fn play_clip_at(&mut self, _clip: &AudioClip, _position: Vec3, _volume: f32) {}
}

impl GameOverSink for NoopSink {
    fn game_over(&mut self) {}
}

/// Builder for [`FeedbackEmitter`]
pub struct FeedbackEmitterBuilder {
    animation: Option<Box<dyn AnimationSink>>,
    audio: Option<Box<dyn AudioSink>>,
    game_over: Option<Box<dyn GameOverSink>>,
    volume: f32,
    landing_cue: Option<AudioClip>,
}

impl FeedbackEmitterBuilder {
    pub fn animation(mut self, sink: impl AnimationSink + 'static) -> Self {
        self.animation = Some(Box::new(sink));
        self
    }

    pub fn audio(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(sink));
        self
    }

    pub fn game_over(mut self, sink: impl GameOverSink + 'static) -> Self {
        self.game_over = Some(Box::new(sink));
        self
    }

    /// Volume for footstep and landing clips (0.0–1.0)
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Also play this clip directly on `Landed`, without waiting for an
    /// animation sample
    pub fn landing_cue(mut self, clip: AudioClip) -> Self {
        self.landing_cue = Some(clip);
        self
    }

    /// Resolve collaborators. Missing ones become no-ops and are reported once here.
    pub fn build(self) -> FeedbackEmitter {
        FeedbackEmitter {
            animation: self.animation.unwrap_or_else(|| {
                warn!("No animation collaborator assigned, animation flags are ignored");
                Box::new(NoopSink)
            }),
            audio: self.audio.unwrap_or_else(|| {
                warn!("No audio collaborator assigned, footsteps are silent");
                Box::new(NoopSink)
            }),
            game_over: self.game_over.unwrap_or_else(|| {
                warn!("No game-over collaborator assigned, death will not show a game over");
                Box::new(NoopSink)
            }),
            volume: self.volume,
            landing_cue: self.landing_cue,
        }
    }
}

/// Translates transitions and animation samples into collaborator requests
pub struct FeedbackEmitter {
    animation: Box<dyn AnimationSink>,
    audio: Box<dyn AudioSink>,
    game_over: Box<dyn GameOverSink>,
    volume: f32,
    landing_cue: Option<AudioClip>,
}

impl FeedbackEmitter {
    pub fn builder() -> FeedbackEmitterBuilder {
        FeedbackEmitterBuilder {
            animation: None,
            audio: None,
            game_over: None,
            volume: 0.5,
            landing_cue: None,
        }
    }

    /// React to a locomotion transition
    pub fn on_transition(&mut self, event: TransitionEvent, position: Vec3) {
        debug!(?event, "Locomotion transition");
        match event {
            TransitionEvent::EnteredAirborneLong => {
                self.animation.set_flag(AnimationFlag::FreeFall, true);
            }
            TransitionEvent::Landed => {
                self.animation.set_flag(AnimationFlag::Jump, false);
                self.animation.set_flag(AnimationFlag::FreeFall, false);
                if let Some(clip) = &self.landing_cue {
                    self.audio.play_clip_at(clip, position, self.volume);
                }
            }
            TransitionEvent::Died => {
                self.animation.set_flag(AnimationFlag::Death, true);
                info!("Character died, signalling game over");
                self.game_over.game_over();
            }
        }
    }

    /// A jump was launched
    pub fn on_jump(&mut self) {
        self.animation.set_flag(AnimationFlag::Jump, true);
    }

    /// Footstep animation event. Picks one clip uniformly; an empty set is a no-op.
    pub fn on_footstep_sample<R: Rng + ?Sized>(
        &mut self,
        clip_weight: f32,
        clips: &[AudioClip],
        position: Vec3,
        rng: &mut R,
    ) {
        if clip_weight <= CLIP_WEIGHT_THRESHOLD {
            return;
        }
        if let Some(clip) = clips.choose(rng) {
            self.audio.play_clip_at(clip, position, self.volume);
        }
    }

    /// Landing animation event
    pub fn on_landing_sample(&mut self, clip_weight: f32, clip: &AudioClip, position: Vec3) {
        if clip_weight > CLIP_WEIGHT_THRESHOLD {
            self.audio.play_clip_at(clip, position, self.volume);
        }
    }
}
