//! Stride Game - Character locomotion and its feedback
//!
//! Provides the locomotion state machine, input gating, feedback emission, the
//! ground-probe gizmo and a physics-backed player controller.

pub mod feedback;
pub mod gizmo;
pub mod input;
pub mod locomotion;
pub mod player;

pub use feedback::{
    AnimationFlag, AnimationSink, AudioSink, FeedbackEmitter, FeedbackEmitterBuilder,
    GameOverSink, CLIP_WEIGHT_THRESHOLD,
};
pub use gizmo::{gizmo_parameters, ground_probe_center, GizmoParams};
pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use locomotion::{
    filter_intent, CharacterState, ConfigError, LocomotionConfig, LocomotionPhase,
    LocomotionState, MovementIntent, TransitionEvent,
};
pub use player::PlayerController;
