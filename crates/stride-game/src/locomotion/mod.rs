//! Character locomotion core
//!
//! [`LocomotionState`] advances vertical kinematics and timers one fixed step
//! at a time and reports [`TransitionEvent`]s. [`filter_intent`] gates player
//! intent on the resulting state.

mod config;
mod gate;
mod state;

pub use config::{ConfigError, LocomotionConfig};
pub use gate::{filter_intent, MovementIntent};
pub use state::{CharacterState, LocomotionPhase, LocomotionState, TransitionEvent};
