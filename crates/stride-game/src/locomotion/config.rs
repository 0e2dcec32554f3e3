//! Locomotion tuning values

use serde::{Deserialize, Serialize};

/// Rejected locomotion configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("gravity must be negative, got {0}")]
    NonNegativeGravity(f32),

    #[error("terminal velocity must be a positive speed, got {0}")]
    NonPositiveTerminalVelocity(f32),

    #[error("{name} must not be negative, got {value}")]
    NegativeTimeout { name: &'static str, value: f32 },

    #[error("grounded probe radius must be positive, got {0}")]
    NonPositiveProbeRadius(f32),
}

/// Immutable locomotion configuration, fixed for the lifetime of a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Vertical acceleration in m/s² (negative pulls down)
    pub gravity: f32,
    /// Downward speed at which gravity stops accelerating the character
    pub terminal_velocity: f32,
    /// Seconds on the ground before another jump is allowed
    pub jump_timeout: f32,
    /// Seconds airborne before the character counts as free-falling
    pub fall_timeout: f32,
    /// The probe sphere sits this far below the feet (negative = above)
    pub grounded_offset: f32,
    /// Radius of the ground probe sphere
    pub grounded_radius: f32,
    /// Apex height of a jump in meters
    pub jump_height: f32,
    /// Walking speed in meters per second
    pub walk_speed: f32,
    /// Sprinting speed in meters per second
    pub sprint_speed: f32,
    /// Horizontal acceleration toward the target speed (m/s²)
    pub acceleration: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            terminal_velocity: 53.0,
            jump_timeout: 0.5,
            fall_timeout: 0.15,
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            jump_height: 1.2,
            walk_speed: 2.0,
            sprint_speed: 5.335,
            acceleration: 10.0,
        }
    }
}

impl LocomotionConfig {
    /// Check the invariants the state machine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity < 0.0) {
            return Err(ConfigError::NonNegativeGravity(self.gravity));
        }
        if !(self.terminal_velocity > 0.0) {
            return Err(ConfigError::NonPositiveTerminalVelocity(self.terminal_velocity));
        }
        for (name, value) in [("jump timeout", self.jump_timeout), ("fall timeout", self.fall_timeout)] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeTimeout { name, value });
            }
        }
        if !(self.grounded_radius > 0.0) {
            return Err(ConfigError::NonPositiveProbeRadius(self.grounded_radius));
        }
        Ok(())
    }

    /// Target horizontal speed for the current sprint state
    pub fn max_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }

    /// Launch velocity that reaches `jump_height` under this gravity
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }
}
