//! Fixed-timestep game time
//!
//! The host loop feeds raw frame deltas in and drains whole simulation steps out.
//! Character state only ever advances by `fixed_timestep`.

use serde::{Deserialize, Serialize};

/// Rejected clock configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeConfigError {
    #[error("fixed timestep must be positive, got {0}")]
    NonPositiveTimestep(f32),

    #[error("time scale must be positive, got {0}")]
    NonPositiveTimeScale(f32),

    #[error("max frame length must not be negative, got {0}")]
    NegativeMaxFrame(f32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Simulated seconds per real second
    pub time_scale: f32,
    /// Length of one locomotion step in seconds
    pub fixed_timestep: f32,
    /// Longest frame the clock will accept; longer hitches are truncated
    pub max_frame: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_frame: 0.25,
        }
    }
}

impl TimeConfig {
    /// Reject values that would stall the step loop. NaN fails every check.
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        if !(self.fixed_timestep > 0.0) {
            return Err(TimeConfigError::NonPositiveTimestep(self.fixed_timestep));
        }
        if !(self.time_scale > 0.0) {
            return Err(TimeConfigError::NonPositiveTimeScale(self.time_scale));
        }
        if !(self.max_frame >= 0.0) {
            return Err(TimeConfigError::NegativeMaxFrame(self.max_frame));
        }
        Ok(())
    }
}

/// Accumulates frame time and hands it out in fixed steps
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    /// Frames fed through [`GameTime::update`]
    pub frame_count: u64,
    /// Steps handed out so far
    pub step_count: u64,
    /// Scaled length of the last frame
    pub delta_time: f32,
    pending: f32,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Feed the raw length of the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.frame_count += 1;
        let frame = raw_delta.min(self.config.max_frame).max(0.0);
        self.delta_time = frame * self.config.time_scale;
        self.pending += self.delta_time;
    }

    /// Drain whole steps from the pending time; the remainder carries over.
    /// An unvalidated non-positive timestep yields no steps.
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if !(step > 0.0) {
            return 0;
        }
        let mut steps = 0;
        while self.pending >= step {
            self.pending -= step;
            steps += 1;
        }
        self.step_count += u64::from(steps);
        steps
    }

    /// Simulated seconds covered by the steps handed out so far
    pub fn fixed_time(&self) -> f64 {
        self.step_count as f64 * f64::from(self.config.fixed_timestep)
    }
}
