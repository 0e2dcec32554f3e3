//! Per-step vertical kinematics, jump/fall timers and the death latch

use super::LocomotionConfig;

/// Outcome of a simulation step that feedback collaborators react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionEvent {
    /// Airborne longer than the fall timeout; fires once per airborne episode
    EnteredAirborneLong,
    /// Ground contact regained after being airborne
    Landed,
    /// First successful kill
    Died,
}

/// Coarse locomotion phase, derived from [`CharacterState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionPhase {
    Grounded,
    Airborne,
    Falling,
    Dead,
}

/// Mutable per-character locomotion fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterState {
    /// Signed vertical speed; never below `-terminal_velocity` once integrated
    pub vertical_velocity: f32,
    /// Result of the most recent ground probe
    pub grounded: bool,
    /// Jump cooldown; a jump is ready once this is `<= 0`
    pub jump_timeout_remaining: f32,
    /// Airborne grace period before free fall
    pub fall_timeout_remaining: f32,
    /// One-way death latch
    pub dead: bool,
}

impl CharacterState {
    /// State of a freshly spawned character standing on the ground
    pub fn spawned(config: &LocomotionConfig) -> Self {
        Self {
            vertical_velocity: 0.0,
            grounded: true,
            jump_timeout_remaining: config.jump_timeout,
            fall_timeout_remaining: config.fall_timeout,
            dead: false,
        }
    }
}

/// Locomotion state machine for one character.
///
/// The host calls [`tick`](Self::tick) once per fixed step with the ground
/// probe result. Timers use `>= 0` as "still counting" and are never clamped,
/// so they may end up one step's worth below zero.
#[derive(Debug, Clone)]
pub struct LocomotionState {
    config: LocomotionConfig,
    state: CharacterState,
    /// Set once `EnteredAirborneLong` fired for the current airborne episode
    free_fall_signaled: bool,
}

impl LocomotionState {
    /// Create a state machine for a freshly spawned character
    pub fn new(config: LocomotionConfig) -> Self {
        let state = CharacterState::spawned(&config);
        Self::with_state(config, state)
    }

    /// Create a state machine resuming from an explicit state
    pub fn with_state(config: LocomotionConfig, state: CharacterState) -> Self {
        Self {
            config,
            state,
            free_fall_signaled: false,
        }
    }

    /// Advance by one simulation step.
    ///
    /// Returns at most one event. A dead character is frozen and always
    /// returns `None`.
    pub fn tick(&mut self, delta_time: f32, grounded: bool) -> Option<TransitionEvent> {
        if self.state.dead {
            return None;
        }

        let was_grounded = self.state.grounded;
        self.state.grounded = grounded;

        let mut event = None;
        if grounded {
            self.state.fall_timeout_remaining = self.config.fall_timeout;
            self.free_fall_signaled = false;

            if self.state.jump_timeout_remaining >= 0.0 {
                self.state.jump_timeout_remaining -= delta_time;
            }

            if !was_grounded {
                event = Some(TransitionEvent::Landed);
            }
        } else {
            if was_grounded {
                self.state.jump_timeout_remaining = self.config.jump_timeout;
            }

            if self.state.fall_timeout_remaining >= 0.0 {
                self.state.fall_timeout_remaining -= delta_time;
            } else if !self.free_fall_signaled {
                self.free_fall_signaled = true;
                event = Some(TransitionEvent::EnteredAirborneLong);
            }
        }

        // Terminal velocity floors downward speed; upward speed is unbounded
        let floor = -self.config.terminal_velocity;
        if self.state.vertical_velocity > floor {
            self.state.vertical_velocity =
                (self.state.vertical_velocity + self.config.gravity * delta_time).max(floor);
        }

        event
    }

    /// Kill the character. Only the first call yields `Died`.
    pub fn kill(&mut self) -> Option<TransitionEvent> {
        if self.state.dead {
            return None;
        }
        self.state.dead = true;
        Some(TransitionEvent::Died)
    }

    /// Launch a jump if grounded, alive and off cooldown
    pub fn try_jump(&mut self) -> bool {
        if self.state.dead || !self.state.grounded || !self.jump_ready() {
            return false;
        }
        self.state.vertical_velocity = self.config.jump_velocity();
        true
    }

    pub fn jump_ready(&self) -> bool {
        self.state.jump_timeout_remaining <= 0.0
    }

    pub fn is_free_falling(&self) -> bool {
        self.free_fall_signaled
    }

    pub fn phase(&self) -> LocomotionPhase {
        if self.state.dead {
            LocomotionPhase::Dead
        } else if self.state.grounded {
            LocomotionPhase::Grounded
        } else if self.free_fall_signaled {
            LocomotionPhase::Falling
        } else {
            LocomotionPhase::Airborne
        }
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }
}
