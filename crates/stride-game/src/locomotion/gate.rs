//! Input gating: what the character is allowed to do given its state

use glam::Vec2;

use super::CharacterState;
use crate::input::{InputAction, InputState};

/// Movement intent for one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// Planar axis: x = right, y = forward
    pub move_axis: Vec2,
    pub jump: bool,
    pub sprint: bool,
}

impl MovementIntent {
    /// Raw intent from held actions
    pub fn from_input(input: &InputState) -> Self {
        Self {
            move_axis: input.move_axis(),
            jump: input.is_held(InputAction::Jump),
            sprint: input.is_held(InputAction::Sprint),
        }
    }
}

/// Filter requested intent through the character state.
///
/// No new jump can start mid-air, and a dead character does nothing at all.
pub fn filter_intent(requested: MovementIntent, state: &CharacterState) -> MovementIntent {
    if state.dead {
        return MovementIntent::default();
    }

    let mut effective = requested;
    if !state.grounded {
        effective.jump = false;
    }
    effective
}
