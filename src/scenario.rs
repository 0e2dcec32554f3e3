//! Scripted input for headless runs
//!
//! Stands in for a keyboard: each step the script decides which actions are
//! held, and the input handler turns that into press/release edges.

use glam::Vec3;
use stride_game::{InputAction, InputHandler};
use stride_physics::PhysicsWorld;

use crate::settings::ScenarioSettings;

const ACTIONS: [InputAction; 7] = [
    InputAction::MoveForward,
    InputAction::MoveBackward,
    InputAction::MoveLeft,
    InputAction::MoveRight,
    InputAction::Jump,
    InputAction::Sprint,
    InputAction::Kill,
];

/// Time-based input script
pub struct Scenario {
    settings: ScenarioSettings,
}

impl Scenario {
    pub fn new(settings: ScenarioSettings) -> Self {
        Self { settings }
    }

    /// Actions held at simulated time `t`
    pub fn held_at(&self, t: f32) -> Vec<InputAction> {
        let mut held = Vec::new();
        // Land on the ledge, walk off it, then sprint-jump and strafe
        if (1.5..4.0).contains(&t) {
            held.push(InputAction::MoveForward);
        }
        if (3.0..4.0).contains(&t) {
            held.push(InputAction::Sprint);
        }
        if (3.6..3.7).contains(&t) {
            held.push(InputAction::Jump);
        }
        if (4.5..5.5).contains(&t) {
            held.push(InputAction::MoveRight);
        }
        if let Some(kill_at) = self.settings.kill_at_secs {
            if (kill_at..kill_at + 0.1).contains(&t) {
                held.push(InputAction::Kill);
            }
        }
        held
    }

    /// Ground plane at y = 0 plus the optional ledge centered under the spawn point
    pub fn build_world(&self) -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);

        let height = self.settings.ledge_height;
        if height > 0.0 {
            let half = self.settings.ledge_half_width;
            physics.create_static_box(
                Vec3::new(half, height / 2.0, half),
                Vec3::new(0.0, height / 2.0, 0.0),
            );
        }
        physics.update_queries();
        physics
    }

    /// Sync the handler with the script for time `t`
    pub fn apply(&self, t: f32, input: &mut InputHandler) {
        let held = self.held_at(t);
        for action in ACTIONS {
            if held.contains(&action) {
                input.press(action);
            } else {
                input.release(action);
            }
        }
    }

    pub fn duration(&self) -> f32 {
        self.settings.duration_secs
    }

    pub fn footstep_interval(&self) -> f32 {
        self.settings.footstep_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_is_pressed_once() {
        let scenario = Scenario::new(ScenarioSettings::default());
        let mut input = InputHandler::new();
        let mut presses = 0;
        for step in 0..600 {
            scenario.apply(step as f32 / 60.0, &mut input);
            if input.state.is_just_pressed(InputAction::Kill) {
                presses += 1;
            }
            input.end_frame();
        }
        assert_eq!(presses, 1);
    }

    #[test]
    fn test_ledge_top_is_ground() {
        let scenario = Scenario::new(ScenarioSettings::default());
        let physics = scenario.build_world();
        assert!(physics.sphere_overlaps(Vec3::new(0.0, 0.55, 0.0), 0.1, None));
        assert!(!physics.sphere_overlaps(Vec3::new(0.0, 0.8, 0.0), 0.1, None));
        // Past the edge only the floor is below
        assert!(!physics.sphere_overlaps(Vec3::new(0.0, 0.55, -3.0), 0.1, None));
    }

    #[test]
    fn test_no_ledge_leaves_flat_floor() {
        let scenario = Scenario::new(ScenarioSettings {
            ledge_height: 0.0,
            ..Default::default()
        });
        let physics = scenario.build_world();
        assert!(!physics.sphere_overlaps(Vec3::new(0.0, 0.3, 0.0), 0.1, None));
        assert!(physics.sphere_overlaps(Vec3::new(0.0, 0.05, 0.0), 0.1, None));
    }

    #[test]
    fn test_no_kill_when_disabled() {
        let scenario = Scenario::new(ScenarioSettings {
            kill_at_secs: None,
            ..Default::default()
        });
        assert!((0..600).all(|s| !scenario.held_at(s as f32 / 60.0).contains(&InputAction::Kill)));
    }
}
