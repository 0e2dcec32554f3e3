//! Kinematic capsule body driven by rapier3d's character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::{debug, info};

use crate::PhysicsWorld;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterControllerConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.28m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.28,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
        }
    }
}

/// Capsule body that moves with collision against static geometry.
///
/// Grounded status is not read from here; the player samples a separate
/// probe sphere under the feet instead.
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Current position (feet)
    pub position: Vec3,
    /// Velocity requested for the next move
    pub velocity: Vec3,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    enabled: bool,
    controller: KinematicCharacterController,
}

impl CharacterController {
    /// Create a new character body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character body with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: false,
        });
        // Gravity is owned by the locomotion state; snapping would hide airborne frames
        controller.snap_to_ground = None;
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            collider_handle: None,
            enabled: true,
            controller,
        }
    }

    /// Spawn the character in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.enabled = true;

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        debug!(?position, "Character body spawned");
        handle
    }

    /// Move the character with collision detection
    pub fn move_character(&mut self, physics: &mut PhysicsWorld, desired_translation: Vec3, dt: f32) {
        if !self.enabled {
            return;
        }

        let Some(collider_handle) = self.collider_handle else {
            return;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return;
        };

        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            physics.query_pipeline(),
            collider.shape(),
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        let effective = movement.translation;
        self.position += Vec3::new(effective.x, effective.y, effective.z);

        let center = self.center_position();
        if let Some(collider) = physics.collider_set.get_mut(collider_handle) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
    }

    /// Apply the stored velocity for one step
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let translation = self.velocity * dt;
        self.move_character(physics, translation, dt);
    }

    /// Sample the ground probe sphere, ignoring this character's own capsule
    pub fn probe_ground(&self, physics: &PhysicsWorld, center: Vec3, radius: f32) -> bool {
        physics.sphere_overlaps(center, radius, self.collider_handle)
    }

    /// Turn collision response on or off; a disabled body ignores movement requests
    pub fn set_enabled(&mut self, physics: &mut PhysicsWorld, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if let Some(handle) = self.collider_handle {
            physics.set_collider_enabled(handle, enabled);
        }
        info!(enabled, "Character collision response toggled");
    }

    /// Whether the body currently responds to movement and collision
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z,
        )
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_controller_config() {
        let config = CharacterControllerConfig::default();
        assert_eq!(config.height, 1.8);
        assert_eq!(config.radius, 0.28);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_center_position() {
        let mut body = CharacterController::new();
        body.position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(body.center_position(), Vec3::new(1.0, 2.9, 3.0));
    }

    #[test]
    fn test_probe_ignores_own_capsule() {
        let mut physics = PhysicsWorld::new();
        let mut body = CharacterController::new();
        body.spawn(&mut physics, Vec3::new(0.0, 10.0, 0.0));
        physics.update_queries();

        // Probe sphere sits inside the capsule but there is no ground below
        assert!(!body.probe_ground(&physics, body.center_position(), 0.28));
    }

    #[test]
    fn test_disabled_body_does_not_move() {
        let mut physics = PhysicsWorld::new();
        let mut body = CharacterController::new();
        body.spawn(&mut physics, Vec3::new(0.0, 10.0, 0.0));
        physics.update_queries();

        body.set_enabled(&mut physics, false);
        body.velocity = Vec3::new(0.0, -5.0, 0.0);
        body.update(&mut physics, 1.0 / 60.0);

        assert!(!body.is_enabled());
        assert_eq!(body.position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_body_falls_freely_without_ground() {
        let mut physics = PhysicsWorld::new();
        let mut body = CharacterController::new();
        body.spawn(&mut physics, Vec3::new(0.0, 10.0, 0.0));
        physics.update_queries();

        body.velocity = Vec3::new(0.0, -6.0, 0.0);
        body.update(&mut physics, 0.5);

        assert!((body.position.y - 7.0).abs() < 0.01);
    }
}
