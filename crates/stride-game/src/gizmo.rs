//! Debug gizmo for the ground probe volume

use glam::Vec3;
use stride_core::Color;

use crate::locomotion::LocomotionConfig;

/// Probe sphere color while in contact with the ground
pub const GROUNDED_COLOR: Color = Color::GREEN.with_alpha(0.35);
/// Probe sphere color while airborne
pub const AIRBORNE_COLOR: Color = Color::RED.with_alpha(0.35);

/// Everything a debug renderer needs to draw the probe sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoParams {
    pub color: Color,
    pub position: Vec3,
    pub radius: f32,
}

/// Center of the ground probe sphere for a character standing at `position`
pub fn ground_probe_center(position: Vec3, grounded_offset: f32) -> Vec3 {
    Vec3::new(position.x, position.y - grounded_offset, position.z)
}

pub fn gizmo_parameters(grounded: bool, position: Vec3, config: &LocomotionConfig) -> GizmoParams {
    GizmoParams {
        color: if grounded { GROUNDED_COLOR } else { AIRBORNE_COLOR },
        position: ground_probe_center(position, config.grounded_offset),
        radius: config.grounded_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LocomotionConfig {
        LocomotionConfig {
            grounded_offset: 0.1,
            grounded_radius: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_grounded_is_transparent_green() {
        let params = gizmo_parameters(true, Vec3::ZERO, &config());
        assert_eq!(params.color, Color::rgba(0.0, 1.0, 0.0, 0.35));
    }

    #[test]
    fn test_airborne_is_transparent_red() {
        let params = gizmo_parameters(false, Vec3::ZERO, &config());
        assert_eq!(params.color, Color::rgba(1.0, 0.0, 0.0, 0.35));
    }

    #[test]
    fn test_position_and_radius() {
        for grounded in [true, false] {
            let params = gizmo_parameters(grounded, Vec3::new(1.0, 2.0, 3.0), &config());
            assert_eq!(params.position, Vec3::new(1.0, 2.0 - 0.1, 3.0));
            assert_eq!(params.radius, 0.5);
        }
    }

    #[test]
    fn test_negative_offset_lifts_probe() {
        let center = ground_probe_center(Vec3::ZERO, -0.14);
        assert_eq!(center, Vec3::new(0.0, 0.14, 0.0));
    }
}
