use glam::Vec3;

use crate::config::AudioConfig;

/// Listener state for spatial audio calculations.
#[derive(Debug, Clone)]
pub struct Listener {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: -Vec3::Z,
            up: Vec3::Y,
        }
    }
}

/// Playback parameters for an emitter relative to the listener.
#[derive(Debug, Clone, Copy)]
pub struct SpatialParams {
    /// Attenuation factor (0.0–1.0).
    pub volume: f64,
    /// Kira panning: 0.0 = hard left, 0.5 = center, 1.0 = hard right.
    pub panning: f64,
}

/// Inverse-distance attenuation between `min_distance` and `max_distance`,
/// with panning taken from the listener's right vector.
pub fn compute_spatial(listener: &Listener, emitter_pos: Vec3, config: &AudioConfig) -> SpatialParams {
    let to_emitter = emitter_pos - listener.position;
    let distance = to_emitter.length();

    if distance < f32::EPSILON {
        return SpatialParams {
            volume: 1.0,
            panning: 0.5,
        };
    }

    let min = config.min_distance.max(f32::EPSILON);
    let clamped = distance.clamp(min, config.max_distance.max(min));
    let volume = (min / clamped) as f64;

    let right = listener.forward.cross(listener.up).normalize_or_zero();
    let side = to_emitter.normalize().dot(right) as f64;

    SpatialParams {
        volume: volume.clamp(0.0, 1.0),
        panning: ((side + 1.0) * 0.5).clamp(0.0, 1.0),
    }
}
