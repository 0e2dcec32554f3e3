//! Stride Physics - Collision queries using rapier3d
//!
//! The world holds static geometry and character capsules only. Nothing is
//! simulated dynamically: characters move kinematically and ask the world
//! whether a probe volume touches anything.

mod character_controller;

pub use character_controller::{CharacterController, CharacterControllerConfig};
pub use rapier3d::prelude::ColliderHandle;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::trace;

/// Static colliders plus the acceleration structure used to query them
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query structure. Call after colliders were added or moved.
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a collider that is not attached to any body
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Enable or disable collision response for a collider
    pub fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_enabled(enabled);
        }
    }

    /// Test whether a sphere overlaps any collider.
    ///
    /// `exclude` keeps the querying character from hitting its own capsule.
    pub fn sphere_overlaps(
        &self,
        center: Vec3,
        radius: f32,
        exclude: Option<ColliderHandle>,
    ) -> bool {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y, center.z);
        let mut filter = QueryFilter::default();
        if let Some(handle) = exclude {
            filter = filter.exclude_collider(handle);
        }

        let hit = self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
        );
        trace!(?center, radius, ?hit, "Sphere overlap");
        hit.is_some()
    }

    /// Infinite floor facing +Y at height `y`
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.add_static_collider(ground)
    }

    /// Axis-aligned box, e.g. a ledge to walk off
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_static_collider(collider)
    }

    pub(crate) fn query_pipeline(&self) -> &QueryPipeline {
        &self.query_pipeline
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
