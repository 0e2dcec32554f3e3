//! Stride Core - Shared types for the Stride locomotion workspace
//!
//! This crate provides the foundational types used by every other crate:
//! - Mathematical primitives (re-exported from glam)
//! - Colors and entity identifiers
//! - Audio clip handles passed to feedback collaborators
//! - Fixed-timestep game time for the host simulation loop

pub mod time;
pub mod types;

pub use glam::{Vec2, Vec3};
pub use time::{GameTime, TimeConfig, TimeConfigError};
pub use types::{AudioClip, Color, EntityId};
