//! Physics module
//!
//! Motion math and the collision services the locomotion controller depends on.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, time in seconds.
//!
//! # Submodules
//!
//! - [`types`] - Core math types re-exported from glam
//! - [`smoothing`] - Critically-damped smoothing (smooth-damp)
//! - [`collision`] - Mover/validator traits and a static reference world

pub mod collision;
pub mod smoothing;
pub mod types;

pub use collision::{
    Aabb, Blocker, CollisionMask, CollisionMover, KinematicCapsule, StanceValidator, StaticWorld,
};
pub use smoothing::{smooth_damp, smooth_damp_vec3};
pub use types::{Quat, Vec2, Vec3};
