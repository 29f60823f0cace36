//! Math type re-exports from glam
//!
//! The controller works in a right-handed, Y-up frame where -Z is forward.
//! Distances are meters, time is seconds, angles are degrees at the API surface.

pub use glam::{Quat, Vec2, Vec3};
