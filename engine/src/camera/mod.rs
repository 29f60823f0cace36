//! Camera Module
//!
//! First-person look integration. This module is window-system agnostic:
//! it only deals with yaw/pitch state and the rotations derived from it.

pub mod fps_controller;

pub use fps_controller::{DEFAULT_MAX_PITCH, DEFAULT_MIN_PITCH, FpsLookController, LookSettings};
