//! Strider Engine Library
//!
//! A first-person locomotion controller for a capsule avatar: look, smoothed
//! ground-relative movement, gravity, jumping with cooldown and an
//! overlap-gated crouch/stand stance machine.
//!
//! Physics, rendering and device input stay with the host. The controller
//! reaches them only through the traits in [`physics::collision`] and the
//! [`input::InputSnapshot`] it is handed each step.
//!
//! # Modules
//!
//! - [`player`] - The controller, its sub-state machines and configuration
//! - [`camera`] - Yaw/pitch look integration
//! - [`input`] - Input snapshot and accumulator
//! - [`physics`] - Smoothing math, collision traits, reference static world
//!
//! # Example
//!
//! ```ignore
//! use strider_engine::{ControllerConfig, FirstPersonController, InputAccumulator};
//! use strider_engine::physics::{KinematicCapsule, StaticWorld};
//! use glam::Vec3;
//!
//! let world = StaticWorld::new(0.0);
//! let mut body = KinematicCapsule::new(&world, Vec3::ZERO, 0.5, 1.8);
//! let mut controller = FirstPersonController::new(ControllerConfig::default())?;
//! let mut input = InputAccumulator::new();
//!
//! input.set_movement(0.0, 1.0);
//!
//! // Fixed loop (e.g. 50 Hz):
//! controller.fixed_update(0.02, &input.peek(), &mut body);
//!
//! // Render loop:
//! let frame = controller.update(frame_dt, &input.drain(), &body, &world);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;

// Re-export commonly used types
pub use camera::{FpsLookController, LookSettings};
pub use input::{InputAccumulator, InputAction, InputSnapshot};
pub use physics::{CollisionMask, CollisionMover, StanceValidator};
pub use player::{
    ConfigError, ControllerConfig, FirstPersonController, JumpOutcome, MotionStep, Stance,
    StanceChange,
};
