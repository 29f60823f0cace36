//! Player Module
//!
//! First-person locomotion for a capsule avatar.
//!
//! # Components
//!
//! - [`FirstPersonController`] - Two-rate state machine tying everything together
//! - [`PlayerMovementController`] - Smoothed translation, gravity, jump and sprint
//!   - Jump cooldown re-arms on time, independent of ground contact
//! - [`StanceController`] - Stand/crouch with overlap-gated transitions and smoothed camera height
//! - [`ControllerConfig`] - Settings and stance profiles, loadable from JSON

pub mod controller;
pub mod crouch;
pub mod movement_controller;
pub mod settings;

pub use controller::{ActionReport, FirstPersonController, FrameReport, ViewState};
pub use crouch::{Stance, StanceChange, StanceController, StanceProbe};
pub use movement_controller::{JumpOutcome, MotionStep, PlayerMovementController};
pub use settings::{ConfigError, ControllerConfig, PlayerSettings, StanceProfile};
