//! Input Module
//!
//! Platform-agnostic input consumed by the locomotion controller.
//! Device handling and key bindings live in the host; this module only
//! defines the normalized snapshot and the buffer that feeds it.
//!
//! # Example
//!
//! ```rust,ignore
//! use strider_engine::input::{InputAccumulator, InputAction};
//!
//! let mut input = InputAccumulator::new();
//! input.set_movement(0.0, 1.0);
//! input.trigger(InputAction::Crouch);
//!
//! let snapshot = input.drain();
//! assert!(snapshot.crouch);
//! ```

pub mod accumulator;
pub mod snapshot;

pub use accumulator::InputAccumulator;
pub use snapshot::{InputAction, InputSnapshot};
