//! Input Accumulator
//!
//! Input events arrive asynchronously from the host, while the controller runs
//! two phases at different rates. The accumulator sits in between:
//!
//! - **Movement**: last write wins
//! - **Look delta**: last write wins, cleared when the render phase drains it
//! - **Actions**: latch until the render phase drains them
//!
//! # Example
//!
//! ```rust,ignore
//! use strider_engine::input::{InputAccumulator, InputAction};
//!
//! let mut input = InputAccumulator::new();
//!
//! // In the event loop:
//! input.set_movement(0.0, 1.0);
//! input.set_look(10.0, -5.0);
//! input.trigger(InputAction::Jump);
//!
//! // Fixed step reads movement without consuming anything:
//! controller.fixed_update(dt, &input.peek(), &mut mover);
//!
//! // Render step drains look and actions:
//! controller.update(dt, &input.drain(), &mut mover, &validator);
//! ```

use glam::Vec2;

use super::snapshot::{InputAction, InputSnapshot};

/// Collects host input between controller phases.
#[derive(Debug, Clone, Default)]
pub struct InputAccumulator {
    /// Latest movement vector.
    movement: Vec2,
    /// Latest look delta since last drain.
    look: Vec2,
    /// Pending action edges.
    pending: InputSnapshot,
}

impl InputAccumulator {
    /// Create an accumulator with no pending input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the movement vector (clamped to [-1, 1] per axis).
    pub fn set_movement(&mut self, strafe: f32, forward: f32) {
        self.movement = Vec2::new(strafe, forward).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Overwrite the look delta.
    #[inline]
    pub fn set_look(&mut self, dx: f32, dy: f32) {
        self.look = Vec2::new(dx, dy);
    }

    /// Latch an action until the next drain.
    pub fn trigger(&mut self, action: InputAction) {
        self.pending = self.pending.press(action);
    }

    /// Current movement vector.
    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Snapshot for the fixed phase: movement only, nothing consumed.
    pub fn peek(&self) -> InputSnapshot {
        InputSnapshot {
            movement: self.movement,
            ..Default::default()
        }
    }

    /// Snapshot for the render phase. Resets look and actions; movement persists.
    pub fn drain(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            movement: self.movement,
            look: self.look,
            ..self.pending
        };
        self.look = Vec2::ZERO;
        self.pending = InputSnapshot::default();
        snapshot
    }

    /// Drop everything, including movement.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_last_write_wins_until_drained() {
        let mut input = InputAccumulator::new();
        input.set_look(1.0, 0.0);
        input.set_look(1.0, 0.0);
        assert_eq!(input.drain().look, Vec2::new(1.0, 0.0));
        assert_eq!(input.drain().look, Vec2::ZERO);

        input.set_look(10.0, -5.0);
        input.set_look(3.0, 2.0);
        assert_eq!(input.drain().look, Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_movement_last_write_wins_and_persists() {
        let mut input = InputAccumulator::new();
        input.set_movement(1.0, 0.0);
        input.set_movement(0.0, 1.0);

        assert_eq!(input.peek().movement, Vec2::new(0.0, 1.0));
        assert_eq!(input.drain().movement, Vec2::new(0.0, 1.0));
        assert_eq!(input.drain().movement, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_actions_latch_once() {
        let mut input = InputAccumulator::new();
        input.trigger(InputAction::Jump);
        input.trigger(InputAction::Jump);

        assert!(!input.peek().jump);
        assert!(input.drain().jump);
        assert!(!input.drain().jump);
    }

    #[test]
    fn test_reset_clears_movement() {
        let mut input = InputAccumulator::new();
        input.set_movement(0.5, 0.5);
        input.trigger(InputAction::Crouch);
        input.reset();

        let snapshot = input.drain();
        assert_eq!(snapshot, InputSnapshot::default());
    }
}
