//! Input Snapshot
//!
//! The normalized input the controller consumes each phase. The host input
//! layer is responsible for mapping devices onto these fields.

use glam::Vec2;

/// Discrete, edge-triggered actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Jump, or stand up when crouched
    Jump,
    /// Toggle crouch
    Crouch,
    /// Sprint pressed (toggles sprint)
    SprintPressed,
    /// Sprint released (stops sprint in hold mode)
    SprintReleased,
}

/// One phase worth of input.
///
/// `movement` is a level value (x = strafe, y = forward, each in [-1, 1]).
/// `look` is the raw look delta for this phase (x = horizontal, y = vertical).
/// The action flags are edges: true only for the phase the action happened in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub movement: Vec2,
    pub look: Vec2,
    pub jump: bool,
    pub crouch: bool,
    pub sprint_pressed: bool,
    pub sprint_released: bool,
}

impl InputSnapshot {
    /// Snapshot with only a movement vector, clamped to [-1, 1] per axis.
    pub fn with_movement(strafe: f32, forward: f32) -> Self {
        Self {
            movement: Vec2::new(strafe, forward).clamp(Vec2::NEG_ONE, Vec2::ONE),
            ..Default::default()
        }
    }

    /// Snapshot with only a look delta.
    pub fn with_look(dx: f32, dy: f32) -> Self {
        Self {
            look: Vec2::new(dx, dy),
            ..Default::default()
        }
    }

    /// Set the flag for `action`.
    pub fn press(mut self, action: InputAction) -> Self {
        match action {
            InputAction::Jump => self.jump = true,
            InputAction::Crouch => self.crouch = true,
            InputAction::SprintPressed => self.sprint_pressed = true,
            InputAction::SprintReleased => self.sprint_released = true,
        }
        self
    }

    /// Forward component of the movement intent.
    #[inline]
    pub fn forward(&self) -> f32 {
        self.movement.y
    }

    /// Strafe component of the movement intent.
    #[inline]
    pub fn strafe(&self) -> f32 {
        self.movement.x
    }

    /// True if any action edge is set.
    pub fn has_actions(&self) -> bool {
        self.jump || self.crouch || self.sprint_pressed || self.sprint_released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let input = InputSnapshot::default();
        assert_eq!(input.movement, Vec2::ZERO);
        assert_eq!(input.look, Vec2::ZERO);
        assert!(!input.has_actions());
    }

    #[test]
    fn test_movement_is_clamped() {
        let input = InputSnapshot::with_movement(3.0, -2.0);
        assert_eq!(input.strafe(), 1.0);
        assert_eq!(input.forward(), -1.0);
    }

    #[test]
    fn test_press_sets_single_flag() {
        let input = InputSnapshot::default().press(InputAction::Crouch);
        assert!(input.crouch);
        assert!(!input.jump);
        assert!(input.has_actions());
    }
}
