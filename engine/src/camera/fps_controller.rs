//! FPS Look Controller
//!
//! Integrates look input into two independent rotations:
//! - **Yaw** turns the body about the world up axis (unbounded)
//! - **Pitch** tilts the camera about its local right axis (clamped)
//!
//! The body never pitches and the camera never yaws on its own, so movement
//! stays level no matter where the player is looking.
//!
//! Look input is scaled by sensitivity and elapsed time, so a constant stick
//! deflection turns at a constant rate regardless of frame rate.
//!
//! Angles are degrees. Yaw 0 faces -Z and positive yaw turns right.
//! Positive pitch looks down.

use glam::{Quat, Vec2, Vec3};

/// Default lowest pitch in degrees
pub const DEFAULT_MIN_PITCH: f32 = -90.0;
/// Default highest pitch in degrees
pub const DEFAULT_MAX_PITCH: f32 = 90.0;

/// Sensitivity and inversion for both look axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookSettings {
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity_x: 25.0,
            sensitivity_y: 25.0,
            invert_x: false,
            invert_y: false,
        }
    }
}

/// Yaw/pitch state for a first-person view.
///
/// ## Usage
/// ```rust,ignore
/// let mut look = FpsLookController::new();
///
/// // Once per render step:
/// look.apply_look(&settings, input.look, delta_time);
///
/// body.rotation = look.body_rotation();
/// camera.local_rotation = look.camera_rotation();
/// ```
#[derive(Clone, Debug)]
pub struct FpsLookController {
    /// Body yaw in degrees, unbounded
    yaw: f32,
    /// Camera pitch in degrees, clamped to pitch_limits
    pitch: f32,
    /// Pitch limits (min, max) in degrees
    pitch_limits: (f32, f32),
}

impl Default for FpsLookController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            pitch_limits: (DEFAULT_MIN_PITCH, DEFAULT_MAX_PITCH),
        }
    }
}

impl FpsLookController {
    /// Create a look controller facing -Z with default pitch limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a look controller with custom pitch limits (degrees).
    pub fn with_pitch_limits(min: f32, max: f32) -> Self {
        Self {
            pitch_limits: (min.min(max), max.max(min)),
            ..Default::default()
        }
    }

    /// Body yaw in degrees.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Set body yaw directly (degrees).
    #[inline]
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Camera pitch in degrees.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set camera pitch directly (degrees, clamped to limits).
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Pitch limits (min, max) in degrees.
    #[inline]
    pub fn pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    /// Integrate one render step of look input.
    ///
    /// # Arguments
    /// * `settings` - Sensitivity and inversion
    /// * `delta` - Look delta (x = horizontal, y = vertical, up positive)
    /// * `dt` - Elapsed time in seconds
    pub fn apply_look(&mut self, settings: &LookSettings, delta: Vec2, dt: f32) {
        let dx = if settings.invert_x { -delta.x } else { delta.x };
        self.yaw += settings.sensitivity_x * dx * dt;

        // Looking up (positive dy) lowers pitch unless inverted
        let dy = if settings.invert_y { delta.y } else { -delta.y };
        self.pitch += settings.sensitivity_y * dy * dt;
        self.pitch = self.pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Body rotation about world up.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Camera rotation about its local right axis, relative to the body.
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Level forward direction of the body.
    pub fn body_forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::NEG_Z
    }

    /// Level right direction of the body.
    pub fn body_right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }

    /// World view direction including pitch.
    pub fn view_forward(&self) -> Vec3 {
        (self.body_rotation() * self.camera_rotation()) * Vec3::NEG_Z
    }

    /// Reset orientation to face -Z, level.
    pub fn reset_orientation(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}
