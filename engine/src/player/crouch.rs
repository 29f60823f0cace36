//! Player Stance System
//!
//! Stand/crouch state machine with collision-gated transitions and a smoothed
//! camera height.
//!
//! # Transitions
//!
//! - Stand -> Crouch: crouch action, refused if the crouch capsule overlaps geometry
//! - Crouch -> Stand: crouch action or jump action, refused if the stand capsule
//!   overlaps geometry (standing up under a low ceiling)
//!
//! A refused transition changes nothing. The stance itself switches instantly;
//! only the camera height lags behind, smoothed toward the active profile every
//! render step.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strider_engine::player::{StanceController, StanceProbe};
//!
//! let mut stance = StanceController::new(&config);
//!
//! // On crouch action:
//! let probe = StanceProbe::new(mover.foot_position(), mover.radius(), &config);
//! stance.toggle(&probe, &validator, &config);
//!
//! // Each render frame:
//! camera.local_height = stance.update(delta_time, &config);
//! ```

use glam::Vec3;

use super::settings::ControllerConfig;
use crate::physics::{CollisionMask, StanceValidator, smooth_damp};

/// Player posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stance {
    /// Standing upright
    #[default]
    Stand,
    /// Crouched
    Crouch,
}

/// Result of a stance change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceChange {
    /// Stance switched to the contained value
    Changed(Stance),
    /// Overlap check failed; stance unchanged
    Blocked,
}

/// Where and how to run the stance overlap check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceProbe {
    /// Capsule base in world space
    pub foot: Vec3,
    /// Capsule radius
    pub radius: f32,
    /// Shrink applied to both capsule ends
    pub margin: f32,
    /// Layers to test
    pub mask: CollisionMask,
}

impl StanceProbe {
    /// Probe at `foot` using the margin and mask from `config`.
    pub fn new(foot: Vec3, radius: f32, config: &ControllerConfig) -> Self {
        Self {
            foot,
            radius,
            margin: config.stance_error_margin,
            mask: config.collision_mask,
        }
    }

    /// Sphere centres of a capsule of `height` standing on the foot anchor.
    pub fn capsule(&self, height: f32) -> (Vec3, Vec3) {
        let start = self.foot + Vec3::Y * (self.radius + self.margin);
        let end = self.foot + Vec3::Y * (height - self.radius - self.margin);
        (start, end)
    }

    /// True if a capsule of `height` would overlap geometry.
    pub fn is_blocked<V: StanceValidator + ?Sized>(&self, validator: &V, height: f32) -> bool {
        let (start, end) = self.capsule(height);
        validator.overlaps_capsule(start, end, self.radius, self.mask)
    }
}

/// Stance state plus the smoothed camera height and visual scale.
#[derive(Debug, Clone)]
pub struct StanceController {
    /// Current stance
    stance: Stance,

    /// Smoothed camera height (local offset along up)
    camera_height: f32,

    /// Smoothing velocity for camera_height
    camera_height_velocity: f32,

    /// Visual scale, a side effect of stance only
    visual_scale: Vec3,
}

impl StanceController {
    /// Standing controller with the camera already at standing height.
    pub fn new(config: &ControllerConfig) -> Self {
        Self::with_camera_height(config, config.stand.camera_height)
    }

    /// Standing controller with the camera starting at `camera_height`.
    pub fn with_camera_height(config: &ControllerConfig, camera_height: f32) -> Self {
        Self {
            stance: Stance::Stand,
            camera_height,
            camera_height_velocity: 0.0,
            visual_scale: config.standing_scale,
        }
    }

    /// Get the current stance.
    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Smoothed camera height.
    pub fn camera_height(&self) -> f32 {
        self.camera_height
    }

    /// Camera height smoothing velocity.
    pub fn camera_height_velocity(&self) -> f32 {
        self.camera_height_velocity
    }

    /// Camera height the smoothing is converging on.
    pub fn target_camera_height(&self, config: &ControllerConfig) -> f32 {
        config.profile(self.stance).camera_height
    }

    /// Visual scale for the current stance.
    pub fn visual_scale(&self) -> Vec3 {
        self.visual_scale
    }

    /// True while the camera has not settled on the target height.
    pub fn is_transitioning(&self, config: &ControllerConfig) -> bool {
        (self.camera_height - self.target_camera_height(config)).abs() > 1e-4
    }

    /// Try to crouch. Refused when the crouch capsule overlaps geometry.
    pub fn try_crouch<V: StanceValidator + ?Sized>(
        &mut self,
        probe: &StanceProbe,
        validator: &V,
        config: &ControllerConfig,
    ) -> StanceChange {
        if probe.is_blocked(validator, config.crouch.collider_height) {
            tracing::trace!(foot = ?probe.foot, "crouch blocked");
            return StanceChange::Blocked;
        }
        self.stance = Stance::Crouch;
        self.visual_scale = config.crouched_scale;
        tracing::debug!("stance -> crouch");
        StanceChange::Changed(Stance::Crouch)
    }

    /// Try to stand up. Refused when the stand capsule overlaps geometry.
    pub fn try_stand<V: StanceValidator + ?Sized>(
        &mut self,
        probe: &StanceProbe,
        validator: &V,
        config: &ControllerConfig,
    ) -> StanceChange {
        if probe.is_blocked(validator, config.stand.collider_height) {
            tracing::trace!(foot = ?probe.foot, "stand blocked");
            return StanceChange::Blocked;
        }
        self.stance = Stance::Stand;
        self.visual_scale = config.standing_scale;
        tracing::debug!("stance -> stand");
        StanceChange::Changed(Stance::Stand)
    }

    /// Handle a crouch action: crouch when standing, stand when crouched.
    pub fn toggle<V: StanceValidator + ?Sized>(
        &mut self,
        probe: &StanceProbe,
        validator: &V,
        config: &ControllerConfig,
    ) -> StanceChange {
        match self.stance {
            Stance::Stand => self.try_crouch(probe, validator, config),
            Stance::Crouch => self.try_stand(probe, validator, config),
        }
    }

    /// Smooth the camera height toward the active profile.
    ///
    /// # Returns
    /// The new camera height
    pub fn update(&mut self, dt: f32, config: &ControllerConfig) -> f32 {
        let target = self.target_camera_height(config);
        self.camera_height = smooth_damp(
            self.camera_height,
            target,
            &mut self.camera_height_velocity,
            config.stance_smoothing,
            dt,
        );
        self.camera_height
    }

    /// Snap back to standing with the camera at standing height.
    ///
    /// Use this for teleportation or respawning.
    pub fn reset(&mut self, config: &ControllerConfig) {
        *self = Self::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Reports overlap for any capsule whose top sphere centre is above `ceiling`.
    struct Ceiling(f32);

    impl StanceValidator for Ceiling {
        fn overlaps_capsule(&self, start: Vec3, end: Vec3, radius: f32, _mask: CollisionMask) -> bool {
            start.y.max(end.y) + radius > self.0
        }
    }

    fn probe(config: &ControllerConfig) -> StanceProbe {
        StanceProbe::new(Vec3::ZERO, 0.5, config)
    }

    #[test]
    fn test_default_controller() {
        let config = ControllerConfig::default();
        let controller = StanceController::new(&config);
        assert_eq!(controller.stance(), Stance::Stand);
        assert!(approx_eq(controller.camera_height(), config.stand.camera_height));
        assert_eq!(controller.visual_scale(), config.standing_scale);
        assert!(!controller.is_transitioning(&config));
    }

    #[test]
    fn test_probe_capsule_geometry() {
        let config = ControllerConfig::default();
        let probe = StanceProbe::new(Vec3::new(1.0, 2.0, 3.0), 0.5, &config);
        let (start, end) = probe.capsule(1.8);
        assert!(approx_eq(start.y, 2.55));
        assert!(approx_eq(end.y, 3.25));
        assert_eq!(start.x, 1.0);
        assert_eq!(end.z, 3.0);
    }

    #[test]
    fn test_toggle_to_crouch() {
        let config = ControllerConfig::default();
        let mut controller = StanceController::new(&config);

        let change = controller.toggle(&probe(&config), &Ceiling(10.0), &config);
        assert_eq!(change, StanceChange::Changed(Stance::Crouch));
        assert_eq!(controller.visual_scale(), config.crouched_scale);
        assert!(controller.is_transitioning(&config));
    }

    #[test]
    fn test_crouch_blocked_leaves_state() {
        let config = ControllerConfig::default();
        let mut controller = StanceController::new(&config);

        // Even the crouch capsule does not fit
        let change = controller.toggle(&probe(&config), &Ceiling(1.0), &config);
        assert_eq!(change, StanceChange::Blocked);
        assert_eq!(controller.stance(), Stance::Stand);
        assert_eq!(controller.visual_scale(), config.standing_scale);
    }

    #[test]
    fn test_cannot_stand_under_low_ceiling() {
        let config = ControllerConfig::default();
        let mut controller = StanceController::new(&config);
        controller.toggle(&probe(&config), &Ceiling(1.5), &config);
        assert_eq!(controller.stance(), Stance::Crouch);

        let change = controller.toggle(&probe(&config), &Ceiling(1.5), &config);
        assert_eq!(change, StanceChange::Blocked);
        assert_eq!(controller.stance(), Stance::Crouch);
        assert_eq!(controller.visual_scale(), config.crouched_scale);
    }

    #[test]
    fn test_crouch_then_stand_round_trip() {
        let config = ControllerConfig::default();
        let mut controller = StanceController::new(&config);
        let validator = Ceiling(10.0);

        controller.toggle(&probe(&config), &validator, &config);
        controller.update(0.016, &config);
        controller.toggle(&probe(&config), &validator, &config);
        assert_eq!(controller.stance(), Stance::Stand);

        for _ in 0..200 {
            let height = controller.update(0.016, &config);
            assert!(height.is_finite());
        }
        assert!(approx_eq(controller.camera_height(), config.stand.camera_height));
    }

    #[test]
    fn test_camera_height_converges_to_crouch() {
        let config = ControllerConfig::default();
        let mut controller = StanceController::new(&config);
        controller.toggle(&probe(&config), &Ceiling(10.0), &config);

        let first = controller.update(0.016, &config);
        assert!(first < config.stand.camera_height);
        assert!(first > config.crouch.camera_height);

        for _ in 0..200 {
            controller.update(0.016, &config);
        }
        assert!(approx_eq(controller.camera_height(), config.crouch.camera_height));
        assert!(!controller.is_transitioning(&config));
    }

    #[test]
    fn test_reset() {
        let config = ControllerConfig::default();
        let mut controller = StanceController::new(&config);
        controller.toggle(&probe(&config), &Ceiling(10.0), &config);
        controller.reset(&config);

        assert_eq!(controller.stance(), Stance::Stand);
        assert!(approx_eq(controller.camera_height(), config.stand.camera_height));
        assert_eq!(controller.camera_height_velocity(), 0.0);
    }
}
