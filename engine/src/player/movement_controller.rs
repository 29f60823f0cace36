//! Player Movement Controller
//!
//! Ground-relative locomotion for a capsule avatar: smoothed translation,
//! gravity accumulation, jump impulse with decay, sprint toggle and the jump
//! cooldown.
//!
//! # Motion Model
//!
//! Every fixed step produces one world-space displacement:
//!
//! 1. Movement intent selects a target local velocity (walk or sprint speeds,
//!    scaled by the airborne/crouch modifier).
//! 2. The current move vector is smooth-damped toward that target, with a
//!    separate smoothing time in the air.
//! 3. The vector is rotated into world space by the body yaw.
//! 4. The gravity accumulator and the decaying jump force are added.
//! 5. The collision mover applies the result and reports groundedness for the
//!    next step.
//!
//! The gravity accumulator is a per-step displacement, not an acceleration:
//! it drains toward `min_gravity` and then holds there, which caps fall speed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strider_engine::player::PlayerMovementController;
//!
//! let mut motion = PlayerMovementController::new();
//!
//! // Each fixed step:
//! let step = motion.fixed_step(dt, input.movement, stance, look.body_rotation(), &config, &mut mover);
//!
//! // Each render step:
//! motion.tick_cooldown(dt);
//! motion.decay_jump_force(dt, &config);
//! ```

use glam::{Quat, Vec2, Vec3};

use super::crouch::Stance;
use super::settings::ControllerConfig;
use crate::physics::{CollisionMover, smooth_damp_vec3};

/// Result of one fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    /// World-space displacement submitted to the mover
    pub displacement: Vec3,
    /// Grounded flag reported by the mover after the move
    pub grounded: bool,
    /// Speed modifier applied this step
    pub speed_modifier: f32,
    /// Sprint state used this step
    pub sprinting: bool,
}

/// Result of a jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Jump force applied
    Jumped,
    /// Crouched player stood up instead of jumping
    StoodUp,
    /// Crouched player could not stand up
    Blocked,
    /// Not on the ground
    NotGrounded,
    /// Previous jump still cooling down
    CoolingDown,
}

/// Motion state updated every fixed step.
#[derive(Debug, Clone)]
pub struct PlayerMovementController {
    /// Smoothed local move vector (x = right, z = back; per-step displacement)
    move_speed: Vec3,

    /// Smoothing velocity for move_speed
    move_speed_velocity: Vec3,

    /// Vertical displacement per step from gravity (negative = falling)
    gravity: f32,

    /// Residual jump impulse, decays while airborne
    jump_force: Vec3,

    /// Smoothing velocity for jump_force
    jump_force_velocity: Vec3,

    /// Grounded flag from the last mover call
    is_grounded: bool,

    /// Sprint toggle state
    is_sprinting: bool,

    /// Whether a new jump may trigger
    jump_ready: bool,

    /// Set by a jump, cleared when the cooldown expires
    jumping: bool,

    /// Seconds until the jump re-arms
    jump_cooldown_remaining: f32,
}

impl Default for PlayerMovementController {
    fn default() -> Self {
        Self {
            move_speed: Vec3::ZERO,
            move_speed_velocity: Vec3::ZERO,
            gravity: 0.0,
            jump_force: Vec3::ZERO,
            jump_force_velocity: Vec3::ZERO,
            is_grounded: false,
            is_sprinting: false,
            jump_ready: true,
            jumping: false,
            jump_cooldown_remaining: 0.0,
        }
    }
}

impl PlayerMovementController {
    /// Create a controller at rest, not yet grounded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed local move vector.
    pub fn move_speed(&self) -> Vec3 {
        self.move_speed
    }

    /// Gravity accumulator.
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Current jump force.
    pub fn jump_force(&self) -> Vec3 {
        self.jump_force
    }

    /// Check if the player is currently grounded.
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Set the grounded state directly (e.g. after a teleport).
    pub fn set_grounded(&mut self, grounded: bool) {
        self.is_grounded = grounded;
    }

    /// Whether sprint is active.
    pub fn is_sprinting(&self) -> bool {
        self.is_sprinting
    }

    /// Whether a jump can trigger (cooldown elapsed).
    pub fn is_jump_ready(&self) -> bool {
        self.jump_ready
    }

    /// True from a jump until its cooldown expires.
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Seconds left on the jump cooldown.
    pub fn jump_cooldown_remaining(&self) -> f32 {
        self.jump_cooldown_remaining
    }

    /// Handle the sprint action.
    ///
    /// Sprint needs forward intent above the threshold; otherwise it is forced off.
    pub fn toggle_sprint(&mut self, forward: f32, config: &ControllerConfig) {
        if forward <= config.sprint_threshold {
            self.is_sprinting = false;
            return;
        }
        self.is_sprinting = !self.is_sprinting;
    }

    /// Handle the sprint release action. Only stops sprint in hold mode.
    pub fn release_sprint(&mut self, config: &ControllerConfig) {
        if config.settings.sprint_hold {
            self.is_sprinting = false;
        }
    }

    /// Apply a jump if grounded and the cooldown has elapsed.
    ///
    /// Stance is the caller's concern: a crouched player stands up instead.
    pub fn try_jump(&mut self, config: &ControllerConfig) -> JumpOutcome {
        if !self.is_grounded {
            return JumpOutcome::NotGrounded;
        }
        if !self.jump_ready {
            return JumpOutcome::CoolingDown;
        }

        self.jump_force = Vec3::Y * config.settings.jump_height;
        self.gravity = 0.0;
        self.jumping = true;
        self.jump_ready = false;
        self.jump_cooldown_remaining = config.jump_cooldown;

        tracing::debug!(jump_force = self.jump_force.y, "jump");
        JumpOutcome::Jumped
    }

    /// Count the jump cooldown down. Re-arms on expiry whether or not grounded.
    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.jump_ready {
            return;
        }
        self.jump_cooldown_remaining -= dt;
        if self.jump_cooldown_remaining <= 0.0 {
            self.jump_cooldown_remaining = 0.0;
            self.jump_ready = true;
            self.jumping = false;
        }
    }

    /// Decay the jump force toward zero while airborne.
    pub fn decay_jump_force(&mut self, dt: f32, config: &ControllerConfig) {
        if self.is_grounded {
            return;
        }
        self.jump_force = smooth_damp_vec3(
            self.jump_force,
            Vec3::ZERO,
            &mut self.jump_force_velocity,
            config.settings.jump_falloff,
            dt,
        );
    }

    /// Speed modifier for the current ground state and stance.
    ///
    /// Airborne overrides crouch, crouch overrides the base of 1.0.
    pub fn speed_modifier(&self, stance: Stance, config: &ControllerConfig) -> f32 {
        if !self.is_grounded {
            config.settings.fall_speed_modifier
        } else if stance == Stance::Crouch {
            config.settings.crouch_speed_modifier
        } else {
            1.0
        }
    }

    /// Compute this step's world displacement without moving anything.
    ///
    /// # Arguments
    /// * `dt` - Fixed step in seconds
    /// * `movement` - Intent (x = strafe, y = forward), each in [-1, 1]
    /// * `stance` - Current stance
    /// * `body_rotation` - Body yaw rotation
    /// * `config` - Controller configuration
    ///
    /// # Returns
    /// The world displacement and the speed modifier used
    pub fn integrate(
        &mut self,
        dt: f32,
        movement: Vec2,
        stance: Stance,
        body_rotation: Quat,
        config: &ControllerConfig,
    ) -> (Vec3, f32) {
        let settings = &config.settings;

        if movement.y <= config.sprint_threshold {
            self.is_sprinting = false;
        }

        let (mut forward_speed, mut strafe_speed) = if self.is_sprinting {
            (settings.sprint_forward_speed, settings.sprint_strafe_speed)
        } else {
            (settings.walk_forward_speed, settings.walk_strafe_speed)
        };

        let modifier = self.speed_modifier(stance, config);
        forward_speed *= modifier;
        strafe_speed *= modifier;

        // Forward is -Z in local space
        let target = Vec3::new(
            strafe_speed * movement.x * dt,
            0.0,
            -forward_speed * movement.y * dt,
        );
        let smoothing = if self.is_grounded {
            settings.movement_smoothing
        } else {
            settings.fall_smoothing
        };
        self.move_speed =
            smooth_damp_vec3(self.move_speed, target, &mut self.move_speed_velocity, smoothing, dt);

        let mut displacement = body_rotation * self.move_speed;

        if self.gravity > config.min_gravity {
            self.gravity -= config.gravity * dt;
        }

        if self.gravity < config.grounded_gravity && self.is_grounded {
            tracing::debug!(fall = self.gravity, "landed");
            self.gravity = config.grounded_gravity;
            self.jump_force = Vec3::ZERO;
        }

        displacement.y += self.gravity;
        displacement += self.jump_force * dt;

        (displacement, modifier)
    }

    /// Run one fixed step: integrate, move, and record groundedness.
    pub fn fixed_step<M: CollisionMover + ?Sized>(
        &mut self,
        dt: f32,
        movement: Vec2,
        stance: Stance,
        body_rotation: Quat,
        config: &ControllerConfig,
        mover: &mut M,
    ) -> MotionStep {
        let (displacement, speed_modifier) =
            self.integrate(dt, movement, stance, body_rotation, config);
        self.is_grounded = mover.move_by(displacement);

        MotionStep {
            displacement,
            grounded: self.is_grounded,
            speed_modifier,
            sprinting: self.is_sprinting,
        }
    }

    /// Zero all motion and re-arm the jump.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
