//! First-Person Controller
//!
//! Owns the look, motion and stance state of one avatar and advances them at
//! two rates:
//!
//! - [`FirstPersonController::fixed_update`] - once per fixed simulation step:
//!   translation, gravity and jump force, then the collision mover
//! - [`FirstPersonController::update`] - once per render step: action handling,
//!   jump cooldown, look, jump force decay and camera height smoothing
//!
//! The two phases never overlap. Input arrives as an [`InputSnapshot`] per
//! call, so no hidden state is shared with the input layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strider_engine::player::{ControllerConfig, FirstPersonController};
//!
//! let mut controller = FirstPersonController::new(ControllerConfig::default())?;
//!
//! // Fixed loop:
//! controller.fixed_update(FIXED_DT, &input.peek(), &mut mover);
//!
//! // Render loop:
//! let frame = controller.update(frame_dt, &input.drain(), &mover, &world);
//! camera.set_local(frame.view.camera_rotation, frame.view.camera_height);
//! ```

use glam::{Quat, Vec3};

use super::crouch::{Stance, StanceChange, StanceController, StanceProbe};
use super::movement_controller::{JumpOutcome, MotionStep, PlayerMovementController};
use super::settings::{ConfigError, ControllerConfig};
use crate::camera::{FpsLookController, LookSettings};
use crate::input::InputSnapshot;
use crate::physics::{CollisionMover, StanceValidator};

/// Outcomes of the actions handled in one render step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionReport {
    /// Result of the crouch action, if pressed
    pub crouch: Option<StanceChange>,
    /// Result of the jump action, if pressed
    pub jump: Option<JumpOutcome>,
}

/// Transforms produced for the host after a render step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Body rotation (yaw only)
    pub body_rotation: Quat,
    /// Camera rotation relative to the body (pitch only)
    pub camera_rotation: Quat,
    /// Camera offset along up, relative to the body
    pub camera_height: f32,
    /// Visual scale for the current stance
    pub visual_scale: Vec3,
}

/// Everything one render step produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Outcomes of the actions handled this step
    pub actions: ActionReport,
    /// Transforms after look and camera height smoothing
    pub view: ViewState,
}

/// The locomotion state machine for one first-person avatar.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    config: ControllerConfig,
    look: FpsLookController,
    motion: PlayerMovementController,
    stance: StanceController,
}

impl FirstPersonController {
    /// Build a controller from a validated configuration.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let look = FpsLookController::with_pitch_limits(config.min_pitch, config.max_pitch);
        let stance = StanceController::new(&config);
        Ok(Self {
            config,
            look,
            motion: PlayerMovementController::new(),
            stance,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Look state.
    pub fn look(&self) -> &FpsLookController {
        &self.look
    }

    /// Mutable look state, for spawning with a heading.
    pub fn look_mut(&mut self) -> &mut FpsLookController {
        &mut self.look
    }

    /// Motion state.
    pub fn motion(&self) -> &PlayerMovementController {
        &self.motion
    }

    /// Stance state.
    pub fn stance_controller(&self) -> &StanceController {
        &self.stance
    }

    /// Current stance.
    pub fn stance(&self) -> Stance {
        self.stance.stance()
    }

    /// Grounded flag from the last fixed step.
    pub fn is_grounded(&self) -> bool {
        self.motion.is_grounded()
    }

    /// Override the grounded flag (spawning, teleporting).
    pub fn set_grounded(&mut self, grounded: bool) {
        self.motion.set_grounded(grounded);
    }

    /// Current transforms for the host.
    pub fn view(&self) -> ViewState {
        ViewState {
            body_rotation: self.look.body_rotation(),
            camera_rotation: self.look.camera_rotation(),
            camera_height: self.stance.camera_height(),
            visual_scale: self.stance.visual_scale(),
        }
    }

    fn probe<M: CollisionMover + ?Sized>(&self, mover: &M) -> StanceProbe {
        StanceProbe::new(mover.foot_position(), mover.radius(), &self.config)
    }

    /// Crouch action: toggles stance if the overlap check allows it.
    pub fn crouch<M, V>(&mut self, mover: &M, validator: &V) -> StanceChange
    where
        M: CollisionMover + ?Sized,
        V: StanceValidator + ?Sized,
    {
        let probe = self.probe(mover);
        self.stance.toggle(&probe, validator, &self.config)
    }

    /// Jump action.
    ///
    /// Requires ground contact. A crouched player tries to stand up instead;
    /// a standing player jumps if the cooldown has elapsed.
    pub fn jump<M, V>(&mut self, mover: &M, validator: &V) -> JumpOutcome
    where
        M: CollisionMover + ?Sized,
        V: StanceValidator + ?Sized,
    {
        if !self.motion.is_grounded() {
            return JumpOutcome::NotGrounded;
        }

        match self.stance.stance() {
            Stance::Crouch => {
                let probe = self.probe(mover);
                match self.stance.try_stand(&probe, validator, &self.config) {
                    StanceChange::Changed(_) => JumpOutcome::StoodUp,
                    StanceChange::Blocked => JumpOutcome::Blocked,
                }
            }
            Stance::Stand => self.motion.try_jump(&self.config),
        }
    }

    /// Apply the action edges in `input`.
    ///
    /// Order: sprint press, sprint release, crouch, jump.
    pub fn handle_actions<M, V>(&mut self, input: &InputSnapshot, mover: &M, validator: &V) -> ActionReport
    where
        M: CollisionMover + ?Sized,
        V: StanceValidator + ?Sized,
    {
        if input.sprint_pressed {
            self.motion.toggle_sprint(input.forward(), &self.config);
        }
        if input.sprint_released {
            self.motion.release_sprint(&self.config);
        }

        let crouch = input.crouch.then(|| self.crouch(mover, validator));
        let jump = input.jump.then(|| self.jump(mover, validator));

        ActionReport { crouch, jump }
    }

    /// Render step: cooldown, actions, look, jump decay, camera height.
    pub fn update<M, V>(&mut self, dt: f32, input: &InputSnapshot, mover: &M, validator: &V) -> FrameReport
    where
        M: CollisionMover + ?Sized,
        V: StanceValidator + ?Sized,
    {
        self.motion.tick_cooldown(dt);
        let actions = self.handle_actions(input, mover, validator);

        let look_settings = LookSettings::from(&self.config.settings);
        self.look.apply_look(&look_settings, input.look, dt);
        self.motion.decay_jump_force(dt, &self.config);
        self.stance.update(dt, &self.config);

        FrameReport {
            actions,
            view: self.view(),
        }
    }

    /// Fixed step: integrate motion and submit it to the mover.
    pub fn fixed_update<M: CollisionMover + ?Sized>(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        mover: &mut M,
    ) -> MotionStep {
        let was_grounded = self.motion.is_grounded();
        let step = self.motion.fixed_step(
            dt,
            input.movement,
            self.stance.stance(),
            self.look.body_rotation(),
            &self.config,
            mover,
        );
        if was_grounded != step.grounded {
            tracing::trace!(grounded = step.grounded, "ground contact changed");
        }
        step
    }

    /// Reset motion, stance and orientation (respawn).
    pub fn reset(&mut self) {
        self.motion.reset();
        self.stance.reset(&self.config);
        self.look.reset_orientation();
    }
}
