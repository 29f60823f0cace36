//! Player Settings
//!
//! Tunables for the first-person controller. Everything here is read-only
//! once the controller is built; per-step values such as the active speed
//! modifier are derived from these and never written back.
//!
//! Configuration is stored as JSON:
//!
//! ```rust,ignore
//! use strider_engine::player::ControllerConfig;
//!
//! let config = ControllerConfig::load("player.json")?;
//! config.save("player.json")?;
//! ```
//!
//! Missing fields fall back to their defaults, so a partial file only needs
//! the values it overrides.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::crouch::Stance;
use crate::camera::LookSettings;
use crate::physics::CollisionMask;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Look, movement, jump and speed-modifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    // View
    /// Yaw degrees per second per unit of horizontal look input
    pub look_x_sensitivity: f32,
    /// Pitch degrees per second per unit of vertical look input
    pub look_y_sensitivity: f32,
    pub look_x_inverted: bool,
    pub look_y_inverted: bool,

    // Movement
    /// Smoothing time while grounded, in seconds
    pub movement_smoothing: f32,
    /// Smoothing time while airborne, in seconds
    pub fall_smoothing: f32,
    /// Sprint stops when the sprint key is released
    pub sprint_hold: bool,

    // Walk
    pub walk_forward_speed: f32,
    /// Kept in the file format; backward motion uses `walk_forward_speed`
    pub walk_backward_speed: f32,
    pub walk_strafe_speed: f32,

    // Sprint
    pub sprint_forward_speed: f32,
    pub sprint_strafe_speed: f32,

    // Jump
    /// Initial jump force magnitude along up
    pub jump_height: f32,
    /// Smoothing time for jump force decay while airborne
    pub jump_falloff: f32,

    // Speed modifiers
    pub crouch_speed_modifier: f32,
    pub fall_speed_modifier: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            look_x_sensitivity: 25.0,
            look_y_sensitivity: 25.0,
            look_x_inverted: false,
            look_y_inverted: false,
            movement_smoothing: 0.15,
            fall_smoothing: 0.4,
            sprint_hold: false,
            walk_forward_speed: 10.0,
            walk_backward_speed: 5.0,
            walk_strafe_speed: 7.0,
            sprint_forward_speed: 15.0,
            sprint_strafe_speed: 12.0,
            jump_height: 8.0,
            jump_falloff: 1.0,
            crouch_speed_modifier: 0.6,
            fall_speed_modifier: 0.4,
        }
    }
}

impl From<&PlayerSettings> for LookSettings {
    fn from(settings: &PlayerSettings) -> Self {
        Self {
            sensitivity_x: settings.look_x_sensitivity,
            sensitivity_y: settings.look_y_sensitivity,
            invert_x: settings.look_x_inverted,
            invert_y: settings.look_y_inverted,
        }
    }
}

/// Per-stance camera and collider reference heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceProfile {
    /// Camera offset along up, local to the body
    pub camera_height: f32,
    /// Capsule height checked for overlap before entering this stance
    pub collider_height: f32,
}

impl StanceProfile {
    pub const STAND: Self = Self {
        camera_height: 0.57,
        collider_height: 1.8,
    };

    pub const CROUCH: Self = Self {
        camera_height: 0.3,
        collider_height: 1.2,
    };
}

/// Full controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub settings: PlayerSettings,

    /// Lowest camera pitch in degrees
    pub min_pitch: f32,
    /// Highest camera pitch in degrees
    pub max_pitch: f32,

    /// Gravity accumulator decrement per second
    pub gravity: f32,
    /// Gravity stops accumulating once the accumulator falls to this value
    pub min_gravity: f32,
    /// Accumulator value restored on landing
    pub grounded_gravity: f32,

    /// Forward intent a sprint needs to exceed
    pub sprint_threshold: f32,
    /// Time before another jump can trigger, in seconds
    pub jump_cooldown: f32,

    pub stand: StanceProfile,
    pub crouch: StanceProfile,
    /// Camera height smoothing time, in seconds
    pub stance_smoothing: f32,
    /// Shrinks the overlap probe at both ends so resting contact does not count
    pub stance_error_margin: f32,
    /// Layers the stance overlap probe tests against
    pub collision_mask: CollisionMask,

    /// Visual scale while standing
    pub standing_scale: Vec3,
    /// Visual scale while crouched
    pub crouched_scale: Vec3,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            settings: PlayerSettings::default(),
            min_pitch: -90.0,
            max_pitch: 90.0,
            gravity: 0.1,
            min_gravity: -0.1,
            grounded_gravity: -0.1,
            sprint_threshold: 0.2,
            jump_cooldown: 0.25,
            stand: StanceProfile::STAND,
            crouch: StanceProfile::CROUCH,
            stance_smoothing: 0.1,
            stance_error_margin: 0.05,
            collision_mask: CollisionMask::ALL,
            standing_scale: Vec3::new(1.0, 1.5, 1.0),
            crouched_scale: Vec3::ONE,
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is not a finite number"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must not be negative"),
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be greater than zero"),
        });
    }
    Ok(())
}

impl ControllerConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded controller config");
        Ok(config)
    }

    /// Write the configuration as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Check that every value is usable by the controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.settings;

        finite("look_x_sensitivity", s.look_x_sensitivity)?;
        finite("look_y_sensitivity", s.look_y_sensitivity)?;
        non_negative("movement_smoothing", s.movement_smoothing)?;
        non_negative("fall_smoothing", s.fall_smoothing)?;
        non_negative("walk_forward_speed", s.walk_forward_speed)?;
        non_negative("walk_backward_speed", s.walk_backward_speed)?;
        non_negative("walk_strafe_speed", s.walk_strafe_speed)?;
        non_negative("sprint_forward_speed", s.sprint_forward_speed)?;
        non_negative("sprint_strafe_speed", s.sprint_strafe_speed)?;
        finite("jump_height", s.jump_height)?;
        non_negative("jump_falloff", s.jump_falloff)?;
        non_negative("crouch_speed_modifier", s.crouch_speed_modifier)?;
        non_negative("fall_speed_modifier", s.fall_speed_modifier)?;

        finite("min_pitch", self.min_pitch)?;
        finite("max_pitch", self.max_pitch)?;
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::Invalid {
                field: "min_pitch",
                reason: format!(
                    "{} is above max_pitch {}",
                    self.min_pitch, self.max_pitch
                ),
            });
        }

        finite("gravity", self.gravity)?;
        finite("min_gravity", self.min_gravity)?;
        finite("grounded_gravity", self.grounded_gravity)?;
        finite("sprint_threshold", self.sprint_threshold)?;
        non_negative("jump_cooldown", self.jump_cooldown)?;

        finite("stand.camera_height", self.stand.camera_height)?;
        finite("crouch.camera_height", self.crouch.camera_height)?;
        positive("stand.collider_height", self.stand.collider_height)?;
        positive("crouch.collider_height", self.crouch.collider_height)?;
        non_negative("stance_smoothing", self.stance_smoothing)?;
        non_negative("stance_error_margin", self.stance_error_margin)?;

        Ok(())
    }

    /// Profile for `stance`.
    pub fn profile(&self, stance: Stance) -> &StanceProfile {
        match stance {
            Stance::Stand => &self.stand,
            Stance::Crouch => &self.crouch,
        }
    }
}
