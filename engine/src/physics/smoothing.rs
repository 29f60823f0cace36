//! Critically-damped smoothing
//!
//! Spring-style interpolation toward a target value that never overshoots.
//! Each smoothed quantity keeps its own velocity accumulator, which the caller
//! owns and passes back in on every step.
//!
//! The integration uses the usual polynomial approximation of `exp(-omega * dt)`
//! with `omega = 2 / smooth_time`, so the response is frame-rate independent
//! for small time steps.
//!
//! # Example
//!
//! ```rust,ignore
//! use strider_engine::physics::smoothing::smooth_damp;
//!
//! let mut height = 0.57;
//! let mut height_velocity = 0.0;
//!
//! // Each frame:
//! height = smooth_damp(height, 0.3, &mut height_velocity, 0.1, delta_time);
//! ```

use glam::Vec3;

/// Smallest smoothing time accepted; shorter values are clamped to this.
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Per-step decay factor for the given angular frequency and time step.
#[inline]
fn decay(omega: f32, dt: f32) -> f32 {
    let x = omega * dt;
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Smoothly move a scalar toward `target`.
///
/// # Arguments
/// * `current` - Current value
/// * `target` - Value to converge on
/// * `velocity` - Velocity accumulator, updated in place
/// * `smooth_time` - Approximate time to reach the target in seconds
/// * `dt` - Delta time in seconds
///
/// # Returns
/// The new value. A non-positive `dt` returns `current` unchanged.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Snap onto the target instead of passing it
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// Smoothly move a vector toward `target`.
///
/// Vector counterpart of [`smooth_damp`]. The overshoot check is done along the
/// direction of travel, so the vector never passes the target.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let change = current - target;
    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * exp;
    let mut output = target + (change + temp) * exp;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_single_step_matches_formula() {
        let mut velocity = 0.0;
        let dt = 1.0 / 60.0;
        let out = smooth_damp(0.0, 1.0, &mut velocity, 0.15, dt);

        let omega = 2.0 / 0.15;
        let x = omega * dt;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let temp = (omega * -1.0) * dt;
        let expected = 1.0 + (-1.0 + temp) * exp;

        assert!(approx_eq(out, expected));
        assert!(out > 0.0 && out < 1.0);
        assert!(velocity > 0.0);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        for _ in 0..600 {
            value = smooth_damp(value, 2.0, &mut velocity, 0.2, 1.0 / 60.0);
            assert!(value <= 2.0);
        }
        assert!(approx_eq(value, 2.0));
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut velocity = 3.0;
        let out = smooth_damp(1.0, 5.0, &mut velocity, 0.1, 0.0);
        assert_eq!(out, 1.0);
        assert_eq!(velocity, 3.0);
    }

    #[test]
    fn test_tiny_smooth_time_snaps_to_target() {
        let mut velocity = 0.0;
        let out = smooth_damp(0.0, 1.0, &mut velocity, 0.0, 0.1);
        assert!(approx_eq(out, 1.0));
    }

    #[test]
    fn test_vec3_matches_scalar_per_axis() {
        let mut scalar_velocity = 0.0;
        let mut vector_velocity = Vec3::ZERO;
        let dt = 0.02;

        let scalar = smooth_damp(0.0, 0.5, &mut scalar_velocity, 0.15, dt);
        let vector = smooth_damp_vec3(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 0.5),
            &mut vector_velocity,
            0.15,
            dt,
        );

        assert!(approx_eq(vector.z, scalar));
        assert!(approx_eq(vector_velocity.z, scalar_velocity));
        assert_eq!(vector.x, 0.0);
    }

    #[test]
    fn test_vec3_decays_to_zero() {
        let mut force = Vec3::new(0.0, 8.0, 0.0);
        let mut velocity = Vec3::ZERO;
        let mut previous = force.y;
        for _ in 0..1000 {
            force = smooth_damp_vec3(force, Vec3::ZERO, &mut velocity, 1.0, 1.0 / 60.0);
            assert!(force.y <= previous);
            assert!(force.y >= 0.0);
            previous = force.y;
        }
        assert!(force.length() < 0.01);
    }
}
