//! Walkthrough - Headless Controller Demo
//!
//! Run with: `cargo run --bin walkthrough [config.json]`
//!
//! Drives a first-person controller through a scripted timeline in a small
//! static world: walk, sprint, jump, crouch into a low tunnel, try to stand
//! under the ceiling, then stand up again after leaving it. The fixed step
//! runs at 50 Hz while render frames arrive at uneven rates.
//!
//! Set `RUST_LOG=strider_engine=trace` to see every blocked stance probe.

use std::env;
use std::error::Error;

use glam::Vec3;
use strider_engine::physics::{Aabb, CollisionMask, CollisionMover, KinematicCapsule, StaticWorld};
use strider_engine::player::{JumpOutcome, StanceChange};
use strider_engine::{ControllerConfig, FirstPersonController, InputAccumulator, InputAction};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const FIXED_STEP_S: f32 = 1.0 / 50.0;
const MAX_FIXED_STEPS_PER_FRAME: usize = 8;
const CAPSULE_RADIUS: f32 = 0.4;
const RUN_TIME_S: f32 = 9.0;
const STATUS_INTERVAL_S: f32 = 0.5;

/// Uneven render frame times, cycled.
const FRAME_TIMES_S: [f32; 4] = [1.0 / 60.0, 1.0 / 144.0, 1.0 / 30.0, 1.0 / 75.0];

/// Tunnel ceiling: 1.5m clearance between z = -30 and z = -18.
const TUNNEL_MIN: Vec3 = Vec3::new(-3.0, 1.5, -30.0);
const TUNNEL_MAX: Vec3 = Vec3::new(3.0, 2.5, -18.0);

#[derive(Debug, Clone, Copy)]
enum Cue {
    Move { strafe: f32, forward: f32 },
    Look { dx: f32, dy: f32 },
    Press(InputAction),
}

/// (time in seconds, cue), sorted by time.
const TIMELINE: &[(f32, Cue)] = &[
    (0.0, Cue::Move { strafe: 0.0, forward: 1.0 }),
    (0.5, Cue::Press(InputAction::SprintPressed)),
    (1.0, Cue::Press(InputAction::Jump)),
    (1.8, Cue::Press(InputAction::Crouch)),
    (3.0, Cue::Press(InputAction::Jump)),
    (4.0, Cue::Press(InputAction::Jump)),
    (5.0, Cue::Press(InputAction::Jump)),
    (6.0, Cue::Press(InputAction::Jump)),
    (6.5, Cue::Look { dx: 40.0, dy: -10.0 }),
    (7.0, Cue::Press(InputAction::Crouch)),
    (7.5, Cue::Move { strafe: 0.0, forward: 0.0 }),
];

fn build_world() -> StaticWorld {
    let mut world = StaticWorld::new(0.0);
    world.add_blocker(Aabb::new(TUNNEL_MIN, TUNNEL_MAX), CollisionMask::layer(0));
    world
}

fn load_config() -> Result<ControllerConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => Ok(ControllerConfig::load(&path)?),
        None => {
            debug!("no config path given, using defaults");
            Ok(ControllerConfig::default())
        }
    }
}

fn apply_cue(input: &mut InputAccumulator, cue: Cue) {
    match cue {
        Cue::Move { strafe, forward } => input.set_movement(strafe, forward),
        Cue::Look { dx, dy } => input.set_look(dx, dy),
        Cue::Press(action) => input.trigger(action),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("===========================================");
    info!("   Strider - Controller Walkthrough");
    info!("===========================================");

    let config = load_config()?;
    let world = build_world();
    let mut body = KinematicCapsule::new(
        &world,
        Vec3::ZERO,
        CAPSULE_RADIUS,
        config.stand.collider_height,
    );
    let mut controller = FirstPersonController::new(config)?;
    let mut input = InputAccumulator::new();

    let mut time_s = 0.0_f32;
    let mut accumulator_s = 0.0_f32;
    let mut next_cue = 0usize;
    let mut next_status_s = 0.0_f32;
    let mut frame = 0usize;

    while time_s < RUN_TIME_S {
        let frame_dt = FRAME_TIMES_S[frame % FRAME_TIMES_S.len()];
        frame += 1;
        time_s += frame_dt;

        while let Some(&(at, cue)) = TIMELINE.get(next_cue) {
            if at > time_s {
                break;
            }
            debug!(t = time_s, ?cue, "cue");
            apply_cue(&mut input, cue);
            next_cue += 1;
        }

        // Fixed steps first, so actions see this frame's ground contact
        accumulator_s = (accumulator_s + frame_dt).min(FIXED_STEP_S * MAX_FIXED_STEPS_PER_FRAME as f32);
        let mut steps = 0usize;
        while accumulator_s >= FIXED_STEP_S && steps < MAX_FIXED_STEPS_PER_FRAME {
            controller.fixed_update(FIXED_STEP_S, &input.peek(), &mut body);
            accumulator_s -= FIXED_STEP_S;
            steps += 1;
        }

        let report = controller.update(frame_dt, &input.drain(), &body, &world);

        if let Some(change) = report.actions.crouch {
            match change {
                StanceChange::Changed(stance) => info!(t = time_s, ?stance, "stance changed"),
                StanceChange::Blocked => warn!(t = time_s, "not enough room to stand"),
            }
        }
        match report.actions.jump {
            Some(JumpOutcome::Jumped) => info!(t = time_s, "jump"),
            Some(JumpOutcome::StoodUp) => info!(t = time_s, "stood up"),
            Some(JumpOutcome::Blocked) => warn!(t = time_s, "jump blocked by ceiling"),
            Some(outcome) => debug!(t = time_s, ?outcome, "jump ignored"),
            None => {}
        }

        // Hitbox follows the active stance
        let collider_height = controller.config().profile(controller.stance()).collider_height;
        if (body.height() - collider_height).abs() > f32::EPSILON {
            body.set_height(collider_height);
        }

        if time_s >= next_status_s {
            next_status_s += STATUS_INTERVAL_S;
            let foot = body.foot_position();
            info!(
                t = %format!("{time_s:.2}"),
                pos = %format!("({:.2}, {:.2}, {:.2})", foot.x, foot.y, foot.z),
                stance = ?controller.stance(),
                grounded = controller.is_grounded(),
                sprinting = controller.motion().is_sprinting(),
                camera_height = %format!("{:.3}", report.view.camera_height),
                yaw = %format!("{:.1}", controller.look().yaw()),
                pitch = %format!("{:.1}", controller.look().pitch()),
                headroom = %format!("{:.2}", world.headroom(foot, 10.0)),
                "status"
            );
        }
    }

    let foot = body.foot_position();
    info!(
        frames = frame,
        final_pos = %format!("({:.2}, {:.2}, {:.2})", foot.x, foot.y, foot.z),
        stance = ?controller.stance(),
        "walkthrough complete"
    );
    Ok(())
}
