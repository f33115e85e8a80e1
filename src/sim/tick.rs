//! Fixed timestep session tick
//!
//! One `tick` call advances the session by exactly one fixed step. The
//! platform loop owns the wall clock and uses `FrameClock` to decide how
//! many steps each rendered frame is worth.

use glam::Vec3;

use super::state::{EndReason, GamePhase, Outcome, Session};
use crate::consts::{FIXED_TIMESTEP, WORLD_HALF_WIDTH};

/// Input for a single tick, as boolean held/pressed queries. The core
/// never sees raw platform events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Start control (pressed): leaves the pre-launch phase.
    pub start: bool,
    /// Left thrust (held).
    pub thrust_left: bool,
    /// Right thrust (held).
    pub thrust_right: bool,
}

/// Advance the session by one fixed step.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    match session.phase {
        GamePhase::PreLaunch => {
            if input.start {
                log::info!("descent started (seed {})", session.seed);
                session.phase = GamePhase::Descending;
            }
            return;
        }
        // Terminal states are sticky: the player gets no further updates.
        GamePhase::Ended(_) => return,
        GamePhase::Descending => {}
    }

    session.time_ticks += 1;

    // Thrust drives movement intent and burns fuel; an empty tank leaves
    // the ship coasting. With no thrust the ship points back up.
    session.player.movement = Vec3::ZERO;
    if input.thrust_left && session.fuel > 0.0 {
        session.player.move_left();
        session.burn_fuel(dt);
    } else if input.thrust_right && session.fuel > 0.0 {
        session.player.move_right();
        session.burn_fuel(dt);
    } else {
        session.player.face_up();
    }
    session.player.normalize_movement();

    let outcome = session.player.update(dt, &session.collidables);

    match outcome {
        Outcome::LandedSafely => session.end(EndReason::Landed),
        Outcome::CrashedOnPlatform => session.end(EndReason::CrashedPlatform),
        Outcome::CrashedOnHazard => session.end(EndReason::CrashedHazard),
        Outcome::OutOfBounds => session.end(EndReason::OutOfBounds),
        Outcome::Continue => {
            if session.player.position.x.abs() > WORLD_HALF_WIDTH {
                session.end(EndReason::OutOfBounds);
            } else if session.fuel <= 0.0
                && session.player.velocity.y < -session.tuning.safe_landing_speed
            {
                // Falling faster than the ship could ever brake for, with
                // nothing left to brake with.
                session.end(EndReason::FuelExhausted);
            }
        }
    }
}

/// Fixed-timestep accumulator.
///
/// Wall-clock deltas are added to a carry-over accumulator; whole fixed
/// steps are drained out and the remainder carries to the next frame.
/// Simulation therefore advances by the same step sequence regardless of
/// rendering frame rate.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's wall time and return how many fixed steps to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        steps
    }

    /// Leftover time carried to the next frame, always in
    /// `[0, FIXED_TIMESTEP)`.
    pub fn leftover(&self) -> f32 {
        self.accumulator
    }
}
