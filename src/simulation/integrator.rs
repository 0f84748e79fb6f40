//! Fixed-step semi-implicit (symplectic) Euler integration
//!
//! One step is three passes over the bodies:
//! 1. net force on every body from the positions at the start of the step,
//! 2. kick: `v += F / m * dt`,
//! 3. drift: `x += v * dt` with the velocity from pass 2.
//!
//! Positions are only written in pass 3, after every pairwise force has been
//! read, so later bodies never see an earlier body's new position.

use tracing::trace;

use super::forces::ForceSet;
use super::params::{check_dt, check_gravity, Parameters, DEFAULT_MIN_SEPARATION};
use super::states::{Body, NVec3, System};
use crate::error::Result;

/// Advance `bodies` by one step of `dt` under gravity with constant `g`.
///
/// Empty and single-body slices feel no force; a lone body still drifts.
/// A negative `dt` is rejected; use [`semi_implicit_euler`] with
/// `time_reversal` enabled to run backwards.
pub fn step(bodies: &mut [Body], dt: f64, g: f64) -> Result<()> {
    check_dt(dt, false)?;
    check_gravity(g)?;
    let forces = ForceSet::gravity(DEFAULT_MIN_SEPARATION);
    kick_drift(bodies, &forces, g, dt);
    Ok(())
}

/// Velocity pass only: `v_i += (F_i / m_i) * dt` for every body.
///
/// Positions are left untouched, for hosts that move bodies themselves.
pub fn update_velocities(bodies: &mut [Body], dt: f64, g: f64) -> Result<()> {
    check_dt(dt, false)?;
    check_gravity(g)?;
    let forces = ForceSet::gravity(DEFAULT_MIN_SEPARATION);
    kick(bodies, &forces, g, dt);
    Ok(())
}

/// Position pass only: `x_i += v_i * dt` for every body.
pub fn advance_positions(bodies: &mut [Body], dt: f64) -> Result<()> {
    check_dt(dt, false)?;
    drift(bodies, dt);
    Ok(())
}

/// Advance the system by one step with `params.dt` and the forces in `forces`.
/// Updates positions, velocities and `sys.t` in place.
pub fn semi_implicit_euler(sys: &mut System, forces: &ForceSet, params: &Parameters) -> Result<()> {
    // everything is validated before the first write
    params.validate()?;

    kick_drift(&mut sys.bodies, forces, params.g, params.dt);
    sys.t += params.dt;

    trace!(t = sys.t, n = sys.bodies.len(), "step");
    Ok(())
}

fn kick_drift(bodies: &mut [Body], forces: &ForceSet, g: f64, dt: f64) {
    kick(bodies, forces, g, dt);
    drift(bodies, dt);
}

fn kick(bodies: &mut [Body], forces: &ForceSet, g: f64, dt: f64) {
    if bodies.len() < 2 {
        return;
    }

    let mut net = vec![NVec3::zeros(); bodies.len()];
    forces.accumulate_forces(g, bodies, &mut net);

    for (b, f) in bodies.iter_mut().zip(net.iter()) {
        let a = *f / b.mass();
        b.set_velocity(b.velocity() + a * dt);
    }
}

fn drift(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        b.set_position(b.position() + b.velocity() * dt);
    }
}
