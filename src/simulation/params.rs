//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `g` (scaled working units, not SI),
//! - fixed step size `dt`,
//! - the real-time throttle `time_step_scale`,
//! - the singularity guard `min_separation`,
//! - whether a negative `dt` (time reversal) is accepted

use std::time::Duration;

use crate::error::{Result, SimError};

/// Default gravitational constant, 6.67408e2 in working units.
pub const DEFAULT_G: f64 = 6.67408e2;

/// Simulated time advanced per step.
pub const DEFAULT_DT: f64 = 0.017;

/// Pairs closer than this exert no force on each other.
pub const DEFAULT_MIN_SEPARATION: f64 = 1.0e-9;

/// Largest accepted `time_step_scale`, one tenth of a second between ticks.
pub const MAX_TIME_STEP_SCALE: f64 = 10.0;

/// One unit of `time_step_scale`, in wall-clock time.
pub const THROTTLE_UNIT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size
    pub time_step_scale: f64, // minimum wall-clock gap between ticks, in THROTTLE_UNITs, 0..=10
    pub min_separation: f64, // singularity guard, strictly positive
    pub time_reversal: bool, // accept dt < 0
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            dt: DEFAULT_DT,
            time_step_scale: 0.0,
            min_separation: DEFAULT_MIN_SEPARATION,
            time_reversal: false,
        }
    }
}

impl Parameters {
    /// Check every field; called before any state is touched.
    pub fn validate(&self) -> Result<()> {
        check_gravity(self.g)?;
        check_dt(self.dt, self.time_reversal)?;
        check_time_step_scale(self.time_step_scale)?;
        if !(self.min_separation > 0.0) || !self.min_separation.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "min_separation must be finite and positive, got {}",
                self.min_separation
            )));
        }
        Ok(())
    }

    /// Minimum wall-clock time that must pass between two ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(THROTTLE_UNIT.as_secs_f64() * self.time_step_scale)
            .unwrap_or(Duration::MAX)
    }
}

pub(crate) fn check_gravity(g: f64) -> Result<()> {
    if !g.is_finite() {
        return Err(SimError::InvalidParameter(format!(
            "gravitational constant must be finite, got {g}"
        )));
    }
    Ok(())
}

pub(crate) fn check_dt(dt: f64, time_reversal: bool) -> Result<()> {
    if !dt.is_finite() {
        return Err(SimError::InvalidParameter(format!(
            "dt must be finite, got {dt}"
        )));
    }
    if dt < 0.0 && !time_reversal {
        return Err(SimError::InvalidParameter(format!(
            "dt must be non-negative unless time reversal is enabled, got {dt}"
        )));
    }
    Ok(())
}

pub(crate) fn check_time_step_scale(scale: f64) -> Result<()> {
    if !(0.0..=MAX_TIME_STEP_SCALE).contains(&scale) {
        return Err(SimError::InvalidParameter(format!(
            "time_step_scale must be within 0..={MAX_TIME_STEP_SCALE}, got {scale}"
        )));
    }
    Ok(())
}
