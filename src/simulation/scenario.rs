//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime
//! [`Simulation`] holding validated parameters and every body at t = 0.

use tracing::{info, warn};

use crate::configuration::config::{
    BodyConfig, ParametersConfig, ScenarioConfig, DEFAULT_BODY_MASS, DEFAULT_BODY_RADIUS,
};
use crate::error::{Result, SimError};
use crate::simulation::engine::Simulation;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

impl Simulation {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let parameters = parameters_from_config(&cfg.parameters);
        let mut sim = Simulation::new(parameters)?;

        for (i, bc) in cfg.bodies.iter().enumerate() {
            let body = body_from_config(i, bc)?;
            sim.add_body(body);
        }

        info!(
            bodies = sim.bodies().len(),
            g = sim.parameters().g,
            dt = sim.parameters().dt,
            "scenario built"
        );
        Ok(sim)
    }
}

/// Overlay the configured values onto `Parameters::default()`.
pub fn parameters_from_config(p_cfg: &ParametersConfig) -> Parameters {
    let defaults = Parameters::default();
    Parameters {
        g: p_cfg.g.unwrap_or(defaults.g),
        dt: p_cfg.dt.unwrap_or(defaults.dt),
        time_step_scale: p_cfg.time_step_scale.unwrap_or(defaults.time_step_scale),
        min_separation: p_cfg.min_separation.unwrap_or(defaults.min_separation),
        time_reversal: p_cfg.time_reversal.unwrap_or(defaults.time_reversal),
    }
}

/// Map one `BodyConfig` to a runtime `Body`; `index` is only used in messages.
pub fn body_from_config(index: usize, bc: &BodyConfig) -> Result<Body> {
    let mass = bc.mass.unwrap_or_else(|| {
        warn!(index, default = DEFAULT_BODY_MASS, "body has no mass, using default");
        DEFAULT_BODY_MASS
    });
    let radius = bc.radius.unwrap_or_else(|| {
        warn!(index, default = DEFAULT_BODY_RADIUS, "body has no radius, using default");
        DEFAULT_BODY_RADIUS
    });
    let position = vec3(index, "position", &bc.position)?;
    let velocity = vec3(index, "velocity", &bc.velocity)?;

    Body::new(mass, radius, position, velocity).map_err(|e| match e {
        SimError::InvalidParameter(msg) => SimError::InvalidParameter(format!("body {index}: {msg}")),
        other => other,
    })
}

fn vec3(index: usize, field: &str, v: &[f64]) -> Result<NVec3> {
    match v {
        [] => Ok(NVec3::zeros()),
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidParameter(format!(
            "body {index}: {field} needs 3 components, got {}",
            v.len()
        ))),
    }
}
