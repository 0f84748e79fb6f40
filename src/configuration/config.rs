//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constant, step size and throttle
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 667.408              # gravitational constant (working units)
//!   dt: 0.017               # simulated time per step
//!   time_step_scale: 0      # throttle, units of 10 ms between ticks
//!   min_separation: 1.0e-9  # pairs closer than this exert no force
//!   time_reversal: false    # accept negative dt
//!
//! bodies:
//!   - mass: 1000.0
//!     radius: 50.0
//!     position: [ 0.0, 0.0, 0.0 ]
//!     velocity: [ 0.0, 0.0, 0.0 ]
//!   - mass: 1.0
//!     radius: 5.0
//!     position: [ 100.0, 0.0, 0.0 ]
//!     velocity: [ 0.0, 81.7, 0.0 ]
//! ```
//!
//! Every field is optional. Missing parameters take their runtime defaults,
//! missing vectors are zero, and a missing mass or radius falls back to
//! [`DEFAULT_BODY_MASS`] / [`DEFAULT_BODY_RADIUS`].

use serde::Deserialize;

/// Mass given to a body entry that omits it.
pub const DEFAULT_BODY_MASS: f64 = 500.0;

/// Radius given to a body entry that omits it.
pub const DEFAULT_BODY_RADIUS: f64 = 500.0;

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: Option<f64>, // gravitational constant
    pub dt: Option<f64>, // time step size
    pub time_step_scale: Option<f64>, // real-time throttle
    pub min_separation: Option<f64>, // singularity guard distance
    pub time_reversal: Option<bool>, // allow dt < 0
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub mass: Option<f64>,
    pub radius: Option<f64>, // display size only
    #[serde(default)]
    pub position: Vec<f64>, // [x, y, z], empty means origin
    #[serde(default)]
    pub velocity: Vec<f64>, // [vx, vy, vz], empty means at rest
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
