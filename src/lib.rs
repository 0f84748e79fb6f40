pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{Body, System, NVec3, MAX_MASS};
pub use simulation::params::{Parameters, DEFAULT_DT, DEFAULT_G, DEFAULT_MIN_SEPARATION, MAX_TIME_STEP_SCALE};
pub use simulation::forces::{pair_force, Force, ForceSet, NewtonianGravity};
pub use simulation::integrator::{advance_positions, semi_implicit_euler, step, update_velocities};
pub use simulation::engine::Simulation;

pub use configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::bench_step;
