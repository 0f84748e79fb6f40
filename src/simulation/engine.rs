//! Runtime engine that owns the body collection
//!
//! `Simulation` bundles the system state, parameters and force set, and
//! exposes the operations a front end needs: add/remove/clear bodies,
//! start/stop, live `G` and throttle changes, and a throttled `tick` meant
//! to be called once per rendered frame.

use std::time::Instant;

use tracing::debug;

use super::forces::ForceSet;
use super::integrator::semi_implicit_euler;
use super::params::{check_gravity, check_time_step_scale, Parameters};
use super::states::{Body, System};
use crate::error::Result;

pub struct Simulation {
    pub system: System,
    parameters: Parameters,
    forces: ForceSet,
    running: bool,
    last_tick: Option<Instant>, // wall-clock time of the last throttled step
}

impl Simulation {
    /// Empty simulation driven by direct Newtonian gravity.
    pub fn new(parameters: Parameters) -> Result<Self> {
        parameters.validate()?;
        let forces = ForceSet::gravity(parameters.min_separation);
        Ok(Self {
            system: System::default(),
            parameters,
            forces,
            running: false,
            last_tick: None,
        })
    }

    /// Simulation with a caller-supplied force set.
    pub fn with_forces(parameters: Parameters, forces: ForceSet) -> Result<Self> {
        let mut sim = Self::new(parameters)?;
        sim.forces = forces;
        Ok(sim)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn add_body(&mut self, body: Body) -> usize {
        self.system.add_body(body)
    }

    pub fn remove_body(&mut self, index: usize) -> Result<Body> {
        self.system.remove_body(index)
    }

    pub fn clear(&mut self) {
        self.system.clear();
    }

    /// Takes effect on the next step.
    pub fn set_gravitational_constant(&mut self, g: f64) -> Result<()> {
        check_gravity(g)?;
        debug!(g, "gravitational constant changed");
        self.parameters.g = g;
        Ok(())
    }

    /// Changes how often `tick` steps, never how far each step goes.
    pub fn set_time_step_scale(&mut self, scale: f64) -> Result<()> {
        check_time_step_scale(scale)?;
        debug!(scale, "time step scale changed");
        self.parameters.time_step_scale = scale;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now: Instant) {
        if !self.running {
            debug!(t = self.system.t, "simulation started");
        }
        self.running = true;
        self.last_tick = Some(now);
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!(t = self.system.t, "simulation stopped");
        }
        self.running = false;
    }

    /// Flip between running and stopped; returns the new running state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
        self.running
    }

    /// Advance one step if running and more than `tick_interval` has passed
    /// since the previous step. Returns whether a step was taken.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        let last = *self.last_tick.get_or_insert(now);
        if now.saturating_duration_since(last) <= self.parameters.tick_interval() {
            return Ok(false);
        }
        self.step()?;
        self.last_tick = Some(now);
        Ok(true)
    }

    /// Advance one step regardless of the running flag.
    pub fn step(&mut self) -> Result<()> {
        semi_implicit_euler(&mut self.system, &self.forces, &self.parameters)
    }

    /// Advance `n_steps` steps and return the final simulated time.
    pub fn run(&mut self, n_steps: usize) -> Result<f64> {
        for _ in 0..n_steps {
            self.step()?;
        }
        Ok(self.system.t)
    }
}
