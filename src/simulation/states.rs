//! Core state types for the N-body simulation.
//!
//! - `Body`   one simulated sphere (mass, radius, position, velocity)
//! - `System` the ordered body collection plus the current simulated time `t`
//!
//! Mass and radius are fixed once a body exists. Position and velocity are
//! plain values owned by the body; a renderer reads them, never the reverse.

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{Result, SimError};

pub type NVec3 = Vector3<f64>;

/// Largest accepted mass; the product of any two masses stays finite.
pub const MAX_MASS: f64 = 1.0e154;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    m: f64,      // mass
    radius: f64, // display radius, point mass for gravity
    x: NVec3,    // position (center of the sphere)
    v: NVec3,    // velocity
}

impl Body {
    /// Create a body, rejecting non-positive or non-finite radius and a mass
    /// outside `(0, MAX_MASS]`.
    pub fn new(mass: f64, radius: f64, position: NVec3, velocity: NVec3) -> Result<Self> {
        // `!(a > 0)` also catches NaN
        if !(mass > 0.0) || mass > MAX_MASS {
            return Err(SimError::InvalidParameter(format!(
                "mass must be within (0, {MAX_MASS:e}], got {mass}"
            )));
        }
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        if !finite(&position) {
            return Err(SimError::InvalidParameter(format!(
                "position must be finite, got {:?}",
                position.as_slice()
            )));
        }
        if !finite(&velocity) {
            return Err(SimError::InvalidParameter(format!(
                "velocity must be finite, got {:?}",
                velocity.as_slice()
            )));
        }

        Ok(Self {
            m: mass,
            radius,
            x: position,
            v: velocity,
        })
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> NVec3 {
        self.x
    }

    pub fn velocity(&self) -> NVec3 {
        self.v
    }

    pub fn set_velocity(&mut self, v: NVec3) {
        self.v = v;
    }

    pub fn set_position(&mut self, x: NVec3) {
        self.x = x;
    }

    pub fn momentum(&self) -> NVec3 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.x - self.x).norm()
    }
}

fn finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // ordered collection, index order fixes summation order
    pub t: f64,            // simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Append a body and return its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        let index = self.bodies.len() - 1;
        debug!(index, mass = self.bodies[index].mass(), "body added");
        index
    }

    /// Remove the body at `index`, shifting later bodies down by one.
    pub fn remove_body(&mut self, index: usize) -> Result<Body> {
        let len = self.bodies.len();
        if index >= len {
            return Err(SimError::BodyIndex { index, len });
        }
        let body = self.bodies.remove(index);
        debug!(index, remaining = self.bodies.len(), "body removed");
        Ok(body)
    }

    pub fn clear(&mut self) {
        debug!(removed = self.bodies.len(), "bodies cleared");
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .fold(NVec3::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Newtonian potential energy `-G m_i m_j / r` summed over unordered pairs.
    /// Pairs closer than `min_separation` are left out, matching the force law.
    pub fn potential_energy(&self, g: f64, min_separation: f64) -> f64 {
        let n = self.bodies.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let bi = &self.bodies[i];
                let bj = &self.bodies[j];
                let r = bi.distance_to(bj);
                if r == 0.0 || r < min_separation {
                    continue;
                }
                u -= g * bi.mass() * bj.mass() / r;
            }
        }
        u
    }

    /// Mass-weighted mean position, `None` for an empty system.
    pub fn center_of_mass(&self) -> Option<NVec3> {
        if self.bodies.is_empty() {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(NVec3::zeros(), |acc, b| acc + b.position() * b.mass());
        Some(weighted / self.total_mass())
    }
}
