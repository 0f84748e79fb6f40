//! Force contributors for the n-body engine
//!
//! Defines the `Force` trait, a `ForceSet` that sums several of them, and
//! direct pairwise Newtonian gravity.

use crate::simulation::states::{Body, NVec3};

/// Collection of force terms.
/// Each term implements [`Force`] and their contributions are summed
/// into a single net force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Force set holding only direct Newtonian gravity
    pub fn gravity(min_separation: f64) -> Self {
        Self::new().with(NewtonianGravity { min_separation })
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute net forces on all `bodies`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != bodies.len()`.
    pub fn accumulate_forces(&self, g: f64, bodies: &[Body], out: &mut [NVec3]) {
        assert_eq!(
            bodies.len(),
            out.len(),
            "force buffer must hold one entry per body"
        );
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        for term in &self.terms {
            term.force(g, bodies, out);
        }
    }
}

/// A force source. Implementations add their contribution into `out[i]`
/// for each body and must only read positions, never velocities.
pub trait Force {
    fn force(&self, g: f64, bodies: &[Body], out: &mut [NVec3]);
}

/// Newtonian point-mass gravity, summed directly over all ordered pairs.
///
/// Bodies closer than `min_separation` exert no force on each other: the pair
/// is skipped instead of dividing by a vanishing distance. Coincident bodies
/// are skipped even when `min_separation` is zero, and so is a pair whose
/// force does not fit in an `f64`.
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub min_separation: f64,
}

impl Force for NewtonianGravity {
    fn force(&self, g: f64, bodies: &[Body], out: &mut [NVec3]) {
        let n = bodies.len();

        // Full i != j double loop: every body sums its neighbours in index
        // order, so the result per body does not depend on the other rows.
        for i in 0..n {
            let bi = &bodies[i];
            let xi = bi.position();
            let mi = bi.mass();

            let mut net = NVec3::zeros();
            for (j, bj) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }

                // d points from i to j, so i is pulled along +d
                let d = bj.position() - xi;
                if let Some(c) = coefficient(g, mi, bj.mass(), d.norm(), self.min_separation) {
                    net += d * c;
                }
            }
            out[i] += net;
        }
    }
}

/// Force on body `a` exerted by body `b` alone.
pub fn pair_force(g: f64, a: &Body, b: &Body, min_separation: f64) -> NVec3 {
    let d = b.position() - a.position();
    match coefficient(g, a.mass(), b.mass(), d.norm(), min_separation) {
        Some(c) => d * c,
        None => NVec3::zeros(),
    }
}

/// `G mi mj / r^3`, so that `d * c` is the force along the displacement `d`.
///
/// Each mass is divided by `r` before multiplying, keeping the intermediate
/// in range, and `(mi / r) * (mj / r)` is commutative in IEEE arithmetic,
/// so the two forces of a pair are exactly equal and opposite.
fn coefficient(g: f64, mi: f64, mj: f64, r: f64, min_separation: f64) -> Option<f64> {
    if r == 0.0 || r < min_separation {
        return None;
    }
    let f = g * ((mi / r) * (mj / r));
    let c = f / r;
    c.is_finite().then_some(c)
}
