use std::time::Instant;

use crate::error::Result;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

/// Helper to build a manual System of size `n`
pub fn make_system(n: usize) -> Result<System> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 500.0,
            (i_f * 0.13).cos() * 500.0,
            (i_f * 0.07).sin() * 500.0,
        );
        bodies.push(Body::new(1.0, 1.0, x, NVec3::zeros())?);
    }

    Ok(System::new(bodies))
}

/// Time the direct-sum step for a range of body counts.
/// Output is CSV so it can be pasted straight into a spreadsheet
pub fn bench_step() -> Result<()> {
    let ns = [10, 25, 50, 100, 200, 400, 800];
    let params = Parameters::default();
    let forces = ForceSet::gravity(params.min_separation);

    println!("N,step_us");
    for n in ns {
        let mut sys = make_system(n)?;
        // Fewer repetitions for large n, the loop is O(n^2)
        let steps = if n <= 100 { 1000 } else { 50 };

        // Warm up
        semi_implicit_euler(&mut sys, &forces, &params)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            semi_implicit_euler(&mut sys, &forces, &params)?;
        }
        let us = t0.elapsed().as_secs_f64() * 1.0e6 / steps as f64;

        println!("{},{:.3}", n, us);
    }
    Ok(())
}
