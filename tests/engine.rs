use std::time::{Duration, Instant};

use approx::assert_relative_eq;

use gravsim::configuration::config::{DEFAULT_BODY_MASS, DEFAULT_BODY_RADIUS};
use gravsim::{Body, NVec3, Parameters, ScenarioConfig, SimError, Simulation, DEFAULT_DT, DEFAULT_G};

fn body_at(m: f64, x: [f64; 3]) -> Body {
    Body::new(m, 1.0, x.into(), NVec3::zeros()).unwrap()
}

fn two_body_sim() -> Simulation {
    let mut sim = Simulation::new(Parameters::default()).unwrap();
    sim.add_body(body_at(10.0, [0.0, 0.0, 0.0]));
    sim.add_body(body_at(1.0, [50.0, 0.0, 0.0]));
    sim
}

// ==================================================================================
// Collection operations
// ==================================================================================

#[test]
fn default_parameters() {
    let p = Parameters::default();
    assert_eq!(p.g, 667.408);
    assert_eq!(p.g, DEFAULT_G);
    assert_eq!(p.dt, DEFAULT_DT);
    assert_eq!(p.time_step_scale, 0.0);
    assert!(!p.time_reversal);
    assert!(p.validate().is_ok());
}

#[test]
fn invalid_parameters_are_rejected() {
    let bad = [
        Parameters { g: f64::NAN, ..Parameters::default() },
        Parameters { dt: -1.0, ..Parameters::default() },
        Parameters { time_step_scale: -1.0, ..Parameters::default() },
        Parameters { min_separation: f64::INFINITY, ..Parameters::default() },
    ];
    for p in bad {
        assert!(matches!(Simulation::new(p), Err(SimError::InvalidParameter(_))));
    }
}

#[test]
fn add_remove_clear() {
    let mut sim = two_body_sim();
    assert_eq!(sim.bodies().len(), 2);

    let idx = sim.add_body(body_at(2.0, [0.0, 10.0, 0.0]));
    assert_eq!(idx, 2);

    let removed = sim.remove_body(0).unwrap();
    assert_eq!(removed.mass(), 10.0);
    assert_eq!(sim.bodies()[0].mass(), 1.0);
    assert_eq!(sim.bodies()[1].mass(), 2.0);

    assert_eq!(
        sim.remove_body(5).unwrap_err(),
        SimError::BodyIndex { index: 5, len: 2 }
    );

    sim.clear();
    assert!(sim.bodies().is_empty());
    sim.step().unwrap();
}

#[test]
fn step_and_run_advance_time() {
    let mut sim = two_body_sim();
    sim.step().unwrap();
    assert_relative_eq!(sim.time(), DEFAULT_DT);

    let t = sim.run(9).unwrap();
    assert_relative_eq!(t, 10.0 * DEFAULT_DT, max_relative = 1e-12);
    assert!(sim.bodies()[1].position().x < 50.0);
}

#[test]
fn gravitational_constant_change_applies_to_next_step() {
    let mut weak = two_body_sim();
    let mut strong = two_body_sim();
    weak.set_gravitational_constant(1.0).unwrap();
    strong.set_gravitational_constant(100.0).unwrap();

    weak.step().unwrap();
    strong.step().unwrap();
    assert_relative_eq!(
        strong.bodies()[1].velocity().norm() / weak.bodies()[1].velocity().norm(),
        100.0,
        max_relative = 1e-9
    );

    assert!(weak.set_gravitational_constant(f64::INFINITY).is_err());
    assert_eq!(weak.parameters().g, 1.0);

    // zero switches gravity off, nothing special about it
    weak.set_gravitational_constant(0.0).unwrap();
    let v = weak.bodies()[1].velocity();
    weak.step().unwrap();
    assert_eq!(weak.bodies()[1].velocity(), v);
}

// ==================================================================================
// Start / stop and throttling
// ==================================================================================

#[test]
fn tick_does_nothing_while_stopped() {
    let mut sim = two_body_sim();
    let t0 = Instant::now();
    assert!(!sim.tick(t0 + Duration::from_secs(1)).unwrap());
    assert_eq!(sim.time(), 0.0);
}

#[test]
fn tick_steps_once_interval_has_passed() {
    let mut sim = two_body_sim();
    let t0 = Instant::now();
    sim.start(t0);
    assert!(sim.is_running());

    // no time has passed yet
    assert!(!sim.tick(t0).unwrap());

    let t1 = t0 + Duration::from_millis(1);
    assert!(sim.tick(t1).unwrap());
    assert_relative_eq!(sim.time(), DEFAULT_DT);

    // 10 units of 10 ms
    sim.set_time_step_scale(10.0).unwrap();
    assert_eq!(sim.parameters().tick_interval(), Duration::from_millis(100));
    assert!(!sim.tick(t1 + Duration::from_millis(50)).unwrap());
    assert!(!sim.tick(t1 + Duration::from_millis(100)).unwrap());
    assert!(sim.tick(t1 + Duration::from_millis(101)).unwrap());

    // the throttle changes frequency, never the step size
    assert_relative_eq!(sim.time(), 2.0 * DEFAULT_DT);

    assert!(sim.set_time_step_scale(-1.0).is_err());
}

#[test]
fn toggle_flips_running_state() {
    let mut sim = two_body_sim();
    let t0 = Instant::now();
    assert!(sim.toggle(t0));
    assert!(sim.is_running());
    assert!(!sim.toggle(t0));
    assert!(!sim.is_running());

    sim.stop();
    assert!(!sim.tick(t0 + Duration::from_secs(1)).unwrap());
}

// ==================================================================================
// Scenario loading
// ==================================================================================

const SCENARIO: &str = r#"
parameters:
  G: 1.0
  dt: 0.01
bodies:
  - mass: 1000.0
    radius: 20.0
    position: [0.0, 0.0, 0.0]
  - mass: 1.0
    radius: 5.0
    position: [100.0, 0.0, 0.0]
    velocity: [0.0, 3.1622776601683795, 0.0]
"#;

#[test]
fn scenario_builds_simulation() {
    let cfg = ScenarioConfig::from_yaml_str(SCENARIO).unwrap();
    let sim = Simulation::build_scenario(cfg).unwrap();

    assert_eq!(sim.parameters().g, 1.0);
    assert_eq!(sim.parameters().dt, 0.01);
    assert_eq!(sim.parameters().time_step_scale, 0.0);
    assert_eq!(sim.bodies().len(), 2);
    assert_eq!(sim.bodies()[0].velocity(), NVec3::zeros());
    assert_eq!(sim.bodies()[1].position(), NVec3::new(100.0, 0.0, 0.0));
}

#[test]
fn scenario_defaults_missing_mass_and_radius() {
    let cfg = ScenarioConfig::from_yaml_str("bodies:\n  - position: [1.0, 2.0, 3.0]\n").unwrap();
    let sim = Simulation::build_scenario(cfg).unwrap();

    let b = &sim.bodies()[0];
    assert_eq!(b.mass(), DEFAULT_BODY_MASS);
    assert_eq!(b.radius(), DEFAULT_BODY_RADIUS);
    assert_eq!(sim.parameters(), &Parameters::default());
}

#[test]
fn scenario_rejects_bad_bodies() {
    let zero_mass = "bodies:\n  - mass: 0.0\n    radius: 1.0\n";
    let cfg = ScenarioConfig::from_yaml_str(zero_mass).unwrap();
    assert!(matches!(Simulation::build_scenario(cfg), Err(SimError::InvalidParameter(_))));

    let short_vec = "bodies:\n  - mass: 1.0\n    radius: 1.0\n    position: [1.0, 2.0]\n";
    let cfg = ScenarioConfig::from_yaml_str(short_vec).unwrap();
    assert!(matches!(Simulation::build_scenario(cfg), Err(SimError::InvalidParameter(_))));

    let negative_dt = "parameters:\n  dt: -0.1\n";
    let cfg = ScenarioConfig::from_yaml_str(negative_dt).unwrap();
    assert!(Simulation::build_scenario(cfg).is_err());

    assert!(ScenarioConfig::from_yaml_str("bodies:\n  - mas: 1.0\n").is_err());
}

#[test]
fn bundled_scenarios_load() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["two_body.yaml", "three_body.yaml"] {
        let file = std::fs::File::open(dir.join(name)).unwrap();
        let cfg = ScenarioConfig::from_reader(file).unwrap();
        let mut sim = Simulation::build_scenario(cfg).unwrap();
        sim.run(100).unwrap();
        assert!(sim
            .bodies()
            .iter()
            .all(|b| b.position().iter().all(|c| c.is_finite())));
    }
}

// ==================================================================================
// Custom force terms
// ==================================================================================

/// Constant push along +x, proportional to mass
struct UniformField(f64);

impl gravsim::Force for UniformField {
    fn force(&self, _g: f64, bodies: &[Body], out: &mut [NVec3]) {
        for (b, f) in bodies.iter().zip(out.iter_mut()) {
            *f += NVec3::new(self.0 * b.mass(), 0.0, 0.0);
        }
    }
}

#[test]
fn force_set_sums_all_terms() {
    let params = Parameters { g: 0.0, dt: 0.5, ..Parameters::default() };
    let forces = gravsim::ForceSet::gravity(params.min_separation).with(UniformField(2.0));
    assert_eq!(forces.len(), 2);

    let mut sim = Simulation::with_forces(params, forces).unwrap();
    sim.add_body(body_at(3.0, [0.0, 0.0, 0.0]));
    sim.add_body(body_at(7.0, [10.0, 0.0, 0.0]));
    sim.step().unwrap();

    // with G = 0 only the field acts: a = 2, v = 1, x = 0.5
    for (b, x0) in sim.bodies().iter().zip([0.0, 10.0]) {
        assert_relative_eq!(b.velocity(), NVec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(b.position().x, x0 + 0.5);
    }
}

// ==================================================================================
// Parameter ranges
// ==================================================================================

#[test]
fn time_step_scale_is_limited_to_slider_range() {
    let mut sim = two_body_sim();
    sim.set_time_step_scale(gravsim::MAX_TIME_STEP_SCALE).unwrap();
    assert_eq!(sim.parameters().tick_interval(), Duration::from_millis(100));

    assert!(sim.set_time_step_scale(10.5).is_err());
    assert!(sim.set_time_step_scale(f64::NAN).is_err());
    assert_eq!(sim.parameters().time_step_scale, gravsim::MAX_TIME_STEP_SCALE);

    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  time_step_scale: 1000\n").unwrap();
    assert!(matches!(Simulation::build_scenario(cfg), Err(SimError::InvalidParameter(_))));
}

#[test]
fn scenario_rejects_zero_min_separation() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  min_separation: 0\n").unwrap();
    assert!(matches!(Simulation::build_scenario(cfg), Err(SimError::InvalidParameter(_))));

    let p = Parameters { min_separation: 0.0, ..Parameters::default() };
    assert!(matches!(Simulation::new(p), Err(SimError::InvalidParameter(_))));
}
