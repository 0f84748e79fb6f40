use gravsim::{bench_step, ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Headless N-body gravity runner")]
struct Args {
    /// Scenario file; relative paths are looked up under `scenarios/`
    #[arg(short, long, default_value = "two_body.yaml")]
    file: PathBuf,

    /// Number of steps to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: usize,

    /// Time the step function for a range of body counts instead
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file: &Path) -> Result<ScenarioConfig> {
    let config_path = if file.is_absolute() || file.exists() {
        file.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };

    let f = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_reader(BufReader::new(f))
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file)?;
    let mut sim = Simulation::build_scenario(scenario_cfg).context("invalid scenario")?;

    let t_end = sim.run(args.steps)?;
    info!(steps = args.steps, t = t_end, "run finished");

    for (i, b) in sim.bodies().iter().enumerate() {
        let x = b.position();
        let v = b.velocity();
        println!(
            "body {i}: m = {:.4e}, x = [{:.6}, {:.6}, {:.6}], v = [{:.6}, {:.6}, {:.6}]",
            b.mass(),
            x.x, x.y, x.z,
            v.x, v.y, v.z
        );
    }

    Ok(())
}
