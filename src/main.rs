use orbsim::{bench_step, bench_step_curve};
use orbsim::{Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, relative paths resolve against the crate's scenarios/ directory
    #[arg(short, long, default_value = "default.yaml")]
    file_name: PathBuf,

    /// Run without a window and log a summary
    #[arg(long)]
    headless: bool,

    /// Frames simulated by a headless run
    #[arg(long, default_value_t = 600)]
    steps: usize,

    /// Host frame interval for a headless run, ms
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Time World::step instead of running a scenario
    #[arg(long)]
    bench: bool,

    /// With --bench, print a CSV curve
    #[arg(long)]
    curve: bool,
}

// load here to keep main clean
fn load_scenario(file_name: &Path) -> Result<ScenarioConfig> {
    let config_path = if file_name.is_absolute() || file_name.exists() {
        file_name.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("loading scenario {}", config_path.display()))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn run_headless(mut scenario: Scenario, steps: usize, frame_ms: f64) {
    let mass_before = scenario.world.total_mass();
    let count_before = scenario.world.len();

    for frame in 0..=steps {
        let timestamp_ms = frame as f64 * frame_ms;
        scenario.poll_spawners(timestamp_ms);
        scenario.world.tick(timestamp_ms);

        if frame > 0 && frame % 60 == 0 {
            info!(
                frame,
                bodies = scenario.world.len(),
                time = scenario.world.time(),
                "progress"
            );
        }
    }

    info!(
        bodies_before = count_before,
        bodies_after = scenario.world.len(),
        mass_before,
        mass_after = scenario.world.total_mass(),
        simulated_s = scenario.world.time(),
        "headless run finished"
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        init_tracing();
        if args.curve {
            bench_step_curve();
        } else {
            bench_step();
        }
        return Ok(());
    }

    let scenario_cfg = load_scenario(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        init_tracing();
        run_headless(scenario, args.steps, args.frame_ms);
        return Ok(());
    }

    #[cfg(feature = "viewer")]
    orbsim::run_2d(scenario);

    #[cfg(not(feature = "viewer"))]
    {
        init_tracing();
        tracing::warn!("built without the viewer feature, running headless");
        run_headless(scenario, args.steps, args.frame_ms);
    }

    Ok(())
}
