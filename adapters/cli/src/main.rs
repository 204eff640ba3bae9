#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that reads a balloon routing problem, plans the fleet
//! and writes the resulting action program.

mod problem_format;
mod program_format;
mod settings;

use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use loon_system_evaluation::Evaluation;
use loon_system_scheduler::Scheduler;
use loon_world::{query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::Settings;

/// Plans altitude changes for a fleet of stratospheric balloons.
#[derive(Debug, Parser)]
#[command(name = "loon", version)]
struct CliArgs {
    /// Problem instance to solve; read from stdin when omitted.
    input: Option<PathBuf>,
    /// Destination for the action program; written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// TOML file providing `seed`, `bands`, `journeys_per_band` and `turns_lag`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the random source.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of latitude bands to sample.
    #[arg(long)]
    bands: Option<usize>,
    /// Probe journeys drawn per band.
    #[arg(long = "journeys")]
    journeys_per_band: Option<usize>,
    /// Launch stagger unit in turns.
    #[arg(long)]
    turns_lag: Option<usize>,
}

impl CliArgs {
    fn overrides(&self) -> Settings {
        Settings {
            seed: self.seed,
            bands: self.bands,
            journeys_per_band: self.journeys_per_band,
            turns_lag: self.turns_lag,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .overridden_by(args.overrides());

    let text = read_input(args.input.as_ref())?;
    let instance = problem_format::parse(&text).context("failed to parse problem instance")?;
    let world = World::new(&instance);

    let dimensions = query::dimensions(&world);
    let mission = query::mission(&world);
    info!(
        rows = dimensions.rows(),
        columns = dimensions.columns(),
        altitudes = dimensions.altitudes(),
        targets = instance.targets().len(),
        balloons = mission.balloon_count(),
        turns = mission.turn_count(),
        "loaded problem instance"
    );

    let seed = settings.seed();
    let config = settings.scheduler_config();
    info!(seed, ?config, "planning fleet");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let program = Scheduler::new(config).plan(&world, &mut rng).into_program();

    match Evaluation.replay(&world, &program) {
        Ok(report) => info!(
            score = report.score(),
            balloons_aloft = report.balloons_aloft(),
            "evaluated program"
        ),
        Err(error) => warn!(%error, "program failed evaluation"),
    }

    write_output(args.output.as_ref(), &program_format::render(&program))
}

/// Installs a stderr subscriber so stdout carries only the program.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read problem from {}", path.display())),
        None => {
            let mut text = String::new();
            let _ = io::stdin()
                .read_to_string(&mut text)
                .context("failed to read problem from stdin")?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&PathBuf>, program: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, program)
            .with_context(|| format!("failed to write program to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(program.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write program to stdout")
        }
    }
}
