//! Colony CLI - headless driver for the task scheduler.
//!
//! - `colony run` - simulate a scenario and print what every creature is doing
//! - `colony init` - write a default scenario file

mod hunger;
mod jobs;
mod scenario;
mod sim;
mod world;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use scenario::ScenarioConfig;
use sim::Simulation;

#[derive(Parser)]
#[command(name = "colony")]
#[command(about = "Colony task scheduler simulation", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario file (YAML); built-in defaults when omitted
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Override the number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write trace events as JSON lines
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Write the default scenario to a file
    Init {
        #[arg(default_value = "scenario.yaml")]
        path: PathBuf,
    },
}

/// `RUST_LOG` wins when it parses; otherwise `--verbose` picks debug over info.
fn log_filter(verbose: bool, from_env: Option<String>) -> EnvFilter {
    from_env
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(log_filter(cli.verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            seed,
            trace,
        } => run_scenario(scenario.as_deref(), ticks, seed, trace.as_deref()),
        Commands::Init { path } => init_scenario(&path),
    }
}

fn run_scenario(path: Option<&Path>, ticks: Option<u64>, seed: Option<u64>, trace: Option<&Path>) -> Result<()> {
    let mut config = ScenarioConfig::load_or_default(path)?;
    if let Some(ticks) = ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if trace.is_some() {
        config.trace = true;
    }

    tracing::info!(ticks = config.ticks, seed = config.seed, "Starting simulation");

    let mut sim = Simulation::new(&config);
    while sim.tick() < config.ticks {
        sim.step()?;
        if config.report_every > 0 && sim.tick() % config.report_every == 0 {
            println!("{}", sim.report());
        }
    }

    let summary = sim.summary();
    println!();
    println!("Colony Summary");
    println!("==============");
    println!("Ticks:         {}", summary.ticks);
    println!("Trees left:    {}", summary.trees_left);
    println!("Wood stocked:  {}", summary.wood_stocked);
    println!("Food left:     {}", summary.food_left);
    println!("Starved:       {}", summary.starved);
    println!("Pooled tasks:  {}", summary.pooled_tasks);

    if let Some(trace_path) = trace {
        write_trace(&sim, trace_path)?;
    }
    Ok(())
}

fn write_trace(sim: &Simulation, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create trace file {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    let events = sim.trace_events();
    for event in &events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    out.flush()?;
    tracing::info!(events = events.len(), path = %path.display(), "Trace written");
    Ok(())
}

fn init_scenario(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, leaving it alone", path.display());
        return Ok(());
    }
    let yaml = ScenarioConfig::default().to_yaml()?;
    std::fs::write(path, format!("# Colony scenario\n\n{yaml}"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default scenario to {}", path.display());
    println!();
    println!("Next step:");
    println!("  colony run --scenario {}", path.display());
    Ok(())
}
