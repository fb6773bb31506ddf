mod render;

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use drone_survey_core::{loader, Drone, Grid, NoopObserver, RunReport, SimConfig, WallClock};
use render::{print_summary, ConsoleRenderer};

/// Survey a grid of regenerating planes with a greedy drone.
#[derive(Parser, Debug)]
#[command(name = "drone-survey", version)]
struct Args {
    /// Grid side length (supported: 20, 100, 1000).
    #[arg(long, default_value_t = 20)]
    grid_size: usize,

    /// Maximum number of steps for the run.
    #[arg(long, default_value_t = 20)]
    max_steps: usize,

    /// Wall-clock budget in milliseconds.
    #[arg(long, default_value_t = 3000)]
    time_budget_ms: u64,

    /// Starting x coordinate.
    #[arg(long, default_value_t = 0)]
    start_x: usize,

    /// Starting y coordinate.
    #[arg(long, default_value_t = 0)]
    start_y: usize,

    /// Seed for the generated grid (ignored with --grid-file).
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Load plane values from a whitespace-separated text file instead of
    /// generating them.
    #[arg(long)]
    grid_file: Option<PathBuf>,

    /// Emit the run report as JSON and nothing else.
    #[arg(long)]
    json: bool,

    /// Suppress per-step progress output.
    #[arg(long)]
    quiet: bool,

    /// Print the complete grid state at every step and in the summary.
    /// Unwieldy beyond the smallest grid size.
    #[arg(long)]
    show_grid: bool,
}

fn run(args: &Args) -> anyhow::Result<(RunReport, Grid)> {
    let config = SimConfig {
        grid_size: args.grid_size,
        start_x: args.start_x,
        start_y: args.start_y,
        max_steps: args.max_steps,
        time_budget_ms: args.time_budget_ms,
        seed: args.seed,
        ..SimConfig::default()
    };
    let drone = Drone::try_new(config)?;

    let mut grid = match &args.grid_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read grid file {}", path.display()))?;
            loader::parse_grid(args.grid_size, &text)
                .with_context(|| format!("failed to parse grid file {}", path.display()))?
        }
        None => loader::generate_grid(args.grid_size, args.seed)?,
    };

    let clock = WallClock::start();
    let report = if args.json || args.quiet {
        drone.survey(&mut grid, &clock, &mut NoopObserver)?
    } else {
        let mut renderer = ConsoleRenderer::new(args.show_grid);
        drone.survey(&mut grid, &clock, &mut renderer)?
    };
    Ok((report, grid))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (report, grid) = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_summary(&report, &grid, args.show_grid);
    Ok(())
}
