//! Argument handling, board seeding and the paced render loop.

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use toroid_core::{Position, RunConfig, Seeding};
use toroid_world::{random_grid, Grid, Pattern, RandomFlips, RunSummary, Simulation};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "toroid-life")]
#[command(version)]
#[command(about = "Game of Life on a 6x6 torus with a wide survival band and random flips")]
pub struct Cli {
    /// JSON run configuration; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start from a named pattern (see --list-patterns)
    #[arg(short, long, conflicts_with_all = ["cells", "random"])]
    pub pattern: Option<String>,

    /// Live cell as ROW,COL; repeat for a custom board
    #[arg(long = "cell", value_name = "ROW,COL", conflicts_with = "random")]
    pub cells: Vec<Position>,

    /// Start from a random board
    #[arg(long)]
    pub random: bool,

    /// Number of generations to run (1-100)
    #[arg(short, long)]
    pub generations: Option<u32>,

    /// Pause between generations in milliseconds (100-2000)
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the per-cell register after each board
    #[arg(long)]
    pub cell_register: bool,

    /// Print available patterns and exit
    #[arg(long)]
    pub list_patterns: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Merge the optional config file with command-line overrides and validate the result
    pub fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(name) = self.pattern {
            config.seeding = Seeding::Pattern { name };
        } else if !self.cells.is_empty() {
            config.seeding = Seeding::Custom { cells: self.cells };
        } else if self.random {
            config.seeding = Seeding::random();
        }

        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.cell_register |= self.cell_register;

        config.validate()?;
        Ok(config)
    }
}

/// Build the starting board, drawing from `rng` only for random seeding
pub fn build_grid(seeding: &Seeding, rng: &mut ChaCha8Rng) -> Result<Grid> {
    let grid = match seeding {
        Seeding::Pattern { name } => Pattern::by_name(name)?.seed(),
        Seeding::Custom { cells } => {
            let mut grid = Grid::new();
            for pos in cells {
                grid.try_set_alive(pos.row, pos.col)?;
            }
            grid
        }
        Seeding::Random { density } => random_grid(rng, *density),
    };
    Ok(grid)
}

pub fn render_generation<W: Write>(
    out: &mut W,
    generation: u64,
    grid: &Grid,
    cell_register: bool,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Generation: {}", generation)?;
    writeln!(out, "Live cells: {}/{}", grid.count_alive(), grid.size() * grid.size())?;
    write!(out, "{}", grid)?;

    if cell_register {
        writeln!(out)?;
        writeln!(out, "--- CELL REGISTER ---")?;
        writeln!(out, "Position(row,col) | State | Age")?;
        for line in grid.cell_register() {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()
}

/// Run with the configured pause between generations
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    run_paced(config, Duration::from_millis(config.delay_ms), out)
}

/// Render generation 0, then advance and render `config.generations` times,
/// sleeping `delay` before each advance
pub fn run_paced<W: Write>(config: &RunConfig, delay: Duration, out: &mut W) -> Result<RunSummary> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let grid = build_grid(&config.seeding, &mut rng)?;
    debug!(population = grid.count_alive(), "Initial board ready");
    render_generation(out, 0, &grid, config.cell_register)?;

    // The seeding RNG continues as the flip source so one seed fixes the whole run.
    let mut sim = Simulation::new(grid, RandomFlips::new(rng));

    let mut written: std::io::Result<()> = Ok(());
    let summary = sim.run(config.generations, |generation, grid, _| {
        if written.is_err() {
            return;
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        written = render_generation(&mut *out, generation, grid, config.cell_register);
    });
    written.context("failed to write generation")?;

    writeln!(out)?;
    writeln!(out, "Simulation complete after {} generations", summary.generations)?;
    Ok(summary)
}
