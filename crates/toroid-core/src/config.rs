//! Configuration types for a simulation run.

use crate::{Error, Position, Result, SEED_DENSITY, SIZE};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::debug;

/// Allowed number of generations per run
pub const GENERATIONS_RANGE: RangeInclusive<u32> = 1..=100;

/// Allowed pause between generations, in milliseconds
pub const DELAY_MS_RANGE: RangeInclusive<u64> = 100..=2000;

/// How the initial board is populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seeding {
    /// A named entry from the pattern library
    Pattern { name: String },
    /// Explicit live cells
    Custom { cells: Vec<Position> },
    /// Each cell alive with probability `density`
    Random { density: f64 },
}

impl Default for Seeding {
    fn default() -> Self {
        Seeding::Pattern {
            name: "default".to_string(),
        }
    }
}

/// Run configuration handed to the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of generations to advance
    pub generations: u32,
    /// Pause between rendered generations
    pub delay_ms: u64,
    /// Random seed for reproducibility; entropy when absent
    pub seed: Option<u64>,
    /// Initial board
    pub seeding: Seeding,
    /// Print the per-cell register after each board
    pub cell_register: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 20,
            delay_ms: 500,
            seed: None,
            seeding: Seeding::default(),
            cell_register: false,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading run configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check ranges and coordinates before a run starts
    pub fn validate(&self) -> Result<()> {
        if !GENERATIONS_RANGE.contains(&self.generations) {
            return Err(Error::Validation(format!(
                "generations must be between {} and {}, got {}",
                GENERATIONS_RANGE.start(),
                GENERATIONS_RANGE.end(),
                self.generations
            )));
        }

        if !DELAY_MS_RANGE.contains(&self.delay_ms) {
            return Err(Error::Validation(format!(
                "delay must be between {} and {} ms, got {}",
                DELAY_MS_RANGE.start(),
                DELAY_MS_RANGE.end(),
                self.delay_ms
            )));
        }

        match &self.seeding {
            Seeding::Custom { cells } => {
                for pos in cells {
                    pos.check_bounds(SIZE)?;
                }
            }
            Seeding::Random { density } => {
                if !(0.0..=1.0).contains(density) {
                    return Err(Error::Validation(format!(
                        "density must be between 0.0 and 1.0, got {}",
                        density
                    )));
                }
            }
            Seeding::Pattern { .. } => {}
        }

        Ok(())
    }
}

impl Seeding {
    /// Random seeding at the standard density
    pub fn random() -> Self {
        Seeding::Random {
            density: SEED_DENSITY,
        }
    }
}
