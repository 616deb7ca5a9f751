//! Generation transition: neighbour rule, spontaneous flips, and age bookkeeping.
//!
//! Births need exactly 3 live neighbours. Live cells survive with 2, 3 or 4
//! and die otherwise. After the rule is applied every cell draws once from a
//! [`FlipSource`]; a hit inverts the computed state unconditionally. Ages are
//! then derived from the original state and the final one.

use crate::grid::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use toroid_core::{Cell, SPONTANEOUS_FLIP_PROBABILITY};
use tracing::trace;

/// Result of the neighbour rule for one cell, before any flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOutcome {
    Birth,
    Survival,
    Death,
    /// Dead and stays dead
    Unchanged,
}

impl RuleOutcome {
    pub fn evaluate(alive: bool, neighbors: usize) -> Self {
        match (alive, neighbors) {
            (false, 3) => RuleOutcome::Birth,
            (true, n) if !(2..=4).contains(&n) => RuleOutcome::Death,
            (true, _) => RuleOutcome::Survival,
            (false, _) => RuleOutcome::Unchanged,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, RuleOutcome::Birth | RuleOutcome::Survival)
    }
}

/// Liveness computed by the neighbour rule alone
pub fn apply_rule(alive: bool, neighbors: usize) -> bool {
    RuleOutcome::evaluate(alive, neighbors).is_alive()
}

/// Next state of one cell given its neighbour count and whether it was flipped
pub fn next_cell(cell: Cell, neighbors: usize, flipped: bool) -> Cell {
    let alive_next = apply_rule(cell.is_alive(), neighbors) ^ flipped;
    cell.transition(alive_next)
}

/// Source of spontaneous flips. Called once per cell per generation, in row-major order.
pub trait FlipSource {
    fn flip(&mut self) -> bool;
}

impl<F: FlipSource + ?Sized> FlipSource for &mut F {
    fn flip(&mut self) -> bool {
        (**self).flip()
    }
}

impl<F: FlipSource + ?Sized> FlipSource for Box<F> {
    fn flip(&mut self) -> bool {
        (**self).flip()
    }
}

/// Flips with probability [`SPONTANEOUS_FLIP_PROBABILITY`], drawing from `R`
#[derive(Debug, Clone)]
pub struct RandomFlips<R = ChaCha8Rng> {
    rng: R,
}

impl<R: Rng> RandomFlips<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomFlips<ChaCha8Rng> {
    /// Reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> FlipSource for RandomFlips<R> {
    fn flip(&mut self) -> bool {
        self.rng.gen::<f64>() < SPONTANEOUS_FLIP_PROBABILITY
    }
}

/// Deterministic source that always or never flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFlips {
    flip: bool,
}

impl FixedFlips {
    /// Pure neighbour rule
    pub fn never() -> Self {
        Self { flip: false }
    }

    /// Every computed state is inverted
    pub fn always() -> Self {
        Self { flip: true }
    }
}

impl FlipSource for FixedFlips {
    fn flip(&mut self) -> bool {
        self.flip
    }
}

/// Per-generation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Dead cells that ended up alive
    pub births: usize,
    /// Live cells that ended up dead
    pub deaths: usize,
    /// Live cells that stayed alive
    pub survivals: usize,
    /// Cells whose rule outcome was inverted
    pub flips: usize,
    /// Live cells after the generation
    pub population: usize,
}

/// Compute the generation after `current` into `next`.
///
/// Every cell of `next` is overwritten; `current` is only read, so neighbour
/// counts never see partially updated state.
pub fn step_into<F>(current: &Grid, next: &mut Grid, flips: &mut F) -> GenerationStats
where
    F: FlipSource + ?Sized,
{
    let mut stats = GenerationStats::default();

    for (pos, cell) in current.iter() {
        let neighbors = current.count_live_neighbors(pos.row, pos.col);
        let flipped = flips.flip();
        let updated = next_cell(*cell, neighbors, flipped);

        if flipped {
            stats.flips += 1;
            trace!(row = pos.row, col = pos.col, "spontaneous flip");
        }

        match (cell.is_alive(), updated.is_alive()) {
            (false, true) => stats.births += 1,
            (true, false) => stats.deaths += 1,
            (true, true) => stats.survivals += 1,
            (false, false) => {}
        }
        if updated.is_alive() {
            stats.population += 1;
        }

        next.set_cell(pos, updated);
    }

    stats
}

/// Allocating variant of [`step_into`]
pub fn next_generation<F>(current: &Grid, flips: &mut F) -> Grid
where
    F: FlipSource + ?Sized,
{
    let mut next = Grid::new();
    step_into(current, &mut next, flips);
    next
}
