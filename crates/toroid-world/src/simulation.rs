//! Double-buffered simulation driver handle.

use crate::grid::Grid;
use crate::rules::{step_into, FlipSource, GenerationStats, RandomFlips};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Owns the current generation, a scratch buffer for the next one, and the flip source.
pub struct Simulation<F = RandomFlips> {
    current: Grid,
    scratch: Grid,
    flips: F,
    generation: u64,
}

impl<F: FlipSource> Simulation<F> {
    pub fn new(grid: Grid, flips: F) -> Self {
        Self {
            current: grid,
            scratch: Grid::new(),
            flips,
            generation: 0,
        }
    }

    /// The most recently completed generation
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Generations advanced since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the board and restart counting from generation 0
    pub fn reset(&mut self, grid: Grid) {
        self.current = grid;
        self.generation = 0;
    }

    /// Advance one generation.
    ///
    /// The next state is built in the scratch buffer and then swapped in, so
    /// callers only ever see a complete generation.
    pub fn advance(&mut self) -> GenerationStats {
        let stats = step_into(&self.current, &mut self.scratch, &mut self.flips);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = stats.population,
            births = stats.births,
            deaths = stats.deaths,
            survivals = stats.survivals,
            flips = stats.flips,
            "Generation advanced"
        );

        stats
    }

    /// Advance `generations` times, handing each completed generation to `on_generation`
    #[instrument(skip(self, on_generation))]
    pub fn run<C>(&mut self, generations: u32, mut on_generation: C) -> RunSummary
    where
        C: FnMut(u64, &Grid, &GenerationStats),
    {
        info!(
            "Starting run for {} generations with {} live cells",
            generations,
            self.current.count_alive()
        );

        let initial_population = self.current.count_alive();
        let mut summary = RunSummary {
            generations: 0,
            initial_population,
            final_population: initial_population,
            peak_population: initial_population,
            total_births: 0,
            total_deaths: 0,
            total_flips: 0,
            oldest_age: self.oldest_age(),
        };

        for _ in 0..generations {
            let stats = self.advance();
            on_generation(self.generation, &self.current, &stats);

            summary.generations += 1;
            summary.final_population = stats.population;
            summary.peak_population = summary.peak_population.max(stats.population);
            summary.total_births += stats.births;
            summary.total_deaths += stats.deaths;
            summary.total_flips += stats.flips;
            summary.oldest_age = summary.oldest_age.max(self.oldest_age());
        }

        info!(
            event = "run_summary",
            generations = summary.generations,
            initial_population = summary.initial_population,
            final_population = summary.final_population,
            peak_population = summary.peak_population,
            total_births = summary.total_births,
            total_deaths = summary.total_deaths,
            total_flips = summary.total_flips,
            oldest_age = summary.oldest_age,
            "Run complete"
        );

        summary
    }

    fn oldest_age(&self) -> u32 {
        self.current
            .iter()
            .map(|(_, cell)| cell.age())
            .max()
            .unwrap_or(0)
    }
}

impl Simulation<RandomFlips> {
    /// Seeded when `seed` is given, entropy otherwise
    pub fn with_seed(grid: Grid, seed: Option<u64>) -> Self {
        let flips = match seed {
            Some(seed) => RandomFlips::seeded(seed),
            None => RandomFlips::from_entropy(),
        };
        Self::new(grid, flips)
    }
}

/// Aggregate statistics for a [`Simulation::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u32,
    pub initial_population: usize,
    pub final_population: usize,
    pub peak_population: usize,
    pub total_births: usize,
    pub total_deaths: usize,
    pub total_flips: usize,
    /// Highest age any cell reached, including the initial board
    pub oldest_age: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FixedFlips;
    use toroid_core::Position;

    fn blinker() -> Grid {
        Grid::from_live([
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(2, 4),
        ])
    }

    #[test]
    fn test_advance_counts_generations() {
        let mut sim = Simulation::new(blinker(), FixedFlips::never());
        assert_eq!(sim.generation(), 0);
        sim.advance();
        assert_eq!(sim.generation(), 1);
        sim.advance();
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_blinker_oscillates() {
        let start = blinker();
        let mut sim = Simulation::new(start.clone(), FixedFlips::never());

        sim.advance();
        assert_eq!(
            sim.current().live_positions(),
            vec![Position::new(1, 3), Position::new(2, 3), Position::new(3, 3)]
        );
        // The centre survived both ways
        assert_eq!(sim.current().get(2, 3).age(), 2);

        sim.advance();
        assert_eq!(sim.current().live_positions(), start.live_positions());
        assert_eq!(sim.current().get(2, 3).age(), 3);
        assert_eq!(sim.current().get(2, 2).age(), 1);
    }

    #[test]
    fn test_run_invokes_callback_per_generation() {
        let mut sim = Simulation::new(blinker(), FixedFlips::never());
        let mut seen = Vec::new();
        let summary = sim.run(5, |generation, grid, stats| {
            assert_eq!(grid.count_alive(), stats.population);
            seen.push(generation);
        });

        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(summary.generations, 5);
        assert_eq!(summary.initial_population, 3);
        assert_eq!(summary.final_population, 3);
        assert_eq!(summary.peak_population, 3);
        assert_eq!(summary.total_births, 10);
        assert_eq!(summary.total_deaths, 10);
        assert_eq!(summary.total_flips, 0);
        assert_eq!(summary.oldest_age, 6);
    }

    #[test]
    fn test_reset() {
        let mut sim = Simulation::new(blinker(), FixedFlips::never());
        sim.advance();
        sim.reset(Grid::new());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.current().count_alive(), 0);
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = Simulation::with_seed(blinker(), Some(1234));
        let mut b = Simulation::with_seed(blinker(), Some(1234));

        for _ in 0..20 {
            assert_eq!(a.advance(), b.advance());
            assert_eq!(a.current(), b.current());
        }
    }
}
