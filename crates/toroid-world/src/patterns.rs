//! Library of starting patterns and random seeding.

use crate::grid::Grid;
use rand::Rng;
use toroid_core::{Error, Position, Result};
use tracing::debug;

/// A named set of live cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub cells: &'static [(usize, usize)],
}

/// Block, blinker and a few scattered cells
pub const DEFAULT: Pattern = Pattern {
    name: "default",
    description: "Block, blinker and scattered cells",
    cells: &[
        (1, 1),
        (1, 2),
        (2, 1),
        (2, 2),
        (3, 3),
        (3, 4),
        (3, 5),
        (0, 0),
        (5, 5),
        (5, 4),
        (4, 4),
    ],
};

pub const BLOCK: Pattern = Pattern {
    name: "block",
    description: "2x2 still life",
    cells: &[(2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    description: "Period-2 oscillator",
    cells: &[(2, 2), (2, 3), (2, 4)],
};

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    description: "Classic glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const CROSS: Pattern = Pattern {
    name: "cross",
    description: "Plus sign centred on (3,3)",
    cells: &[(2, 3), (3, 2), (3, 3), (3, 4), (4, 3)],
};

pub const PATTERNS: &[Pattern] = &[DEFAULT, BLOCK, BLINKER, GLIDER, CROSS];

impl Pattern {
    pub fn all() -> &'static [Pattern] {
        PATTERNS
    }

    /// Case-insensitive lookup
    pub fn by_name(name: &str) -> Result<Pattern> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + 'static {
        self.cells.iter().map(|&(row, col)| Position::new(row, col))
    }

    /// A fresh grid with this pattern's cells alive at age 1
    pub fn seed(&self) -> Grid {
        debug!(pattern = self.name, cells = self.cells.len(), "Seeding pattern");
        Grid::from_live(self.positions())
    }
}

/// Each cell alive with probability `density`, drawn in row-major order
pub fn random_grid<R: Rng>(rng: &mut R, density: f64) -> Grid {
    let mut grid = Grid::new();
    let positions: Vec<Position> = grid.positions().collect();
    for pos in positions {
        if rng.gen::<f64>() < density {
            grid.set_alive(pos.row, pos.col);
        }
    }
    debug!(density, population = grid.count_alive(), "Seeded random grid");
    grid
}
