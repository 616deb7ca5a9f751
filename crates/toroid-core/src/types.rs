//! Core type definitions for the engine.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative offsets of the eight cells surrounding a position
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A single board cell.
///
/// A dead cell always has age 0 and a live cell always has age 1 or more.
/// The fields are private so that only the constructors and [`Cell::transition`]
/// can produce values, which keeps that pairing intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Cell {
    alive: bool,
    age: u32,
}

impl Cell {
    pub fn dead() -> Self {
        Self { alive: false, age: 0 }
    }

    /// A freshly born cell
    pub fn born() -> Self {
        Self { alive: true, age: 1 }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of consecutive generations this cell has been alive
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Move this cell into the next generation with the given final liveness.
    ///
    /// Survivors age by one, newly live cells start at 1, dead cells reset to 0.
    pub fn transition(self, alive_next: bool) -> Self {
        match (self.alive, alive_next) {
            (true, true) => Self {
                alive: true,
                age: self.age.saturating_add(1),
            },
            (false, true) => Self::born(),
            (_, false) => Self::dead(),
        }
    }

    pub fn as_char(&self) -> char {
        if self.alive {
            '1'
        } else {
            '0'
        }
    }
}

/// Board coordinate, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed offset, wrapping around a `size`x`size` torus
    pub fn offset(&self, d_row: isize, d_col: isize, size: usize) -> Self {
        let n = size as isize;
        Self {
            row: (self.row as isize + d_row).rem_euclid(n) as usize,
            col: (self.col as isize + d_col).rem_euclid(n) as usize,
        }
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Fail with [`Error::OutOfBounds`] unless the position fits the board
    pub fn check_bounds(self, size: usize) -> Result<Self> {
        if self.in_bounds(size) {
            Ok(self)
        } else {
            Err(Error::OutOfBounds {
                row: self.row,
                col: self.col,
                size,
            })
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Parses `"row,col"`, tolerating whitespace around either number.
/// Bounds are not checked here.
impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| Error::Parse(format!("expected `row,col`, got `{}`", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| Error::Parse(format!("invalid coordinate `{}`: {}", part.trim(), e)))
        };

        Ok(Self::new(parse(row)?, parse(col)?))
    }
}
