//! Square toroidal board of cells.

use serde::Serialize;
use std::fmt;
use toroid_core::{Cell, Position, Result, NEIGHBOR_OFFSETS, SIZE};

/// A `SIZE`x`SIZE` toroidal grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An all-dead grid
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::dead(); SIZE * SIZE],
        }
    }

    /// Build a grid with exactly the given cells alive
    ///
    /// # Panics
    /// If any position is off the board.
    pub fn from_live<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut grid = Self::new();
        for pos in positions {
            grid.set_alive(pos.row, pos.col);
        }
        grid
    }

    pub fn size(&self) -> usize {
        SIZE
    }

    /// Get the cell at `(row, col)`
    ///
    /// # Panics
    /// If `row` or `col` is not below `SIZE`.
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[Self::index(row, col)]
    }

    /// Checked variant of [`Grid::get`]
    pub fn try_get(&self, row: usize, col: usize) -> Result<&Cell> {
        let pos = Position::new(row, col).check_bounds(SIZE)?;
        Ok(self.get(pos.row, pos.col))
    }

    /// Seed a live cell. A dead cell becomes a newborn (age 1); a live cell is left as is.
    ///
    /// # Panics
    /// If `row` or `col` is not below `SIZE`.
    pub fn set_alive(&mut self, row: usize, col: usize) {
        let cell = &mut self.cells[Self::index(row, col)];
        if !cell.is_alive() {
            *cell = Cell::born();
        }
    }

    /// Checked variant of [`Grid::set_alive`]
    pub fn try_set_alive(&mut self, row: usize, col: usize) -> Result<()> {
        let pos = Position::new(row, col).check_bounds(SIZE)?;
        self.set_alive(pos.row, pos.col);
        Ok(())
    }

    /// Kill a cell, resetting its age
    ///
    /// # Panics
    /// If `row` or `col` is not below `SIZE`.
    pub fn set_dead(&mut self, row: usize, col: usize) {
        self.cells[Self::index(row, col)] = Cell::dead();
    }

    /// Count live cells among the eight wrapped neighbours of `(row, col)`
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> usize {
        // Offsets alone would silently wrap a bad centre.
        Self::assert_in_bounds(row, col);
        let center = Position::new(row, col);

        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(d_row, d_col)| center.offset(d_row, d_col, SIZE))
            .filter(|pos| self.get(pos.row, pos.col).is_alive())
            .count()
    }

    /// Total live cells on the board
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::dead());
    }

    pub(crate) fn set_cell(&mut self, pos: Position, cell: Cell) {
        self.cells[Self::index(pos.row, pos.col)] = cell;
    }

    fn index(row: usize, col: usize) -> usize {
        Self::assert_in_bounds(row, col);
        row * SIZE + col
    }

    fn assert_in_bounds(row: usize, col: usize) {
        assert!(
            row < SIZE && col < SIZE,
            "position ({}, {}) is outside a {}x{} board",
            row,
            col,
            SIZE,
            SIZE
        );
    }

    fn index_to_pos(index: usize) -> Position {
        Position::new(index / SIZE, index % SIZE)
    }

    /// Iterator over all positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(Self::index_to_pos)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (Self::index_to_pos(i), cell))
    }

    pub fn live_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// One line per cell: `(row,col) | ALIVE | age`
    pub fn cell_register(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(pos, cell)| {
            let state = if cell.is_alive() { "ALIVE" } else { "DEAD" };
            format!("{} | {} | {}", pos, state, cell.age())
        })
    }
}

/// Rows of `1`/`0` separated by single spaces
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            let line: Vec<String> = row.iter().map(|cell| cell.as_char().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
