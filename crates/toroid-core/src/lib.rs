//! Core types and utilities for the toroidal Game of Life engine.

pub mod types;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;

/// Side length of the square board
pub const SIZE: usize = 6;

/// Chance that a cell's computed state is flipped in any single generation
pub const SPONTANEOUS_FLIP_PROBABILITY: f64 = 0.1;

/// Chance that a cell starts alive when a board is seeded at random
pub const SEED_DENSITY: f64 = 0.3;
