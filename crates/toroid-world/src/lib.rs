//! Evolution engine.
//!
//! A fixed-size toroidal board, the birth/survival/death rule with
//! spontaneous flips, and a double-buffered driver handle.

pub mod grid;
pub mod rules;
pub mod simulation;
pub mod patterns;

pub use grid::Grid;
pub use rules::{
    apply_rule, next_cell, next_generation, step_into, FixedFlips, FlipSource, GenerationStats,
    RandomFlips, RuleOutcome,
};
pub use simulation::{RunSummary, Simulation};
pub use patterns::{random_grid, Pattern, PATTERNS};
