//! Rush Hour solver library.
//!
//! This crate models the sliding-block puzzle as a graph of immutable board
//! states and searches it breadth-first, so the solution it returns uses the
//! fewest single-cell moves.

pub mod board;
pub mod error;
pub mod node;
pub mod puzzle;
pub mod render;
pub mod solver;
pub mod vehicle;

// Re-export main types
pub use board::{Board, BoardState, Move, MAX_BOARD_SIZE};
pub use error::{ConfigurationIssue, Result, RushError};
pub use node::SearchNode;
pub use puzzle::{Puzzle, PuzzleConfig, VehicleConfig, DEFAULT_TARGET};
pub use render::{render, RenderOptions};
pub use solver::{
    breadth_first_search, breadth_first_search_with_progress, SearchOutcome, SolverConfig,
    SolverResult,
};
pub use vehicle::{Cell, Direction, Orientation, Step, Vehicle};
