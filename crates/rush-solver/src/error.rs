//! Error types for board construction and puzzle binding.
//!
//! Search-time non-findings are not errors; they are reported through
//! [`crate::solver::SearchOutcome`].

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Reason a puzzle could not be bound to its target vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationIssue {
    /// The target id is not present on the board
    TargetMissing(String),
    /// The target vehicle is oriented vertically
    TargetNotHorizontal(String),
    /// The target vehicle does not sit on the exit row
    TargetOffExitRow {
        id: String,
        row: usize,
        exit_row: usize,
    },
}

impl Display for ConfigurationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationIssue::TargetMissing(id) => {
                write!(f, "target vehicle '{}' not found on the board", id)
            }
            ConfigurationIssue::TargetNotHorizontal(id) => {
                write!(f, "target vehicle '{}' must be oriented horizontally", id)
            }
            ConfigurationIssue::TargetOffExitRow { id, row, exit_row } => write!(
                f,
                "target vehicle '{}' is on row {} but the exit is on row {}",
                id, row, exit_row
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RushError {
    /// A vehicle would overlap a cell that is already occupied
    PlacementConflict { id: String, row: usize, col: usize },
    /// Two vehicles share an id
    DuplicateIdentifier(String),
    /// Some cell of the vehicle lies outside the grid
    OutOfBounds { id: String },
    /// Vehicles must be at least one cell long
    InvalidLength { id: String },
    /// Board sizes run from 1 to [`crate::board::MAX_BOARD_SIZE`]
    InvalidSize { size: usize },
    InvalidExitRow { exit_row: usize, size: usize },
    /// Slides are single-cell only
    InvalidStep(isize),
    UnknownVehicle(String),
    /// The requested slide leaves the grid or runs into another vehicle
    IllegalMove { id: String, step: isize },
    InvalidConfiguration(ConfigurationIssue),
}

impl Display for RushError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RushError::PlacementConflict { id, row, col } => write!(
                f,
                "unable to place vehicle '{}': cell ({}, {}) is already occupied",
                id, row, col
            ),
            RushError::DuplicateIdentifier(id) => {
                write!(f, "vehicle '{}' already inserted", id)
            }
            RushError::OutOfBounds { id } => {
                write!(f, "vehicle '{}' does not fit inside the board", id)
            }
            RushError::InvalidLength { id } => {
                write!(f, "vehicle '{}' must have a length of at least 1", id)
            }
            RushError::InvalidSize { size } => write!(
                f,
                "board size must be between 1 and {}, got {}",
                crate::board::MAX_BOARD_SIZE,
                size
            ),
            RushError::InvalidExitRow { exit_row, size } => write!(
                f,
                "exit row {} is outside a board of size {}",
                exit_row, size
            ),
            RushError::InvalidStep(step) => {
                write!(f, "absolute displacement must be 1, got {}", step)
            }
            RushError::UnknownVehicle(id) => write!(f, "no vehicle with id '{}'", id),
            RushError::IllegalMove { id, step } => {
                write!(f, "vehicle '{}' cannot move by {}", id, step)
            }
            RushError::InvalidConfiguration(issue) => {
                write!(f, "invalid configuration: {}", issue)
            }
        }
    }
}

impl Error for RushError {}

impl From<ConfigurationIssue> for RushError {
    fn from(issue: ConfigurationIssue) -> Self {
        RushError::InvalidConfiguration(issue)
    }
}

pub type Result<T> = std::result::Result<T, RushError>;
