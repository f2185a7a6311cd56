//! Puzzle configuration and the search problem built on top of a board.
//!
//! [`PuzzleConfig`] deserializes the JSON puzzle format. [`Puzzle`] binds a
//! board to its target vehicle and exposes the transition model used by the
//! solver: `actions`, `result`, `goal_test` and `path_cost`.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState};
use crate::error::{ConfigurationIssue, Result, RushError};
use crate::solver::{breadth_first_search, SolverConfig, SolverResult};
use crate::vehicle::{Cell, Orientation};

/// Target id used when a puzzle does not name one
pub const DEFAULT_TARGET: &str = "red";

fn default_size() -> usize {
    6
}

fn default_exit_row() -> usize {
    2
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

/// One vehicle entry of a puzzle file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub orientation: Orientation,
}

/// The complete puzzle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_exit_row")]
    pub exit_row: usize,
    #[serde(default = "default_target")]
    pub target: String,
    pub vehicles: Vec<VehicleConfig>,
}

impl PuzzleConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Place every vehicle, in list order
    pub fn build_board(&self) -> Result<Board> {
        let mut board = Board::new(self.size, self.exit_row)?;
        for vehicle in &self.vehicles {
            board.insert(
                vehicle.id.clone(),
                Cell::new(vehicle.row, vehicle.col),
                vehicle.length,
                vehicle.orientation,
            )?;
        }
        Ok(board)
    }

    pub fn build(&self) -> Result<Puzzle> {
        Puzzle::new(&self.build_board()?, &self.target)
    }
}

/// A board bound to a target vehicle that must reach the exit.
///
/// The target must be horizontal and sit on the exit row; it is solved once
/// its last cell touches the far wall.
#[derive(Debug, Clone)]
pub struct Puzzle {
    initial: BoardState,
    target: String,
    target_cell: Cell,
}

impl Puzzle {
    pub fn new(board: &Board, target: &str) -> Result<Self> {
        Self::from_state(board.to_state(), target)
    }

    pub fn with_default_target(board: &Board) -> Result<Self> {
        Self::new(board, DEFAULT_TARGET)
    }

    /// Bind a state to a target, validating both up front
    pub fn from_state(state: BoardState, target: &str) -> Result<Self> {
        let board = Board::from_state(&state)?;

        let vehicle = board
            .vehicle(target)
            .ok_or_else(|| ConfigurationIssue::TargetMissing(target.to_string()))?;
        if vehicle.orientation() != Orientation::Horizontal {
            return Err(ConfigurationIssue::TargetNotHorizontal(target.to_string()).into());
        }
        if vehicle.origin().row != board.exit_row() {
            return Err(ConfigurationIssue::TargetOffExitRow {
                id: target.to_string(),
                row: vehicle.origin().row,
                exit_row: board.exit_row(),
            }
            .into());
        }

        let target_cell = Cell::new(board.exit_row(), board.size() - vehicle.length());
        Ok(Self {
            initial: board.to_state(),
            target: target.to_string(),
            target_cell,
        })
    }

    pub fn initial(&self) -> &BoardState {
        &self.initial
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Origin the target vehicle must reach
    pub fn target_cell(&self) -> Cell {
        self.target_cell
    }

    /// States reachable from `state` in one move.
    ///
    /// Actions and resulting states coincide in this problem.
    pub fn actions(&self, state: &BoardState) -> Result<Vec<BoardState>> {
        Ok(Board::from_state(state)?.legal_neighbor_states())
    }

    pub fn result(&self, _state: &BoardState, action: BoardState) -> BoardState {
        action
    }

    pub fn goal_test(&self, state: &BoardState) -> Result<bool> {
        let board = Board::from_state(state)?;
        let target = board
            .vehicle(&self.target)
            .ok_or_else(|| RushError::UnknownVehicle(self.target.clone()))?;
        Ok(target.origin() == self.target_cell)
    }

    /// Unit cost per move
    pub fn path_cost(&self, cost: usize) -> usize {
        cost + 1
    }

    pub fn solve(&self, config: &SolverConfig) -> Result<SolverResult> {
        breadth_first_search(self, config)
    }
}
