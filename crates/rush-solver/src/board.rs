//! Board model: vehicles on a square grid plus a derived occupancy grid.
//!
//! A [`Board`] is the mutable working form used to validate layouts and
//! generate moves. A [`BoardState`] is its canonical, hashable snapshot and
//! the only value the search engine keeps around.

use serde::Serialize;

use crate::error::{Result, RushError};
use crate::vehicle::{Cell, Direction, Orientation, Step, Vehicle};

/// Largest accepted board side
pub const MAX_BOARD_SIZE: usize = 64;

/// Canonical snapshot of a board.
///
/// Vehicles are kept in insertion order, so two boards built the same way
/// produce equal states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub size: usize,
    pub exit_row: usize,
    pub vehicles: Vec<Vehicle>,
}

impl BoardState {
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Derive the single-vehicle move that turns `self` into `next`.
    ///
    /// Returns `None` unless exactly one vehicle moved by exactly one cell
    /// along its own axis.
    pub fn move_to(&self, next: &BoardState) -> Option<Move> {
        if self.size != next.size
            || self.exit_row != next.exit_row
            || self.vehicles.len() != next.vehicles.len()
        {
            return None;
        }

        let mut changed = self
            .vehicles
            .iter()
            .zip(&next.vehicles)
            .filter(|(before, after)| before != after);
        let (before, after) = changed.next()?;
        if changed.next().is_some() {
            return None;
        }

        Step::ALL
            .into_iter()
            .find(|&step| {
                let mut moved = before.clone();
                moved.slide(step) && &moved == after
            })
            .map(|step| Move {
                vehicle: before.id().to_string(),
                direction: Direction::from_step(before.orientation(), step),
            })
    }
}

/// A single-cell slide of one vehicle, as reported to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub vehicle: String,
    pub direction: Direction,
}

/// A square grid with vehicles on it.
///
/// `occupancy` holds, for every cell in row-major order, the index of the
/// vehicle covering it. It is always exactly the union of the vehicles' cells.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    exit_row: usize,
    vehicles: Vec<Vehicle>,
    occupancy: Vec<Option<usize>>,
}

impl Board {
    /// Create an empty `size`×`size` board with the exit on `exit_row`
    pub fn new(size: usize, exit_row: usize) -> Result<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(RushError::InvalidSize { size });
        }
        if exit_row >= size {
            return Err(RushError::InvalidExitRow { exit_row, size });
        }
        Ok(Self {
            size,
            exit_row,
            vehicles: Vec::new(),
            occupancy: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn exit_row(&self) -> usize {
        self.exit_row
    }

    /// Vehicles in insertion order
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.index_of(id).map(|index| &self.vehicles[index])
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.vehicles.iter().position(|v| v.id() == id)
    }

    /// Row-major slot of a cell that `fits` already placed on the board
    fn cell_index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    /// The vehicle covering a cell, if any. Out-of-range cells are empty.
    pub fn occupant(&self, row: usize, col: usize) -> Option<&Vehicle> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.occupancy[self.cell_index(Cell::new(row, col))].map(|index| &self.vehicles[index])
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupant(row, col).is_some()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().filter(|slot| slot.is_some()).count()
    }

    /// Add a vehicle to the board.
    ///
    /// Fails if the vehicle leaves the grid, overlaps an occupied cell, or
    /// reuses an id. The board is unchanged on failure.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        origin: Cell,
        length: usize,
        orientation: Orientation,
    ) -> Result<()> {
        self.insert_vehicle(Vehicle::new(id, origin, length, orientation))
    }

    fn insert_vehicle(&mut self, vehicle: Vehicle) -> Result<()> {
        if vehicle.length() == 0 {
            return Err(RushError::InvalidLength {
                id: vehicle.id().to_string(),
            });
        }
        if !vehicle.fits(self.size) {
            return Err(RushError::OutOfBounds {
                id: vehicle.id().to_string(),
            });
        }

        let cells = vehicle.cells();
        if let Some(taken) = cells
            .iter()
            .find(|&&cell| self.occupancy[self.cell_index(cell)].is_some())
        {
            return Err(RushError::PlacementConflict {
                id: vehicle.id().to_string(),
                row: taken.row,
                col: taken.col,
            });
        }
        if self.index_of(vehicle.id()).is_some() {
            return Err(RushError::DuplicateIdentifier(vehicle.id().to_string()));
        }

        let index = self.vehicles.len();
        for cell in cells {
            let slot = self.cell_index(cell);
            self.occupancy[slot] = Some(index);
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Snapshot the board as a canonical state
    pub fn to_state(&self) -> BoardState {
        BoardState {
            size: self.size,
            exit_row: self.exit_row,
            vehicles: self.vehicles.clone(),
        }
    }

    /// Rebuild a board from a state, re-validating every placement
    pub fn from_state(state: &BoardState) -> Result<Board> {
        let mut board = Board::new(state.size, state.exit_row)?;
        for vehicle in &state.vehicles {
            board.insert_vehicle(vehicle.clone())?;
        }
        Ok(board)
    }

    /// Whether `candidate`, standing in for vehicle `index`, only covers
    /// cells that are empty or already covered by that same vehicle
    fn is_clear_for(&self, index: usize, candidate: &Vehicle) -> bool {
        candidate
            .cells()
            .iter()
            .all(|&cell| match self.occupancy[self.cell_index(cell)] {
                None => true,
                Some(occupant) => occupant == index,
            })
    }

    /// Every state reachable by sliding one vehicle by one cell.
    ///
    /// Vehicles are tried in insertion order, backward before forward. The
    /// board is never modified: each move is built as a candidate vehicle and
    /// committed only into a fresh state. Identical states produced by
    /// different moves are all returned.
    pub fn legal_neighbor_states(&self) -> Vec<BoardState> {
        let mut states = Vec::new();

        for (index, vehicle) in self.vehicles.iter().enumerate() {
            for step in Step::ALL {
                let candidate = match vehicle.slid(step, self.size) {
                    Some(candidate) => candidate,
                    None => continue,
                };
                if !self.is_clear_for(index, &candidate) {
                    continue;
                }

                let mut vehicles = self.vehicles.clone();
                vehicles[index] = candidate;
                states.push(BoardState {
                    size: self.size,
                    exit_row: self.exit_row,
                    vehicles,
                });
            }
        }

        states
    }

    /// Apply one legal slide in place, keeping the occupancy grid in sync
    pub fn slide_vehicle(&mut self, id: &str, step: Step) -> Result<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| RushError::UnknownVehicle(id.to_string()))?;

        let candidate = self.vehicles[index]
            .slid(step, self.size)
            .filter(|candidate| self.is_clear_for(index, candidate))
            .ok_or_else(|| RushError::IllegalMove {
                id: id.to_string(),
                step: step.delta(),
            })?;

        for cell in self.vehicles[index].cells() {
            let slot = self.cell_index(cell);
            self.occupancy[slot] = None;
        }
        for cell in candidate.cells() {
            let slot = self.cell_index(cell);
            self.occupancy[slot] = Some(index);
        }
        self.vehicles[index] = candidate;
        Ok(())
    }
}
