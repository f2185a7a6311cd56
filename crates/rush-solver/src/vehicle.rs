//! Vehicle representation: an oriented, fixed-length segment of grid cells.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, RushError};

/// Orientation of a vehicle. A vehicle only ever moves along its own axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[serde(alias = "h")]
    Horizontal,
    #[serde(alias = "v")]
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        };
        write!(f, "{}", s)
    }
}

/// A single-cell slide along a vehicle's axis.
///
/// `Backward` moves towards row/column 0, `Forward` away from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Backward,
    Forward,
}

impl Step {
    /// Both steps, in the order neighbor generation tries them
    pub const ALL: [Step; 2] = [Step::Backward, Step::Forward];

    pub fn delta(self) -> isize {
        match self {
            Step::Backward => -1,
            Step::Forward => 1,
        }
    }

    pub fn reverse(self) -> Step {
        match self {
            Step::Backward => Step::Forward,
            Step::Forward => Step::Backward,
        }
    }
}

impl TryFrom<isize> for Step {
    type Error = RushError;

    fn try_from(delta: isize) -> Result<Self> {
        match delta {
            -1 => Ok(Step::Backward),
            1 => Ok(Step::Forward),
            other => Err(RushError::InvalidStep(other)),
        }
    }
}

/// Screen direction of a move, derived from orientation and step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_step(orientation: Orientation, step: Step) -> Direction {
        match (orientation, step) {
            (Orientation::Horizontal, Step::Backward) => Direction::Left,
            (Orientation::Horizontal, Step::Forward) => Direction::Right,
            (Orientation::Vertical, Step::Backward) => Direction::Up,
            (Orientation::Vertical, Step::Forward) => Direction::Down,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// A grid coordinate, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A vehicle on the board.
///
/// The id doubles as the display color name, but carries no meaning beyond
/// identifying the vehicle. Equality and hashing cover every field, so a
/// vehicle is directly usable as an entry of a [`crate::board::BoardState`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vehicle {
    id: String,
    origin: Cell,
    length: usize,
    orientation: Orientation,
}

impl Vehicle {
    /// Create a vehicle. Bounds and collisions are checked by the board on insert.
    pub fn new(id: impl Into<String>, origin: Cell, length: usize, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            origin,
            length,
            orientation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// First (top-most or left-most) cell
    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Coordinate of the first cell along the vehicle's axis
    fn axis_start(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.origin.col,
            Orientation::Vertical => self.origin.row,
        }
    }

    /// Coordinate of the last cell along the vehicle's axis, `None` past `usize::MAX`
    fn axis_end(&self) -> Option<usize> {
        self.axis_start().checked_add(self.length.saturating_sub(1))
    }

    /// The `length` consecutive cells covered by this vehicle.
    ///
    /// Cells whose coordinate would pass `usize::MAX` are cut off; such a
    /// vehicle never `fits` a board.
    pub fn cells(&self) -> SmallVec<[Cell; 4]> {
        (0..self.length)
            .map_while(|offset| match self.orientation {
                Orientation::Horizontal => self
                    .origin
                    .col
                    .checked_add(offset)
                    .map(|col| Cell::new(self.origin.row, col)),
                Orientation::Vertical => self
                    .origin
                    .row
                    .checked_add(offset)
                    .map(|row| Cell::new(row, self.origin.col)),
            })
            .collect()
    }

    /// Whether every cell lies inside a `size`×`size` grid
    pub fn fits(&self, size: usize) -> bool {
        let cross = match self.orientation {
            Orientation::Horizontal => self.origin.row,
            Orientation::Vertical => self.origin.col,
        };
        self.length >= 1 && cross < size && self.axis_end().map_or(false, |end| end < size)
    }

    /// Check whether one step keeps every cell inside `[0, size)`
    pub fn can_slide(&self, step: Step, size: usize) -> bool {
        match step {
            Step::Backward => self.axis_start() >= 1,
            Step::Forward => self
                .axis_end()
                .map_or(false, |end| end < size.saturating_sub(1)),
        }
    }

    /// Move the origin one cell along the vehicle's axis.
    ///
    /// Collisions and the far edge are the board's concern. Returns `false`
    /// and leaves the vehicle untouched if the origin would become negative.
    pub fn slide(&mut self, step: Step) -> bool {
        let axis = match self.orientation {
            Orientation::Horizontal => &mut self.origin.col,
            Orientation::Vertical => &mut self.origin.row,
        };
        match axis.checked_add_signed(step.delta()) {
            Some(moved) => {
                *axis = moved;
                true
            }
            None => false,
        }
    }

    /// Copy of this vehicle moved by one step, if that step stays in bounds
    pub fn slid(&self, step: Step, size: usize) -> Option<Vehicle> {
        if !self.can_slide(step, size) {
            return None;
        }
        let mut candidate = self.clone();
        candidate.slide(step).then_some(candidate)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle(id={}, origin={}, length={}, orientation={})",
            self.id, self.origin, self.length, self.orientation
        )
    }
}
