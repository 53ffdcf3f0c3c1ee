//! Common types: coordinates, cell states, attack outcomes and grid errors.

use core::fmt;

use crate::bitgrid::BitGridError;
use crate::ship::Ship;

/// A board position. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

/// Orthogonal steps in the order right, down, left, up.
const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies on a `size × size` board.
    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// The cell `(dx, dy)` away, if it is on a `size × size` board.
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let c = Coord::new(x, y);
        c.in_bounds(size).then_some(c)
    }

    /// In-bounds orthogonal neighbours: right, down, left, up.
    pub fn neighbors4(self, size: usize) -> impl Iterator<Item = Coord> {
        ORTHOGONAL
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy, size))
    }

    /// In-bounds cells of the 3×3 block centred here, the centre included.
    pub fn neighbors8(self, size: usize) -> impl Iterator<Item = Coord> {
        (-1..=1isize)
            .flat_map(|dy| (-1..=1isize).map(move |dx| (dx, dy)))
            .filter_map(move |(dx, dy)| self.offset(dx, dy, size))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    ShipPresent,
    Hit,
    Miss,
}

/// Result of attacking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Nothing was hit: open water, an already revealed cell, or off the board.
    Miss,
    /// A ship segment was hit; the ship is still afloat.
    Hit(Ship),
    /// The final segment of a ship was hit.
    Sunk(Ship),
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, AttackOutcome::Sunk(_))
    }

    /// The ship that was struck, if any.
    pub fn ship(&self) -> Option<&Ship> {
        match self {
            AttackOutcome::Miss => None,
            AttackOutcome::Hit(ship) | AttackOutcome::Sunk(ship) => Some(ship),
        }
    }
}

/// Errors returned by Grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Underlying bit grid error.
    BitGrid(BitGridError),
    /// Board size must be positive.
    ZeroSize,
    /// Ships must be at least one cell long.
    ZeroLengthShip,
    /// Some cell of the ship would fall off the board.
    ShipOutOfBounds,
    /// The ship would overlap or touch an existing ship.
    ShipTouches,
    /// Random placement could not fit the whole fleet.
    UnableToPlaceFleet { placed: usize, required: usize },
}

impl From<BitGridError> for GridError {
    fn from(err: BitGridError) -> Self {
        GridError::BitGrid(err)
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::BitGrid(e) => write!(f, "BitGrid error: {}", e),
            GridError::ZeroSize => write!(f, "Board size must be positive"),
            GridError::ZeroLengthShip => write!(f, "Ship length must be positive"),
            GridError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            GridError::ShipTouches => write!(f, "Ship would overlap or touch another ship"),
            GridError::UnableToPlaceFleet { placed, required } => {
                write!(f, "Unable to place fleet: {} of {} ships placed", placed, required)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GridError {}

#[cfg(feature = "std")]
impl std::error::Error for BitGridError {}
