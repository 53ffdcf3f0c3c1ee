//! Ship geometry and damage tracking.

use core::fmt;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// A placed vessel. Geometry is fixed at construction; only the hit count
/// changes, and only through [`Grid::attack`](crate::Grid::attack).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    length: usize,
    origin: Coord,
    orientation: Orientation,
    hits: usize,
}

impl Ship {
    /// Describe a ship starting at `origin` and extending right (horizontal)
    /// or down (vertical). No board checks happen here.
    pub fn new(length: usize, origin: Coord, orientation: Orientation) -> Self {
        Ship {
            length,
            origin,
            orientation,
            hits: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Cell of the first segment.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of distinct segments hit so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Cells occupied by the ship, from the origin outwards.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (dx, dy) = self.orientation.step();
        let origin = self.origin;
        (0..self.length).map(move |i| Coord::new(origin.x + dx * i, origin.y + dy * i))
    }

    /// Last cell of the ship. Saturates at `usize::MAX` for absurd lengths.
    pub fn end(&self) -> Coord {
        let (dx, dy) = self.orientation.step();
        let span = self.length.saturating_sub(1);
        Coord::new(
            self.origin.x.saturating_add(dx * span),
            self.origin.y.saturating_add(dy * span),
        )
    }

    /// Whether the ship occupies `at`.
    pub fn contains(&self, at: Coord) -> bool {
        let end = self.end();
        self.length > 0
            && (self.origin.x..=end.x).contains(&at.x)
            && (self.origin.y..=end.y).contains(&at.y)
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length
    }

    /// Record one more damaged segment. Returns `true` if this hit sank it.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.hits < self.length {
            self.hits += 1;
        }
        self.is_sunk()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: {}, orientation: {:?}, hits: {} }}",
            self.length, self.origin, self.orientation, self.hits,
        )
    }
}
