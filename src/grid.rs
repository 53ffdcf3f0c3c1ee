//! One side's board: cell states, placed ships and the record of fired cells.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::bitgrid::BitGrid;
use crate::common::{AttackOutcome, CellState, Coord, GridError};
use crate::config::{fleet_profile, FLEET_RESTARTS, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship};

/// Board state for one player.
///
/// A cell is `ShipPresent` exactly when an unhit segment of some ship lies
/// on it. Ships never overlap or touch, not even diagonally.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
    revealed: BitGrid,
    ships: Vec<Ship>,
    profile: Vec<usize>,
}

impl Grid {
    /// Create an empty `size × size` grid with the standard fleet profile.
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Self::with_profile(size, fleet_profile(size))
    }

    /// Fallible constructor: returns `Err(ZeroSize)` for a zero-sized board.
    pub fn try_new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        Ok(Self::with_profile(size, fleet_profile(size)))
    }

    /// Create an empty grid whose complete fleet is `profile`.
    /// Panics if `size` is zero.
    pub fn with_profile(size: usize, profile: Vec<usize>) -> Self {
        Grid {
            size,
            cells: vec![CellState::Empty; size * size],
            revealed: BitGrid::new(size),
            ships: Vec::new(),
            profile,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ship lengths this board expects for a complete fleet.
    pub fn profile(&self) -> &[usize] {
        &self.profile
    }

    /// Row-major cell states.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// State of the cell at (x, y), `None` when off the board.
    pub fn cell(&self, x: usize, y: usize) -> Option<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Cells that have been fired upon or deduced empty.
    pub fn revealed(&self) -> &BitGrid {
        &self.revealed
    }

    pub fn is_revealed(&self, x: usize, y: usize) -> bool {
        self.revealed.contains(Coord::new(x, y))
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Number of ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Whether a ship of `length` fits at (x, y) without leaving the board
    /// or touching any ship already placed.
    pub fn can_place_ship(&self, length: usize, x: usize, y: usize, orientation: Orientation) -> bool {
        self.check_placement(&Ship::new(length, Coord::new(x, y), orientation))
            .is_ok()
    }

    fn check_placement(&self, ship: &Ship) -> Result<(), GridError> {
        if ship.length() == 0 {
            return Err(GridError::ZeroLengthShip);
        }
        if ship.length() > self.size {
            return Err(GridError::ShipOutOfBounds);
        }
        if !ship.origin().in_bounds(self.size) || !ship.end().in_bounds(self.size) {
            return Err(GridError::ShipOutOfBounds);
        }
        let touches = ship
            .cells()
            .flat_map(|c| c.neighbors8(self.size))
            .any(|n| self.cell(n.x, n.y) == Some(CellState::ShipPresent));
        if touches {
            return Err(GridError::ShipTouches);
        }
        Ok(())
    }

    /// Place a ship of `length` with its first cell at (x, y).
    /// On error the grid is left untouched.
    pub fn place_ship(
        &mut self,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<(), GridError> {
        let ship = Ship::new(length, Coord::new(x, y), orientation);
        self.check_placement(&ship)?;
        for c in ship.cells() {
            let i = c.y * self.size + c.x;
            self.cells[i] = CellState::ShipPresent;
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Try to place one ship per entry of `profile` at random positions.
    ///
    /// Each ship gets up to [`PLACEMENT_ATTEMPTS`] draws; a ship that never
    /// fits is skipped. Returns how many ships were placed.
    pub fn place_ships_randomly(&mut self, rng: &mut SmallRng, profile: &[usize]) -> usize {
        let mut placed = 0;
        for &length in profile {
            let landed = (0..PLACEMENT_ATTEMPTS).any(|_| {
                let x = rng.random_range(0..self.size);
                let y = rng.random_range(0..self.size);
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                self.place_ship(length, x, y, orientation).is_ok()
            });
            if landed {
                placed += 1;
            } else {
                warn!("no room for a ship of length {} on a {}x{} board", length, self.size, self.size);
            }
        }
        placed
    }

    /// Place the whole profile at random, starting over on an empty board
    /// whenever a ship cannot be fitted.
    pub fn place_fleet(&mut self, rng: &mut SmallRng) -> Result<(), GridError> {
        let profile = self.profile.clone();
        let mut best = 0;
        for restart in 0..FLEET_RESTARTS {
            self.clear_ships();
            let placed = self.place_ships_randomly(rng, &profile);
            if placed == profile.len() {
                debug!("fleet of {} placed after {} restarts", placed, restart);
                return Ok(());
            }
            best = best.max(placed);
        }
        self.clear_ships();
        Err(GridError::UnableToPlaceFleet {
            placed: best,
            required: profile.len(),
        })
    }

    /// Remove every ship and forget all shots.
    pub fn clear_ships(&mut self) {
        self.cells.fill(CellState::Empty);
        self.revealed = BitGrid::new(self.size);
        self.ships.clear();
    }

    /// Fire at (x, y).
    ///
    /// Off-board coordinates and cells that were already hit or missed
    /// report a `Miss` and change nothing.
    pub fn attack(&mut self, x: usize, y: usize) -> AttackOutcome {
        let Some(i) = self.index(x, y) else {
            return AttackOutcome::Miss;
        };
        let _ = self.revealed.set(x, y);
        match self.cells[i] {
            CellState::ShipPresent => {
                let at = Coord::new(x, y);
                let Some(owner) = self.ships.iter().position(|s| s.contains(at)) else {
                    warn!("ship cell {} has no owning ship", at);
                    return AttackOutcome::Miss;
                };
                self.cells[i] = CellState::Hit;
                if self.ships[owner].register_hit() {
                    let ship = self.ships[owner];
                    self.reveal_surroundings(&ship);
                    debug!("ship of length {} sunk at {}", ship.length(), at);
                    AttackOutcome::Sunk(ship)
                } else {
                    AttackOutcome::Hit(self.ships[owner])
                }
            }
            CellState::Empty => {
                self.cells[i] = CellState::Miss;
                AttackOutcome::Miss
            }
            CellState::Hit | CellState::Miss => AttackOutcome::Miss,
        }
    }

    /// Fire at every unrevealed cell within `radius` of `center`
    /// (a `(2r+1)²` square clipped to the board), row by row.
    pub fn attack_area(&mut self, center: Coord, radius: usize) -> Vec<(Coord, AttackOutcome)> {
        let last = self.size - 1;
        let xs = center.x.saturating_sub(radius)..=center.x.saturating_add(radius).min(last);
        let ys = center.y.saturating_sub(radius)..=center.y.saturating_add(radius).min(last);
        let mut results = Vec::new();
        for y in ys {
            for x in xs.clone() {
                let c = Coord::new(x, y);
                if self.revealed.contains(c) {
                    continue;
                }
                results.push((c, self.attack(x, y)));
            }
        }
        results
    }

    /// Ships cannot touch, so every empty cell around a sunk ship is a
    /// guaranteed miss.
    fn reveal_surroundings(&mut self, ship: &Ship) {
        let size = self.size;
        for c in ship.cells().flat_map(|c| c.neighbors8(size)) {
            let i = c.y * size + c.x;
            if self.cells[i] == CellState::Empty {
                self.cells[i] = CellState::Miss;
                let _ = self.revealed.set(c.x, c.y);
            }
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {{\n  size: {},\n  revealed: {:?},\n  ships: {:?},\n  profile: {:?}\n}}",
            self.size, self.revealed, self.ships, self.profile
        )
    }
}
