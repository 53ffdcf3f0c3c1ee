use alloc::vec::Vec;

use crate::player::Difficulty;

/// Board width used when none is requested.
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Board widths with a dedicated fleet profile.
pub const SUPPORTED_SIZES: [usize; 3] = [6, 10, 14];

/// Random `(x, y, orientation)` draws tried per ship before it is skipped.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Whole-fleet restarts tried by [`Grid::place_fleet`](crate::Grid::place_fleet).
pub const FLEET_RESTARTS: usize = 100;

const SMALL_FLEET: [usize; 5] = [3, 2, 1, 1, 1];
const CLASSIC_FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];
const LARGE_FLEET: [usize; 15] = [5, 4, 4, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, 1];

/// Ship lengths making up a complete fleet on a `size × size` board.
/// Sizes without a dedicated profile get the classic 10×10 fleet.
pub fn fleet_profile(size: usize) -> Vec<usize> {
    match size {
        6 => SMALL_FLEET.to_vec(),
        14 => LARGE_FLEET.to_vec(),
        _ => CLASSIC_FLEET.to_vec(),
    }
}

/// Radius of an area strike: a single cell on the small board, 3×3 otherwise.
pub fn strike_radius(size: usize) -> usize {
    if size <= 6 {
        0
    } else {
        1
    }
}

/// Parameters fixed at the start of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    pub size: usize,
    pub profile: Vec<usize>,
    pub difficulty: Difficulty,
}

impl MatchConfig {
    /// Configuration for a board of `size` with its standard fleet.
    pub fn for_size(size: usize, difficulty: Difficulty) -> Self {
        Self {
            size,
            profile: fleet_profile(size),
            difficulty,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::for_size(DEFAULT_BOARD_SIZE, Difficulty::Hard)
    }
}
