use alloc::boxed::Box;
use core::fmt;
use core::str::FromStr;

use rand::rngs::SmallRng;

use crate::ai::{HuntTargeting, RandomTargeting};
use crate::common::{AttackOutcome, Coord};
use crate::grid::Grid;

/// Interface implemented by the automated opponents.
///
/// The orchestrator asks for a move, fires it at `board`, then reports the
/// outcome back through [`record`](Targeting::record).
pub trait Targeting: Send {
    /// Choose the next cell to fire at on `board`, or `None` once every
    /// cell has been resolved.
    fn next_move(&mut self, rng: &mut SmallRng, board: &Grid) -> Option<Coord>;

    /// Inform the opponent of the result of its last shot.
    fn record(&mut self, _board: &Grid, _at: Coord, _outcome: &AttackOutcome) {}
}

/// Strength of the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Random shots that never repeat.
    Easy,
    /// Checkerboard hunting that chases down every hit.
    #[default]
    Hard,
}

impl Difficulty {
    /// Build the opponent for a `board_size × board_size` board.
    pub fn targeting(self, board_size: usize) -> Box<dyn Targeting> {
        match self {
            Difficulty::Easy => Box::new(RandomTargeting::new(board_size)),
            Difficulty::Hard => Box::new(HuntTargeting::new(board_size)),
        }
    }
}

/// Error for an unrecognised difficulty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "difficulty must be `easy` or `hard`")
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("easy") {
            Ok(Difficulty::Easy)
        } else if s.eq_ignore_ascii_case("hard") {
            Ok(Difficulty::Hard)
        } else {
            Err(ParseDifficultyError)
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}
