//! Commonly used types and utilities for ease of import.

pub use crate::{
    duel, fleet_profile, AttackOutcome, CellState, Coord, Difficulty, Grid, HuntTargeting, Match,
    MatchConfig, MatchStatus, Orientation, RandomTargeting, Ship, Targeting,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, render_grid, run_terminal_match};
