//! Headless match flow: one human-controlled side against an automated
//! opponent, with the "hit and fire again" turn rule.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, info};
use rand::rngs::SmallRng;

use crate::common::{AttackOutcome, Coord, GridError};
use crate::config::MatchConfig;
use crate::grid::Grid;
use crate::player::{Difficulty, Targeting};
use crate::ship::Orientation;

/// Current phase of a match, from the human player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    /// The player is still placing ships.
    Setup,
    InProgress,
    Won,
    Lost,
}

/// Whose shot comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Player,
    Opponent,
}

/// Shot counters for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStats {
    pub player_shots: usize,
    pub player_hits: usize,
    pub opponent_shots: usize,
    pub opponent_hits: usize,
}

impl MatchStats {
    /// Percentage of the player's shots that hit, 0 before any shot.
    pub fn player_accuracy(&self) -> f64 {
        accuracy(self.player_hits, self.player_shots)
    }

    /// Percentage of the opponent's shots that hit, 0 before any shot.
    pub fn opponent_accuracy(&self) -> f64 {
        accuracy(self.opponent_hits, self.opponent_shots)
    }
}

fn accuracy(hits: usize, shots: usize) -> f64 {
    if shots == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / shots as f64
    }
}

/// Errors returned by match operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Grid(GridError),
    /// Firing is not allowed until `start` succeeds.
    NotStarted,
    /// Ships can only be placed during setup.
    AlreadyStarted,
    /// The player's fleet does not match the profile yet.
    FleetIncomplete { placed: usize, required: usize },
    /// Every ship in the profile is already on the board.
    FleetComplete,
    NotPlayersTurn,
    NotOpponentsTurn,
    OutOfBounds(Coord),
    AlreadyRevealed(Coord),
    Finished,
}

impl From<GridError> for MatchError {
    fn from(err: GridError) -> Self {
        MatchError::Grid(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Grid(e) => write!(f, "{}", e),
            MatchError::NotStarted => write!(f, "Match has not started"),
            MatchError::AlreadyStarted => write!(f, "Ships cannot be moved once the match starts"),
            MatchError::FleetIncomplete { placed, required } => {
                write!(f, "Fleet incomplete: {} of {} ships placed", placed, required)
            }
            MatchError::FleetComplete => write!(f, "All ships are already placed"),
            MatchError::NotPlayersTurn => write!(f, "It is the opponent's turn"),
            MatchError::NotOpponentsTurn => write!(f, "It is the player's turn"),
            MatchError::OutOfBounds(c) => write!(f, "{} is off the board", c),
            MatchError::AlreadyRevealed(c) => write!(f, "{} has already been fired upon", c),
            MatchError::Finished => write!(f, "Match is over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// Owns both boards and the automated opponent, and enforces turn order.
pub struct Match {
    config: MatchConfig,
    player: Grid,
    opponent: Grid,
    ai: Box<dyn Targeting>,
    rng: SmallRng,
    started: bool,
    turn: Turn,
    stats: MatchStats,
}

impl Match {
    /// Set up a match: the opponent's fleet is placed immediately, the
    /// player's board starts empty.
    pub fn new(config: MatchConfig, mut rng: SmallRng) -> Result<Self, MatchError> {
        if config.size == 0 {
            return Err(GridError::ZeroSize.into());
        }
        let player = Grid::with_profile(config.size, config.profile.clone());
        let mut opponent = Grid::with_profile(config.size, config.profile.clone());
        opponent.place_fleet(&mut rng)?;
        let ai = config.difficulty.targeting(config.size);
        info!(
            "new {}x{} match against {} opponent, fleet {:?}",
            config.size, config.size, config.difficulty, config.profile
        );
        Ok(Self {
            config,
            player,
            opponent,
            ai,
            rng,
            started: false,
            turn: Turn::Player,
            stats: MatchStats::default(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// The human player's board.
    pub fn player_grid(&self) -> &Grid {
        &self.player
    }

    /// The automated opponent's board.
    pub fn opponent_grid(&self) -> &Grid {
        &self.opponent
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Length of the next ship the player has to place, if any.
    pub fn next_ship_length(&self) -> Option<usize> {
        self.config.profile.get(self.player.ships().len()).copied()
    }

    /// Place the player's next ship from the profile at (x, y).
    pub fn place_player_ship(
        &mut self,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        if self.started {
            return Err(MatchError::AlreadyStarted);
        }
        let length = self.next_ship_length().ok_or(MatchError::FleetComplete)?;
        self.player.place_ship(length, x, y, orientation)?;
        Ok(())
    }

    /// Replace whatever the player placed with a random complete fleet.
    pub fn place_player_fleet_randomly(&mut self) -> Result<(), MatchError> {
        if self.started {
            return Err(MatchError::AlreadyStarted);
        }
        self.player.place_fleet(&mut self.rng)?;
        Ok(())
    }

    /// Leave setup. Requires the player's whole fleet on the board.
    pub fn start(&mut self) -> Result<(), MatchError> {
        if self.started {
            return Err(MatchError::AlreadyStarted);
        }
        let placed = self.player.ships().len();
        let required = self.config.profile.len();
        if placed != required {
            return Err(MatchError::FleetIncomplete { placed, required });
        }
        self.started = true;
        self.turn = Turn::Player;
        Ok(())
    }

    pub fn status(&self) -> MatchStatus {
        if !self.started {
            MatchStatus::Setup
        } else if self.opponent.all_ships_sunk() {
            MatchStatus::Won
        } else if self.player.all_ships_sunk() {
            MatchStatus::Lost
        } else {
            MatchStatus::InProgress
        }
    }

    fn ensure_playing(&self) -> Result<(), MatchError> {
        match self.status() {
            MatchStatus::Setup => Err(MatchError::NotStarted),
            MatchStatus::Won | MatchStatus::Lost => Err(MatchError::Finished),
            MatchStatus::InProgress => Ok(()),
        }
    }

    /// Fire at the opponent's board. A hit keeps the turn, a miss hands it
    /// to the opponent.
    pub fn player_fire(&mut self, x: usize, y: usize) -> Result<AttackOutcome, MatchError> {
        self.ensure_playing()?;
        if self.turn != Turn::Player {
            return Err(MatchError::NotPlayersTurn);
        }
        let at = Coord::new(x, y);
        if !at.in_bounds(self.opponent.size()) {
            return Err(MatchError::OutOfBounds(at));
        }
        if self.opponent.is_revealed(x, y) {
            return Err(MatchError::AlreadyRevealed(at));
        }
        let outcome = self.opponent.attack(x, y);
        self.stats.player_shots += 1;
        if outcome.is_hit() {
            self.stats.player_hits += 1;
        } else {
            self.turn = Turn::Opponent;
        }
        Ok(outcome)
    }

    /// Let the automated opponent shoot until it misses, runs out of moves
    /// or sinks the last ship. Returns every shot taken.
    pub fn opponent_turn(&mut self) -> Result<Vec<(Coord, AttackOutcome)>, MatchError> {
        self.ensure_playing()?;
        if self.turn != Turn::Opponent {
            return Err(MatchError::NotOpponentsTurn);
        }
        let mut shots = Vec::new();
        loop {
            let Some(at) = self.ai.next_move(&mut self.rng, &self.player) else {
                debug!("opponent has no move left");
                break;
            };
            let outcome = self.player.attack(at.x, at.y);
            self.ai.record(&self.player, at, &outcome);
            self.stats.opponent_shots += 1;
            shots.push((at, outcome));
            if !outcome.is_hit() {
                break;
            }
            self.stats.opponent_hits += 1;
            if self.player.all_ships_sunk() {
                break;
            }
        }
        self.turn = Turn::Player;
        Ok(shots)
    }
}

/// Result of one automated opponent firing at a random fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelReport {
    pub difficulty: Difficulty,
    pub size: usize,
    pub ships: usize,
    pub shots: usize,
    pub hits: usize,
    /// `true` when every ship went down before the opponent ran out of moves.
    pub cleared: bool,
}

/// Place a random fleet and let an opponent of `difficulty` fire at it until
/// the fleet is gone or no move is left.
pub fn duel(
    size: usize,
    profile: Vec<usize>,
    difficulty: Difficulty,
    rng: &mut SmallRng,
) -> Result<DuelReport, GridError> {
    if size == 0 {
        return Err(GridError::ZeroSize);
    }
    let mut board = Grid::with_profile(size, profile);
    board.place_fleet(rng)?;
    let mut ai = difficulty.targeting(size);
    let mut shots = 0;
    let mut hits = 0;
    while !board.all_ships_sunk() {
        let Some(at) = ai.next_move(rng, &board) else {
            break;
        };
        let outcome = board.attack(at.x, at.y);
        ai.record(&board, at, &outcome);
        shots += 1;
        if outcome.is_hit() {
            hits += 1;
        }
    }
    Ok(DuelReport {
        difficulty,
        size,
        ships: board.ships().len(),
        shots,
        hits,
        cleared: board.all_ships_sunk(),
    })
}
