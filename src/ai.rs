//! Automated opponents.
//!
//! [`RandomTargeting`] fires blindly but never twice at the same cell.
//! [`HuntTargeting`] searches on a checkerboard and, once it lands a hit,
//! works outward from it until the ship goes down.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::bitgrid::BitGrid;
use crate::common::{AttackOutcome, Coord};
use crate::grid::Grid;
use crate::player::Targeting;

/// Easy opponent: uniformly random shots without repeats.
#[derive(Debug, Clone)]
pub struct RandomTargeting {
    attacked: BitGrid,
}

impl RandomTargeting {
    pub fn new(board_size: usize) -> Self {
        Self {
            attacked: BitGrid::new(board_size),
        }
    }

    /// Whether this opponent has already chosen `at`.
    pub fn is_attacked(&self, at: Coord) -> bool {
        self.attacked.contains(at)
    }
}

impl Targeting for RandomTargeting {
    fn next_move(&mut self, rng: &mut SmallRng, _board: &Grid) -> Option<Coord> {
        let size = self.attacked.size();
        let open: Vec<Coord> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Coord::new(x, y)))
            .filter(|&c| !self.attacked.contains(c))
            .collect();
        if open.is_empty() {
            return None;
        }
        let choice = open[rng.random_range(0..open.len())];
        self.attacked.insert(choice);
        Some(choice)
    }
}

/// Which way a run of hits lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    /// Hits share a column.
    Vertical,
    /// Hits share a row.
    Horizontal,
}

/// Hard opponent: hunt on a checkerboard, then finish off what it hits.
///
/// There is no explicit mode. Every call to `next_move` walks the same
/// priority cascade and the first tier that produces a cell wins:
///
/// 1. queued follow-up cells, oldest first;
/// 2. either end of the longest straight run of unsunk hits;
/// 3. the four neighbours of the most recent hit;
/// 4. a random unresolved cell with `(x + y)` even;
/// 5. the first unresolved cell in row-major order.
///
/// A cell is unresolved when this opponent has not chosen it and the board
/// has not revealed it.
#[derive(Debug, Clone)]
pub struct HuntTargeting {
    size: usize,
    attacked: BitGrid,
    active_hits: Vec<Coord>,
    target_queue: VecDeque<Coord>,
}

impl HuntTargeting {
    pub fn new(board_size: usize) -> Self {
        Self {
            size: board_size,
            attacked: BitGrid::new(board_size),
            active_hits: Vec::new(),
            target_queue: VecDeque::new(),
        }
    }

    /// Hits on the ship currently being chased, in discovery order.
    pub fn active_hits(&self) -> &[Coord] {
        &self.active_hits
    }

    /// Follow-up cells waiting to be tried.
    pub fn target_queue(&self) -> impl Iterator<Item = Coord> + '_ {
        self.target_queue.iter().copied()
    }

    /// Whether `at` has been chosen or written off by this opponent.
    pub fn is_attacked(&self, at: Coord) -> bool {
        self.attacked.contains(at)
    }

    fn is_open(&self, board: &Grid, at: Coord) -> bool {
        at.in_bounds(self.size) && !self.attacked.contains(at) && !board.is_revealed(at.x, at.y)
    }

    fn enqueue_neighbors(&mut self, board: &Grid, at: Coord) {
        for n in at.neighbors4(self.size) {
            if self.is_open(board, n) && !self.target_queue.contains(&n) {
                self.target_queue.push_back(n);
            }
        }
    }

    fn pop_queued(&mut self, board: &Grid) -> Option<Coord> {
        while let Some(c) = self.target_queue.pop_front() {
            if self.is_open(board, c) {
                return Some(c);
            }
        }
        None
    }

    /// The largest set of active hits sharing a column or a row, sorted
    /// along its line. Columns win ties.
    fn best_aligned_group(&self) -> Option<(Line, Vec<Coord>)> {
        let vertical = largest_group(&self.active_hits, |c| c.x);
        let horizontal = largest_group(&self.active_hits, |c| c.y);
        let (line, mut group) = if vertical.len() >= horizontal.len() {
            (Line::Vertical, vertical)
        } else {
            (Line::Horizontal, horizontal)
        };
        if group.len() < 2 {
            return None;
        }
        match line {
            Line::Vertical => group.sort_by_key(|c| c.y),
            Line::Horizontal => group.sort_by_key(|c| c.x),
        }
        Some((line, group))
    }

    fn extend_line(&self, board: &Grid) -> Option<Coord> {
        let (line, group) = self.best_aligned_group()?;
        let (first, last) = (*group.first()?, *group.last()?);
        let (dx, dy) = match line {
            Line::Vertical => (0, 1),
            Line::Horizontal => (1, 0),
        };
        [last.offset(dx, dy, self.size), first.offset(-dx, -dy, self.size)]
            .into_iter()
            .flatten()
            .find(|&c| self.is_open(board, c))
    }

    fn radiate(&mut self, board: &Grid) -> Option<Coord> {
        let last = *self.active_hits.last()?;
        self.enqueue_neighbors(board, last);
        self.pop_queued(board)
    }

    fn hunt(&self, rng: &mut SmallRng, board: &Grid) -> Option<Coord> {
        let candidates: Vec<Coord> = self
            .cells()
            .filter(|c| (c.x + c.y) % 2 == 0 && self.is_open(board, *c))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }

    fn sweep(&self, board: &Grid) -> Option<Coord> {
        self.cells().find(|&c| self.is_open(board, c))
    }

    fn cells(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord::new(x, y)))
    }
}

/// First largest group of `hits` sharing the same `key`, groups taken in
/// order of first appearance.
fn largest_group(hits: &[Coord], key: impl Fn(&Coord) -> usize) -> Vec<Coord> {
    let mut best: Vec<Coord> = Vec::new();
    let mut seen: Vec<usize> = Vec::new();
    for hit in hits {
        let k = key(hit);
        if seen.contains(&k) {
            continue;
        }
        seen.push(k);
        let group: Vec<Coord> = hits.iter().filter(|c| key(c) == k).copied().collect();
        if group.len() > best.len() {
            best = group;
        }
    }
    best
}

impl Targeting for HuntTargeting {
    fn next_move(&mut self, rng: &mut SmallRng, board: &Grid) -> Option<Coord> {
        let choice = if let Some(c) = self.pop_queued(board) {
            debug!("queued follow-up {}", c);
            Some(c)
        } else if let Some(c) = self.extend_line(board) {
            debug!("extending line of {} hits to {}", self.active_hits.len(), c);
            Some(c)
        } else if let Some(c) = self.radiate(board) {
            debug!("probing around last hit: {}", c);
            Some(c)
        } else if let Some(c) = self.hunt(rng, board) {
            debug!("checkerboard hunt: {}", c);
            Some(c)
        } else {
            let c = self.sweep(board);
            debug!("sweep: {:?}", c);
            c
        };
        if let Some(c) = choice {
            self.attacked.insert(c);
        }
        choice
    }

    fn record(&mut self, board: &Grid, at: Coord, outcome: &AttackOutcome) {
        self.attacked.insert(at);
        match outcome {
            AttackOutcome::Hit(_) => {
                self.active_hits.push(at);
                self.enqueue_neighbors(board, at);
            }
            AttackOutcome::Sunk(_) => {
                let size = self.size;
                for c in self
                    .active_hits
                    .iter()
                    .chain(core::iter::once(&at))
                    .flat_map(|h| h.neighbors8(size))
                {
                    self.attacked.insert(c);
                }
                self.active_hits.clear();
                self.target_queue.clear();
            }
            AttackOutcome::Miss => {
                if self.active_hits.is_empty() {
                    self.target_queue.clear();
                }
            }
        }
    }
}
